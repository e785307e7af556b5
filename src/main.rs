//! CommunityHub operator binary
//!
//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, error};

use CommunityHub::{
    config::Settings,
    diagnostics::run_diagnostics,
    scripts::{deploy_env_commands, query_table, read_env_file},
    services::ServiceFactory,
    utils::logging,
    viewport::{SimulatedViewport, Viewport},
};

#[derive(Parser)]
#[command(name = "communityhub", version, about = "CommunityHub operator tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a diagnostics report for the configured deployment
    Diagnose {
        /// Simulate a viewport of this width in pixels
        #[arg(long)]
        width: Option<u32>,
    },
    /// List members, optionally filtered by role or looked up by ID
    Members {
        #[arg(long, conflicts_with = "id")]
        role: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Print deployment CLI commands registering every key of an env file
    DeployEnv {
        #[arg(default_value = ".env")]
        file: PathBuf,
        /// Deployment CLI executable
        #[arg(long, default_value = "vercel")]
        cli: String,
        /// Target environments
        #[arg(long = "environment", default_values_t = vec!["production".to_string()])]
        environments: Vec<String>,
    },
    /// Print up to `limit` rows of a backend table as JSON
    QueryTable {
        table: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", CommunityHub::info());

    let result = run(cli.command, settings).await;
    if let Err(ref e) = result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn run(command: Command, settings: Settings) -> anyhow::Result<()> {
    match command {
        Command::DeployEnv { file, cli, environments } => {
            let entries = read_env_file(&file)?;
            for command in deploy_env_commands(&entries, &cli, &environments) {
                println!("{}", command);
            }
        }
        Command::Diagnose { width } => {
            settings.validate()?;
            let services = ServiceFactory::new(&settings)?;
            let viewport = width.map(SimulatedViewport::new);

            let report = run_diagnostics(
                &settings,
                Arc::clone(&services.member_service),
                Some(&services.backend),
                viewport.as_ref().map(|v| v as &dyn Viewport),
            )
            .await;
            print!("{}", report);
        }
        Command::Members { role, id } => {
            settings.validate()?;
            let services = ServiceFactory::new(&settings)?;
            let directory = services.member_directory();

            let members = match (role, id) {
                (_, Some(id)) => directory.try_member_by_id(&id).await?.into_iter().collect(),
                (Some(role), None) => directory.try_members_by_role(&role).await?,
                (None, None) => {
                    let mut rx = directory.subscribe();
                    let state = rx.wait_for(|state| !state.loading).await?.clone();
                    if let Some(error) = state.error {
                        bail!(error);
                    }
                    state.members
                }
            };

            for member in &members {
                println!("{}\t{}\t{}\t{:?}", member.id, member.full_name(), member.role, member.status);
            }
            info!(count = members.len(), "Members listed");
        }
        Command::QueryTable { table, limit } => {
            settings.validate()?;
            let services = ServiceFactory::new(&settings)?;
            println!("{}", query_table(&services.backend, &table, limit).await?);
        }
    }

    Ok(())
}

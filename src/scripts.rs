//! Operator tooling
//!
//! One-shot helpers behind the binary's subcommands: exporting a local env
//! file to the deployment CLI and reading a backend table. Credentials always
//! come from configuration or the environment.

use std::path::Path;
use tracing::{debug, info};
use crate::services::BackendClient;
use crate::utils::errors::{CommunityHubError, Result};

/// Key/value pairs of a local env file, in file order.
///
/// A missing file is a configuration error.
pub fn read_env_file(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        return Err(CommunityHubError::Config(format!(
            "Environment file not found: {}",
            path.display()
        )));
    }

    let entries = dotenv::from_path_iter(path)
        .map_err(|e| CommunityHubError::Config(format!("Failed to read {}: {}", path.display(), e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CommunityHubError::Config(format!("Malformed line in {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), count = entries.len(), "Environment file read");
    Ok(entries)
}

/// Shell commands registering each key with the deployment CLI.
///
/// Values are never written out; each command pipes the variable from the
/// operator's environment so secrets stay out of shell history.
pub fn deploy_env_commands(entries: &[(String, String)], cli: &str, environments: &[String]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|(key, _)| {
            environments
                .iter()
                .map(move |environment| format!("printf '%s' \"${}\" | {} env add {} {}", key, cli, key, environment))
        })
        .collect()
}

/// Read up to `limit` rows of `table` and render them as pretty JSON
pub async fn query_table(backend: &BackendClient, table: &str, limit: usize) -> Result<String> {
    let rows = backend.fetch_rows(table, limit).await?;
    info!(table = table, rows = rows.len(), "Table read");
    Ok(serde_json::to_string_pretty(&rows)?)
}

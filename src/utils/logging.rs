//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CommunityHub application.

use std::path::Path;
use tracing::{info, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{CommunityHubError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let path = Path::new(&config.file_path);
    let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "communityhub.log".to_string());

    std::fs::create_dir_all(directory)?;
    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| CommunityHubError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log member queries with structured data
pub fn log_member_query(operation: &str, filter: Option<&str>, result_count: usize) {
    debug!(
        operation = operation,
        filter = filter,
        result_count = result_count,
        "Member query completed"
    );
}

/// Log service errors with context
pub fn log_service_error(service: &str, error: &str, context: Option<&str>) {
    error!(
        service = service,
        error = error,
        context = context,
        "Service error occurred"
    );
}

/// Log a navigation action triggered from a module card
pub fn log_navigation(card: &str, route: &str) {
    info!(
        card = card,
        route = route,
        "Navigation requested"
    );
}

/// Log state updates dropped because the owner was torn down
pub fn log_discarded_update(component: &str, operation: &str) {
    debug!(
        component = component,
        operation = operation,
        "Discarding state update after teardown"
    );
}

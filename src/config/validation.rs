//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CommunityHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_logging_config(&settings.logging)?;
    validate_ui_config(&settings.ui)?;

    Ok(())
}

/// Validate hosted backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CommunityHubError::Config(
            "Backend URL is required".to_string()
        ));
    }

    url::Url::parse(&config.url)
        .map_err(|e| CommunityHubError::Config(format!("Backend URL is invalid: {}", e)))?;

    if config.api_key.is_empty() {
        return Err(CommunityHubError::Config(
            "Backend API key is required (set COMMUNITYHUB__BACKEND__API_KEY)".to_string()
        ));
    }

    if config.members_table.is_empty() {
        return Err(CommunityHubError::Config(
            "Members table name is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CommunityHubError::Config(
            "Backend timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CommunityHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CommunityHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate presentation configuration
fn validate_ui_config(config: &super::UiConfig) -> Result<()> {
    if config.mobile_breakpoint_px == 0 {
        return Err(CommunityHubError::Config(
            "Mobile breakpoint must be greater than 0".to_string()
        ));
    }

    Ok(())
}

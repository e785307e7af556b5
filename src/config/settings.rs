//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.
//! Backend credentials are only ever read from the environment or a local
//! configuration file; the defaults carry no key.

use serde::{Deserialize, Serialize};
use crate::utils::helpers::redact_secret;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

/// Hosted backend configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub members_table: String,
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &redact_secret(&self.api_key))
            .field("members_table", &self.members_table)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub mobile_breakpoint_px: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Sources, lowest priority first: built-in defaults, `config.toml` in the
    /// working directory, then `COMMUNITYHUB__SECTION__KEY` variables. A local
    /// `.env` file is loaded into the environment beforehand when present.
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("COMMUNITYHUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CommunityHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: "http://localhost:54321".to_string(),
                api_key: String::new(),
                members_table: "members".to_string(),
                timeout_seconds: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs/communityhub.log".to_string(),
            },
            ui: UiConfig {
                mobile_breakpoint_px: 768,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_debug_output_redacts_api_key() {
        let mut settings = Settings::default();
        settings.backend.api_key = "super-secret-service-key".to_string();

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("super-secret-service-key"));
        assert!(rendered.contains("members_table"));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        std::env::set_var("COMMUNITYHUB__BACKEND__URL", "https://backend.example.org");
        std::env::set_var("COMMUNITYHUB__BACKEND__API_KEY", "env-key");

        let settings = Settings::new().unwrap();

        std::env::remove_var("COMMUNITYHUB__BACKEND__URL");
        std::env::remove_var("COMMUNITYHUB__BACKEND__API_KEY");

        assert_eq!(settings.backend.url, "https://backend.example.org");
        assert_eq!(settings.backend.api_key, "env-key");
        assert_eq!(settings.backend.members_table, "members");
        assert_eq!(settings.ui.mobile_breakpoint_px, 768);
    }
}

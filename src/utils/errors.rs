//! Error handling for CommunityHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for CommunityHub
#[derive(Error, Debug)]
pub enum CommunityHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Member not found: {member_id}")]
    MemberNotFound { member_id: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for CommunityHub operations
pub type Result<T> = std::result::Result<T, CommunityHubError>;

impl From<config::ConfigError> for CommunityHubError {
    fn from(err: config::ConfigError) -> Self {
        CommunityHubError::Config(err.to_string())
    }
}

impl CommunityHubError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CommunityHubError::Config(_) => false,
            CommunityHubError::Http(_) => true,
            CommunityHubError::Backend { status, .. } => *status >= 500,
            CommunityHubError::Serialization(_) => false,
            CommunityHubError::Io(_) => true,
            CommunityHubError::UrlParse(_) => false,
            CommunityHubError::MemberNotFound { .. } => false,
            CommunityHubError::InvalidStateTransition { .. } => false,
            CommunityHubError::InvalidInput(_) => false,
            CommunityHubError::Cancelled => false,
            CommunityHubError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CommunityHubError::Config(_) => ErrorSeverity::Critical,
            CommunityHubError::Backend { status, .. } if *status == 401 || *status == 403 => ErrorSeverity::Warning,
            CommunityHubError::MemberNotFound { .. } => ErrorSeverity::Info,
            CommunityHubError::InvalidInput(_) => ErrorSeverity::Info,
            CommunityHubError::Cancelled => ErrorSeverity::Info,
            CommunityHubError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

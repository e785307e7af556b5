//! CommunityHub
//!
//! Client core for a community management platform: members, messaging,
//! projects, votes, announcements and volunteer permanences, backed by a
//! hosted REST backend. This library provides the domain models, the member
//! service and directory, timezone-safe date handling, the dashboard module
//! cards and viewport observation.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod navigation;
pub mod viewport;
pub mod diagnostics;
pub mod scripts;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CommunityHubError, Result};

// Re-export main components for easy access
pub use services::{MemberDirectory, MemberService, RestMemberService, ServiceFactory};
pub use navigation::{ModuleCard, Navigator, Route};
pub use viewport::{MediaQueryWatcher, Viewport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, date handling and helper functions.

pub mod errors;
pub mod logging;
pub mod dates;
pub mod helpers;

pub use errors::{CommunityHubError, Result};

//! Viewport observation
//!
//! A [`Viewport`] evaluates CSS-style media queries for whatever surface
//! renders the application. [`MediaQueryWatcher`] keeps a boolean in sync
//! with one query for as long as it lives. Without a viewport (headless or
//! server-side rendering) the watcher reports `false` and subscribes to
//! nothing.

pub mod media_query;
pub mod simulated;

pub use media_query::{MediaQueryWatcher, is_mobile};
pub use simulated::{SimulatedViewport, MediaCondition};

use std::sync::Arc;
use crate::utils::errors::Result;

pub type ListenerId = u64;

/// Callback invoked with the new match state
pub type ChangeListener = Arc<dyn Fn(bool) + Send + Sync>;

/// Live evaluation of one media query
pub trait MediaQueryList: Send + Sync {
    fn matches(&self) -> bool;
    fn add_listener(&self, listener: ChangeListener) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

pub trait Viewport: Send + Sync {
    fn match_media(&self, query: &str) -> Result<Arc<dyn MediaQueryList>>;
}

//! Navigation module
//!
//! Application routes, the navigator seam used to follow them, and the module
//! cards that summarize each feature area on the dashboard.

pub mod cards;

use std::fmt;
use std::sync::Mutex;
use serde::Serialize;
use crate::utils::errors::{CommunityHubError, Result};

pub use cards::{ModuleCard, all_cards, announcements_card, messaging_card, projects_card, votes_card, project_management_card};

/// Top-level application routes. None of them take parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Announcements,
    Messages,
    Projects,
    Votes,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Announcements, Route::Messages, Route::Projects, Route::Votes];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Announcements => "/announcements",
            Route::Messages => "/messages",
            Route::Projects => "/projects",
            Route::Votes => "/votes",
        }
    }

    /// Resolve a path, ignoring a trailing slash
    pub fn from_path(path: &str) -> Result<Self> {
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| CommunityHubError::InvalidInput(format!("Unknown route: {}", path)))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can move the application to a route, typically the
/// client-side router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records visited routes in order
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn current(&self) -> Option<Route> {
        self.history().last().copied()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}

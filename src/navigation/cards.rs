//! Module cards
//!
//! Each card is a fixed, stateless summary of one feature area with a single
//! action leading to that area's route.

use std::fmt;
use serde::Serialize;
use crate::utils::logging::log_navigation;
use super::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleCard {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
    pub route: Route,
}

impl ModuleCard {
    /// Run the card's only action
    pub fn navigate(&self, navigator: &dyn Navigator) {
        log_navigation(self.key, self.route.path());
        navigator.navigate(self.route);
    }
}

impl fmt::Display for ModuleCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.icon, self.title)?;
        writeln!(f, "    {}", self.description)?;
        write!(f, "    > {} ({})", self.action_label, self.route)
    }
}

pub fn announcements_card() -> ModuleCard {
    ModuleCard {
        key: "announcements",
        title: "Announcements",
        icon: "megaphone",
        description: "Publish news for the whole community and keep track of past announcements.",
        action_label: "View announcements",
        route: Route::Announcements,
    }
}

pub fn messaging_card() -> ModuleCard {
    ModuleCard {
        key: "messaging",
        title: "Messaging",
        icon: "message-square",
        description: "Private and group conversations between members, with attachments and read receipts.",
        action_label: "Open messages",
        route: Route::Messages,
    }
}

pub fn projects_card() -> ModuleCard {
    ModuleCard {
        key: "projects",
        title: "Projects",
        icon: "folder-kanban",
        description: "Follow the community's ongoing projects and the members involved.",
        action_label: "View projects",
        route: Route::Projects,
    }
}

pub fn votes_card() -> ModuleCard {
    ModuleCard {
        key: "votes",
        title: "Votes",
        icon: "vote",
        description: "Take part in open votes and consult the results of closed ones.",
        action_label: "View votes",
        route: Route::Votes,
    }
}

/// Variant of the projects card aimed at project coordinators
pub fn project_management_card() -> ModuleCard {
    ModuleCard {
        key: "project_management",
        title: "Project management",
        icon: "briefcase",
        description: "Plan tasks, track the budget and schedule communications for each project.",
        action_label: "Manage projects",
        route: Route::Projects,
    }
}

/// Every dashboard card, in display order
pub fn all_cards() -> Vec<ModuleCard> {
    vec![
        announcements_card(),
        messaging_card(),
        projects_card(),
        votes_card(),
        project_management_card(),
    ]
}

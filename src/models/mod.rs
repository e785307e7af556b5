//! Data models module
//!
//! This module contains all data structures exchanged with the hosted backend.
//! Records are passive; lifecycle enums expose transition checks through
//! [`Lifecycle`] for callers that want them.

pub mod member;
pub mod conversation;
pub mod project;
pub mod permanence;

use std::fmt;
use crate::utils::errors::{CommunityHubError, Result};

// Re-export commonly used models
pub use member::{Member, MemberRole, MemberStatus};
pub use conversation::{Conversation, ConversationType, ConversationParticipant, Message, MessageStatus, Attachment};
pub use project::{Project, ProjectStatus, ProjectMember, ProjectTask, TaskStatus, TaskPriority, ProjectBudget, BudgetStatus, ProjectDocument, ProjectCommunication, CommunicationType};
pub use permanence::{Permanence, PermanenceStatus, PermanenceParticipant, AttendanceStatus};

/// A status with a fixed set of legal successor states
pub trait Lifecycle: Copy + Eq + fmt::Display {
    /// Whether moving from `self` to `next` is a legal edge
    fn can_transition_to(&self, next: Self) -> bool;

    /// Whether no further transition is possible
    fn is_terminal(&self) -> bool;

    /// Move to `next`, rejecting illegal edges
    fn transition(self, next: Self) -> Result<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CommunityHubError::InvalidStateTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

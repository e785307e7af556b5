//! Messaging models: conversations, participants, messages and attachments

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::Lifecycle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(rename = "type")]
    pub conversation_type: ConversationType,
    pub name: Option<String>,
    pub created_by: String,
    pub last_message_id: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants: Vec<ConversationParticipant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Participants in join order
    pub fn participants_by_join_time(&self) -> Vec<&ConversationParticipant> {
        let mut participants: Vec<&ConversationParticipant> = self.participants.iter().collect();
        participants.sort_by_key(|p| p.joined_at);
        participants
    }

    /// Point the conversation at a newer message; older messages are ignored
    pub fn record_message(&mut self, message: &Message) {
        let is_newer = self.last_message_at.map_or(true, |at| message.created_at >= at);
        if message.conversation_id == self.id && is_newer {
            self.last_message_id = Some(message.id.clone());
            self.last_message_at = Some(message.created_at);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Private,
    Group,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationParticipant {
    pub conversation_id: String,
    pub member_id: String,
    pub joined_at: DateTime<Utc>,
    pub last_read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub status: MessageStatus,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    fn rank(&self) -> u8 {
        match self {
            MessageStatus::Sent => 0,
            MessageStatus::Delivered => 1,
            MessageStatus::Read => 2,
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Read => "read",
        };
        f.write_str(name)
    }
}

impl Lifecycle for MessageStatus {
    // A read receipt may arrive before the delivery receipt.
    fn can_transition_to(&self, next: Self) -> bool {
        next.rank() > self.rank()
    }

    fn is_terminal(&self) -> bool {
        *self == MessageStatus::Read
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub message_id: String,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

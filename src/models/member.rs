//! Member model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::utils::errors::CommunityHubError;
use crate::utils::helpers::{initials, normalize_whitespace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub role: MemberRole,
    pub status: MemberStatus,
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn full_name(&self) -> String {
        normalize_whitespace(&format!("{} {}", self.first_name, self.last_name))
    }

    pub fn initials(&self) -> String {
        initials(&self.first_name, &self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Moderator,
    Member,
    Volunteer,
}

impl MemberRole {
    pub const ALL: [MemberRole; 4] = [
        MemberRole::Admin,
        MemberRole::Moderator,
        MemberRole::Member,
        MemberRole::Volunteer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Moderator => "moderator",
            MemberRole::Member => "member",
            MemberRole::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = CommunityHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemberRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommunityHubError::InvalidInput(format!("Unknown member role: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_deserialization_with_sparse_row() {
        let json = r#"{
            "id": "7f1c",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "volunteer",
            "status": "active",
            "created_at": "2025-01-10T09:00:00+00:00"
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.role, MemberRole::Volunteer);
        assert!(member.email.is_none());
        assert!(member.group_ids.is_empty());
        assert!(member.created_at.is_some());
        assert_eq!(member.full_name(), "Ada Lovelace");
        assert_eq!(member.initials(), "AL");
        assert!(member.is_active());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert_eq!(" volunteer ".parse::<MemberRole>().unwrap(), MemberRole::Volunteer);
        assert!("treasurer".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"id": "1", "first_name": "A", "last_name": "B", "role": "member", "status": "archived"}"#;
        assert!(serde_json::from_str::<Member>(json).is_err());
    }
}

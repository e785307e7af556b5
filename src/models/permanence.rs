//! Permanence model: scheduled volunteer slots and their rosters

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, TimeZone};
use super::Lifecycle;
use crate::utils::dates::parse_as_date_time_in;
use crate::utils::errors::Result;

/// A volunteer slot. Start and end are stored as zone-free wall-clock values
/// (`YYYY-MM-DDTHH:MM[:SS]`) and are read in the viewer's timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permanence {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub max_volunteers: Option<u32>,
    pub status: PermanenceStatus,
    pub created_by: String,
    #[serde(default)]
    pub participants: Vec<PermanenceParticipant>,
}

impl Permanence {
    pub fn starts_at<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        parse_as_date_time_in(&self.start_date, tz)
    }

    pub fn ends_at<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        parse_as_date_time_in(&self.end_date, tz)
    }

    pub fn is_full(&self) -> bool {
        self.max_volunteers
            .is_some_and(|max| self.participants.len() >= max as usize)
    }

    pub fn attendance_count(&self, status: AttendanceStatus) -> usize {
        self.participants.iter().filter(|p| p.status == status).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermanenceStatus {
    Open,
    Full,
    Canceled,
    Completed,
}

impl fmt::Display for PermanenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermanenceStatus::Open => "open",
            PermanenceStatus::Full => "full",
            PermanenceStatus::Canceled => "canceled",
            PermanenceStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

impl Lifecycle for PermanenceStatus {
    // A full slot reopens when a volunteer withdraws.
    fn can_transition_to(&self, next: Self) -> bool {
        use PermanenceStatus::*;
        matches!(
            (self, next),
            (Open, Full) | (Full, Open) | (Open | Full, Canceled) | (Open | Full, Completed)
        )
    }

    fn is_terminal(&self) -> bool {
        matches!(self, PermanenceStatus::Canceled | PermanenceStatus::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermanenceParticipant {
    pub permanence_id: String,
    pub member_id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Registered,
    Present,
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttendanceStatus::Registered => "registered",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        };
        f.write_str(name)
    }
}

impl Lifecycle for AttendanceStatus {
    fn can_transition_to(&self, next: Self) -> bool {
        *self == AttendanceStatus::Registered && next != AttendanceStatus::Registered
    }

    fn is_terminal(&self) -> bool {
        *self != AttendanceStatus::Registered
    }
}

//! Project models: members, tasks, budget lines, documents and communications

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use super::Lifecycle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_by: String,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub budget: Vec<ProjectBudget>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Share of tasks marked done, in `0.0..=1.0`; a project without tasks is at zero
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let done = self.tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
        done as f64 / self.tasks.len() as f64
    }

    /// Sum of budget lines in the given status, in cents
    pub fn budget_total(&self, status: BudgetStatus) -> i64 {
        self.budget
            .iter()
            .filter(|line| line.status == status)
            .map(|line| line.amount_cents)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
    pub project_id: String,
    pub member_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        };
        f.write_str(name)
    }
}

impl Lifecycle for TaskStatus {
    // Review may send a task back for rework.
    fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Todo, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Review)
                | (TaskStatus::Review, TaskStatus::Done)
                | (TaskStatus::Review, TaskStatus::InProgress)
        )
    }

    fn is_terminal(&self) -> bool {
        *self == TaskStatus::Done
    }
}

/// Priority tier, independent of the task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBudget {
    pub id: String,
    pub project_id: String,
    pub label: String,
    pub amount_cents: i64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Estimated,
    Approved,
    Spent,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BudgetStatus::Estimated => "estimated",
            BudgetStatus::Approved => "approved",
            BudgetStatus::Spent => "spent",
        };
        f.write_str(name)
    }
}

impl Lifecycle for BudgetStatus {
    fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (BudgetStatus::Estimated, BudgetStatus::Approved) | (BudgetStatus::Approved, BudgetStatus::Spent)
        )
    }

    fn is_terminal(&self) -> bool {
        *self == BudgetStatus::Spent
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub file_url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCommunication {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub communication_type: CommunicationType,
    pub title: String,
    pub content: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ProjectCommunication {
    /// Scheduled for a future publication and not yet published
    pub fn is_pending_publication(&self, now: DateTime<Utc>) -> bool {
        self.published_at.is_none() && self.scheduled_at.is_some_and(|at| at > now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommunicationType {
    Announcement,
    Newsletter,
    SocialPost,
    Email,
}

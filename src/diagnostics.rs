//! Diagnostics report
//!
//! Wires the member directory, date utilities, module cards and viewport
//! watcher together into one report for manual inspection of a deployment.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};
use crate::config::Settings;
use crate::navigation::{all_cards, ModuleCard};
use crate::services::{BackendClient, MemberDirectory, MemberService, ServiceHealthStatus};
use crate::utils::dates::{format_local_date, format_local_time, parse_as_local_date_time};
use crate::utils::helpers::{redact_secret, truncate_text};
use crate::viewport::{is_mobile, Viewport};

/// Inputs exercised by the date section
pub const DATE_SAMPLES: &[&str] = &[
    "2025-06-02T19:00:00",
    "2025-06-02 08:30",
    "2025-06-02T19:00:00Z",
    "2025-06-02T19:00:00+02:00",
];

#[derive(Debug, Clone)]
pub struct DirectorySummary {
    pub total: usize,
    pub by_role: BTreeMap<String, usize>,
    pub still_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DateSample {
    pub input: String,
    pub local_date: Option<String>,
    pub local_time: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewportSummary {
    pub available: bool,
    pub breakpoint_px: u32,
    pub is_mobile: bool,
    pub subscribed: bool,
}

#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    pub generated_at: DateTime<Utc>,
    pub configuration: Vec<(String, String)>,
    pub health: Option<ServiceHealthStatus>,
    pub directory: DirectorySummary,
    pub dates: Vec<DateSample>,
    pub cards: Vec<ModuleCard>,
    pub viewport: ViewportSummary,
}

/// Configuration lines safe to print
pub fn configuration_summary(settings: &Settings) -> Vec<(String, String)> {
    vec![
        ("backend.url".to_string(), settings.backend.url.clone()),
        ("backend.api_key".to_string(), redact_secret(&settings.backend.api_key)),
        ("backend.members_table".to_string(), settings.backend.members_table.clone()),
        ("backend.timeout_seconds".to_string(), settings.backend.timeout_seconds.to_string()),
        ("logging.level".to_string(), settings.logging.level.clone()),
        ("ui.mobile_breakpoint_px".to_string(), settings.ui.mobile_breakpoint_px.to_string()),
    ]
}

/// Mount a directory, wait for the initial fetch (bounded by `wait`) and summarize it
pub async fn summarize_directory(service: Arc<dyn MemberService>, wait: Duration) -> DirectorySummary {
    let directory = MemberDirectory::mount(service);
    let mut rx = directory.subscribe();

    if tokio::time::timeout(wait, rx.wait_for(|state| !state.loading)).await.is_err() {
        warn!(wait = ?wait, "Member directory did not settle in time");
    }

    let state = directory.state();
    directory.unmount();

    let mut by_role = BTreeMap::new();
    for member in &state.members {
        *by_role.entry(member.role.to_string()).or_insert(0) += 1;
    }

    DirectorySummary {
        total: state.members.len(),
        by_role,
        still_loading: state.loading,
        error: state.error.map(|e| e.to_string()),
    }
}

pub fn date_samples() -> Vec<DateSample> {
    DATE_SAMPLES
        .iter()
        .map(|input| match parse_as_local_date_time(input) {
            Ok(parsed) => DateSample {
                input: input.to_string(),
                local_date: Some(format_local_date(&parsed)),
                local_time: Some(format_local_time(&parsed)),
                error: None,
            },
            Err(e) => DateSample {
                input: input.to_string(),
                local_date: None,
                local_time: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

pub fn viewport_summary(viewport: Option<&dyn Viewport>, breakpoint_px: u32) -> ViewportSummary {
    let watcher = is_mobile(viewport, breakpoint_px);
    ViewportSummary {
        available: viewport.is_some(),
        breakpoint_px,
        is_mobile: watcher.matches(),
        subscribed: watcher.is_subscribed(),
    }
}

/// Build the full report. `backend` is optional so the report can run
/// against an injected member service alone.
pub async fn run_diagnostics(
    settings: &Settings,
    member_service: Arc<dyn MemberService>,
    backend: Option<&BackendClient>,
    viewport: Option<&dyn Viewport>,
) -> DiagnosticsReport {
    info!("Running diagnostics");
    let wait = Duration::from_secs(settings.backend.timeout_seconds.saturating_add(1));

    let health = async {
        match backend {
            Some(backend) => {
                let backend_reachable = backend.health_check().await.unwrap_or(false);
                Some(ServiceHealthStatus {
                    backend_reachable,
                    member_service_ready: true,
                })
            }
            None => None,
        }
    };
    let (health, directory) = futures::join!(health, summarize_directory(member_service, wait));

    DiagnosticsReport {
        generated_at: Utc::now(),
        configuration: configuration_summary(settings),
        health,
        directory,
        dates: date_samples(),
        cards: all_cards(),
        viewport: viewport_summary(viewport, settings.ui.mobile_breakpoint_px),
    }
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CommunityHub diagnostics ({})", self.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"))?;

        writeln!(f, "\n== Configuration")?;
        for (key, value) in &self.configuration {
            writeln!(f, "  {:<26} {}", key, value)?;
        }

        writeln!(f, "\n== Services")?;
        match &self.health {
            Some(health) if health.is_healthy() => writeln!(f, "  all services healthy")?,
            Some(health) => {
                for issue in health.get_issues() {
                    writeln!(f, "  ! {}", issue)?;
                }
            }
            None => writeln!(f, "  backend check skipped")?,
        }

        writeln!(f, "\n== Members")?;
        writeln!(f, "  total: {}", self.directory.total)?;
        for (role, count) in &self.directory.by_role {
            writeln!(f, "  {:<12} {}", role, count)?;
        }
        if self.directory.still_loading {
            writeln!(f, "  ! initial fetch still pending")?;
        }
        if let Some(ref error) = self.directory.error {
            writeln!(f, "  ! {}", truncate_text(error, 120))?;
        }

        writeln!(f, "\n== Dates (local timezone)")?;
        for sample in &self.dates {
            match (&sample.local_date, &sample.local_time, &sample.error) {
                (Some(date), Some(time), _) => writeln!(f, "  {:<28} -> {} {}", sample.input, date, time)?,
                (_, _, Some(error)) => writeln!(f, "  {:<28} -> error: {}", sample.input, error)?,
                _ => writeln!(f, "  {:<28} -> ?", sample.input)?,
            }
        }

        writeln!(f, "\n== Modules")?;
        for card in &self.cards {
            writeln!(f, "{}", card)?;
        }

        writeln!(f, "\n== Viewport")?;
        if self.viewport.available {
            writeln!(
                f,
                "  mobile (< {}px): {}",
                self.viewport.breakpoint_px, self.viewport.is_mobile
            )?;
        } else {
            writeln!(f, "  no viewport, mobile defaults to {}", self.viewport.is_mobile)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::models::{Member, MemberRole, MemberStatus};
    use crate::utils::errors::{CommunityHubError, Result};
    use crate::viewport::SimulatedViewport;

    struct FixedMembers(Vec<Member>);

    #[async_trait]
    impl MemberService for FixedMembers {
        async fn get_all_members(&self) -> Result<Vec<Member>> {
            Ok(self.0.clone())
        }

        async fn get_members_by_role(&self, role: &str) -> Result<Vec<Member>> {
            Ok(self.0.iter().filter(|m| m.role.as_str() == role).cloned().collect())
        }

        async fn get_member_by_id(&self, id: &str) -> Result<Option<Member>> {
            Ok(self.0.iter().find(|m| m.id == id).cloned())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl MemberService for Unreachable {
        async fn get_all_members(&self) -> Result<Vec<Member>> {
            Err(CommunityHubError::ServiceUnavailable("connection refused".to_string()))
        }

        async fn get_members_by_role(&self, _role: &str) -> Result<Vec<Member>> {
            Err(CommunityHubError::ServiceUnavailable("connection refused".to_string()))
        }

        async fn get_member_by_id(&self, _id: &str) -> Result<Option<Member>> {
            Err(CommunityHubError::ServiceUnavailable("connection refused".to_string()))
        }
    }

    struct Stalled;

    #[async_trait]
    impl MemberService for Stalled {
        async fn get_all_members(&self) -> Result<Vec<Member>> {
            std::future::pending().await
        }

        async fn get_members_by_role(&self, _role: &str) -> Result<Vec<Member>> {
            std::future::pending().await
        }

        async fn get_member_by_id(&self, _id: &str) -> Result<Option<Member>> {
            std::future::pending().await
        }
    }

    fn member(id: &str, role: MemberRole) -> Member {
        Member {
            id: id.to_string(),
            first_name: "Sam".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            address: None,
            role,
            status: MemberStatus::Active,
            group_ids: vec![],
            project_ids: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_report_counts_members_by_role() {
        let service = Arc::new(FixedMembers(vec![
            member("1", MemberRole::Admin),
            member("2", MemberRole::Volunteer),
            member("3", MemberRole::Volunteer),
        ]));
        let viewport = SimulatedViewport::new(375);

        let report = run_diagnostics(&Settings::default(), service, None, Some(&viewport)).await;

        assert_eq!(report.directory.total, 3);
        assert_eq!(report.directory.by_role.get("volunteer"), Some(&2));
        assert!(report.health.is_none());
        assert!(report.viewport.is_mobile);
        assert_eq!(report.cards.len(), 5);

        let rendered = report.to_string();
        assert!(rendered.contains("backend check skipped"));
        assert!(rendered.contains("[vote] Votes"));
        assert!(rendered.contains(&format!("{:<28} -> 2025-06-02 19:00", "2025-06-02T19:00:00")));
    }

    #[tokio::test]
    async fn test_report_surfaces_directory_error() {
        let summary = summarize_directory(Arc::new(Unreachable), Duration::from_secs(1)).await;
        assert_eq!(summary.total, 0);
        assert!(!summary.still_loading);
        assert!(summary.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_report_gives_up_on_stalled_directory() {
        let summary = summarize_directory(Arc::new(Stalled), Duration::from_millis(20)).await;
        assert_eq!(summary.total, 0);
        assert!(summary.still_loading);
        assert!(summary.error.is_none());
    }

    #[test]
    fn test_configuration_summary_redacts_key() {
        let mut settings = Settings::default();
        settings.backend.api_key = "service-role-secret".to_string();

        let summary = configuration_summary(&settings);
        let key_line = summary.iter().find(|(k, _)| k == "backend.api_key").unwrap();
        assert_eq!(key_line.1, "serv****");
    }

    #[test]
    fn test_viewport_summary_without_viewport() {
        let summary = viewport_summary(None, 768);
        assert!(!summary.available);
        assert!(!summary.is_mobile);
        assert!(!summary.subscribed);
    }

    #[test]
    fn test_zone_free_sample_keeps_wall_clock() {
        let samples = date_samples();
        assert_eq!(samples[0].local_time.as_deref(), Some("19:00"));
        assert_eq!(samples[1].local_time.as_deref(), Some("08:30"));
        assert!(samples.iter().all(|s| s.error.is_none()));
    }
}

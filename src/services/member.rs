//! Member service contract and its REST implementation

use async_trait::async_trait;
use tracing::debug;
use crate::config::settings::BackendConfig;
use crate::models::Member;
use crate::utils::errors::Result;
use crate::utils::logging::log_member_query;
use super::backend::{BackendClient, Query};

/// Read access to the member roster.
///
/// Implementations may fail with any [`CommunityHubError`](crate::CommunityHubError);
/// callers decide whether a fault is surfaced or degraded.
#[async_trait]
pub trait MemberService: Send + Sync {
    async fn get_all_members(&self) -> Result<Vec<Member>>;
    async fn get_members_by_role(&self, role: &str) -> Result<Vec<Member>>;
    async fn get_member_by_id(&self, id: &str) -> Result<Option<Member>>;
}

/// [`MemberService`] backed by the hosted backend's members table
#[derive(Clone, Debug)]
pub struct RestMemberService {
    backend: BackendClient,
    table: String,
}

impl RestMemberService {
    pub fn new(backend: BackendClient, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(BackendClient::new(config)?, config.members_table.clone()))
    }
}

#[async_trait]
impl MemberService for RestMemberService {
    async fn get_all_members(&self) -> Result<Vec<Member>> {
        debug!(table = %self.table, "Fetching all members");
        let members: Vec<Member> = self
            .backend
            .select(&self.table, &Query::new().order_asc("last_name"))
            .await?;

        log_member_query("get_all_members", None, members.len());
        Ok(members)
    }

    async fn get_members_by_role(&self, role: &str) -> Result<Vec<Member>> {
        debug!(table = %self.table, role = role, "Fetching members by role");
        let members: Vec<Member> = self
            .backend
            .select(&self.table, &Query::new().eq("role", role).order_asc("last_name"))
            .await?;

        log_member_query("get_members_by_role", Some(role), members.len());
        Ok(members)
    }

    async fn get_member_by_id(&self, id: &str) -> Result<Option<Member>> {
        debug!(table = %self.table, member_id = id, "Fetching member by ID");
        let members: Vec<Member> = self
            .backend
            .select(&self.table, &Query::new().eq("id", id).limit(1))
            .await?;

        log_member_query("get_member_by_id", Some(id), members.len());
        Ok(members.into_iter().next())
    }
}

//! Services module
//!
//! This module contains the backend client, the member service contract and
//! the member directory built on top of it.

pub mod backend;
pub mod member;
pub mod directory;

// Re-export commonly used services
pub use backend::{BackendClient, Query};
pub use member::{MemberService, RestMemberService};
pub use directory::{MemberDirectory, DirectoryState, DirectoryError};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and wiring services from settings
#[derive(Clone)]
pub struct ServiceFactory {
    pub backend: BackendClient,
    pub member_service: Arc<dyn MemberService>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        let backend = BackendClient::new(&settings.backend)?;
        let member_service: Arc<dyn MemberService> = Arc::new(RestMemberService::new(
            backend.clone(),
            settings.backend.members_table.clone(),
        ));

        Ok(Self {
            backend,
            member_service,
        })
    }

    /// Mount a member directory over the configured member service
    pub fn member_directory(&self) -> MemberDirectory {
        MemberDirectory::mount(Arc::clone(&self.member_service))
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let backend_reachable = self.backend.health_check().await.unwrap_or(false);

        ServiceHealthStatus {
            backend_reachable,
            member_service_ready: true, // Always ready if constructed
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub backend_reachable: bool,
    pub member_service_ready: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.backend_reachable && self.member_service_ready
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.backend_reachable {
            issues.push("Backend unreachable or rejected credentials".to_string());
        }
        if !self.member_service_ready {
            issues.push("Member service not ready".to_string());
        }

        issues
    }
}

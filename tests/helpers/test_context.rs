//! Test context for unified test setup
//!
//! Starts a mock backend and builds settings and services pointing at it.

use CommunityHub::config::Settings;
use CommunityHub::services::ServiceFactory;
use super::{backend_mock::BackendMockServer, test_data::test_api_key};

/// Unified test context that manages all test components
pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
}

impl TestContext {
    /// Create a new test context with a fresh mock backend
    pub async fn new() -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let backend = BackendMockServer::new().await;
        let settings = Self::create_test_settings(&backend);

        Self { backend, settings }
    }

    /// Create test-specific settings
    fn create_test_settings(backend: &BackendMockServer) -> Settings {
        let mut settings = Settings::default();

        settings.backend.url = backend.uri();
        settings.backend.api_key = test_api_key().to_string();
        settings.backend.members_table = "members".to_string();
        settings.backend.timeout_seconds = 2;

        settings.logging.level = "debug".to_string();

        settings
    }

    /// Build services against the mock backend
    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings).expect("Failed to create services")
    }
}

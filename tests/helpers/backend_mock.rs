//! Mock hosted backend for testing
//!
//! This module provides a mock HTTP server that simulates the backend's REST
//! table interface. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use super::test_data::test_api_key;

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
            expected_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self { success: false, ..Default::default() }
    }

    pub fn delayed(delay_ms: u64) -> Self {
        Self { delay_ms: Some(delay_ms), ..Default::default() }
    }

    pub fn expecting(calls: u64) -> Self {
        Self { expected_calls: Some(calls), ..Default::default() }
    }
}

impl BackendMockServer {
    /// Create a new mock backend server
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn response(rows: Vec<Value>, config: &MockResponseConfig) -> ResponseTemplate {
        let mut response = if config.success {
            ResponseTemplate::new(200).set_body_json(Value::Array(rows))
        } else {
            ResponseTemplate::new(500).set_body_json(json!({
                "code": "XX000",
                "message": "internal error"
            }))
        };

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }
        response
    }

    async fn mount(&self, mock: Mock, config: &MockResponseConfig) {
        let mock = match config.expected_calls {
            Some(calls) => mock.expect(calls),
            None => mock,
        };
        mock.mount(&self.server).await;
    }

    /// Setup mock for the unfiltered members listing
    pub async fn mock_all_members(&self, rows: Vec<Value>, config: MockResponseConfig) {
        let mock = Mock::given(method("GET"))
            .and(path("/rest/v1/members"))
            .and(query_param("select", "*"))
            .and(query_param("order", "last_name.asc"))
            .and(header("apikey", test_api_key()))
            .respond_with(Self::response(rows, &config));
        self.mount(mock, &config).await;
    }

    /// Setup mock for the members listing filtered by role
    pub async fn mock_members_by_role(&self, role: &str, rows: Vec<Value>, config: MockResponseConfig) {
        let mock = Mock::given(method("GET"))
            .and(path("/rest/v1/members"))
            .and(query_param("role", format!("eq.{}", role)))
            .and(header("apikey", test_api_key()))
            .respond_with(Self::response(rows, &config))
            .with_priority(1);
        self.mount(mock, &config).await;
    }

    /// Setup mock for a member lookup by ID
    pub async fn mock_member_by_id(&self, id: &str, rows: Vec<Value>, config: MockResponseConfig) {
        let mock = Mock::given(method("GET"))
            .and(path("/rest/v1/members"))
            .and(query_param("id", format!("eq.{}", id)))
            .and(query_param("limit", "1"))
            .and(header("apikey", test_api_key()))
            .respond_with(Self::response(rows, &config))
            .with_priority(1);
        self.mount(mock, &config).await;
    }

    /// Setup mock for an arbitrary table read
    pub async fn mock_table(&self, table: &str, rows: Vec<Value>, config: MockResponseConfig) {
        let mock = Mock::given(method("GET"))
            .and(path(format!("/rest/v1/{}", table)))
            .and(header("apikey", test_api_key()))
            .respond_with(Self::response(rows, &config));
        self.mount(mock, &config).await;
    }

    /// Setup mock for the backend root used by health checks
    pub async fn mock_health(&self, healthy: bool) {
        let status = if healthy { 200 } else { 401 };
        Mock::given(method("GET"))
            .and(path("/rest/v1/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }
}

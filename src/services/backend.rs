//! Hosted backend REST client
//!
//! Thin client over the backend's table interface
//! (`GET {url}/rest/v1/{table}?select=*&column=eq.value`). Handles HTTP client
//! setup, authentication headers, response parsing and error mapping.

use std::time::Duration;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use crate::config::settings::BackendConfig;
use crate::utils::errors::{CommunityHubError, Result};

const REST_PREFIX: &str = "rest/v1/";

/// A row selection against one table
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose `column` equals `value`
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Order by `column` ascending
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.asc", column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filters.iter().cloned());
        if let Some(ref order) = self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Client for the hosted backend's REST interface
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl BackendClient {
    /// Create a new BackendClient instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("CommunityHub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = Url::parse(&config.url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Select rows from `table` and decode them as `T`
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &Query) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        debug!(table = table, url = %url, "Querying backend table");

        let request = self.authorized(self.client.get(url)).query(&query.to_params());
        let response = Self::send(request).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| CommunityHubError::Backend {
                status: 200,
                message: format!("Invalid response body: {}", e),
            })
    }

    /// One-shot read of raw rows, used by the operator tooling
    pub async fn fetch_rows(&self, table: &str, limit: usize) -> Result<Vec<serde_json::Value>> {
        self.select(table, &Query::new().limit(limit)).await
    }

    /// Check that the backend answers authenticated requests
    pub async fn health_check(&self) -> Result<bool> {
        let url = self.base_url.join(REST_PREFIX)?;
        let response = self.authorized(self.client.get(url)).send().await.map_err(Self::map_transport_error)?;
        Ok(response.status().is_success())
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CommunityHubError::InvalidInput(format!("Invalid table name: {:?}", table)));
        }
        Ok(self.base_url.join(REST_PREFIX)?.join(table)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CommunityHubError::Backend { status, message });
        }

        Ok(response)
    }

    fn map_transport_error(e: reqwest::Error) -> CommunityHubError {
        if e.is_timeout() {
            CommunityHubError::ServiceUnavailable("Backend request timed out".to_string())
        } else if e.is_connect() {
            CommunityHubError::ServiceUnavailable(format!("Backend unreachable: {}", e))
        } else {
            CommunityHubError::Http(e)
        }
    }
}

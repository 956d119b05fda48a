//! HTTP adapter for a Planning-as-a-Service server.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::domain::errors::ServiceError;
use crate::domain::models::{
    parse_package_index, solve_url, PackageIndex, ServiceConfig, SolveRequest, TaskHandle,
};
use crate::domain::ports::SolverService;
use crate::infrastructure::http::{join_url, send_json};

/// Connection settings for [`PaasClient`].
#[derive(Debug, Clone)]
pub struct PaasClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PaasClientConfig {
    fn default() -> Self {
        let service = ServiceConfig::default();
        Self {
            base_url: service.base_url,
            timeout_secs: service.request_timeout_secs,
        }
    }
}

impl PaasClientConfig {
    pub fn from_service(service: &ServiceConfig) -> Self {
        Self {
            base_url: service.base_url.clone(),
            timeout_secs: service.request_timeout_secs,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// [`SolverService`] over reqwest.
#[derive(Debug, Clone)]
pub struct PaasClient {
    http: Client,
    base_url: String,
}

impl PaasClient {
    pub fn with_config(config: PaasClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("paas-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ServiceError> {
        send_json(self.http.post(url).json(body), url).await
    }
}

#[async_trait]
impl SolverService for PaasClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn list_packages(&self) -> Result<PackageIndex, ServiceError> {
        let url = join_url(&self.base_url, "package");
        let listing = send_json(self.http.get(&url), &url).await?;
        let index = parse_package_index(listing).map_err(|err| ServiceError::Decode {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        debug!(count = index.len(), "packages listed");
        Ok(index)
    }

    #[instrument(skip(self, request))]
    async fn submit(&self, package: &str, request: &SolveRequest) -> Result<Value, ServiceError> {
        let url = solve_url(&self.base_url, package);
        let body = serde_json::to_value(request).map_err(|err| ServiceError::Decode {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        self.post(&url, &body).await
    }

    #[instrument(skip(self))]
    async fn check(&self, handle: &TaskHandle, adaptor: &str) -> Result<Value, ServiceError> {
        let url = self.poll_url(handle);
        self.post(&url, &json!({ "adaptor": adaptor })).await
    }

    #[instrument(skip(self))]
    async fn solve_and_validate(&self, problem_id: i64) -> Result<Value, ServiceError> {
        let url = join_url(&self.base_url, "solve-and-validate");
        self.post(&url, &json!({ "probID": problem_id })).await
    }
}

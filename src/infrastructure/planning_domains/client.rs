//! Client for the public planning.domains collection API.
//!
//! Every endpoint answers `{"result": [...]}`; anything else is a decode
//! error.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::errors::ServiceError;
use crate::domain::models::{CatalogConfig, Collection, DomainEntry, ProblemEntry};
use crate::domain::ports::CollectionCatalog;
use crate::infrastructure::http::{join_url, send_json};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PlanningDomainsClient {
    http: Client,
    api_url: String,
}

impl PlanningDomainsClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("paas-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(config.api_url.clone())
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ServiceError> {
        let url = join_url(&self.api_url, path);
        let mut envelope = send_json(self.http.get(&url), &url).await?;
        let records = match envelope.get_mut("result").map(Value::take) {
            Some(records @ Value::Array(_)) => records,
            _ => {
                return Err(ServiceError::Decode {
                    url,
                    reason: "missing result array".to_string(),
                })
            }
        };
        let records: Vec<T> =
            serde_json::from_value(records).map_err(|err| ServiceError::Decode {
                url: url.clone(),
                reason: err.to_string(),
            })?;
        debug!(url = %url, count = records.len(), "catalog records fetched");
        Ok(records)
    }
}

#[async_trait]
impl CollectionCatalog for PlanningDomainsClient {
    #[instrument(skip(self))]
    async fn collections(&self) -> Result<Vec<Collection>, ServiceError> {
        self.fetch("collections").await
    }

    #[instrument(skip(self))]
    async fn domains(&self) -> Result<Vec<DomainEntry>, ServiceError> {
        self.fetch("domains").await
    }

    #[instrument(skip(self))]
    async fn problems(&self, domain_id: i64) -> Result<Vec<ProblemEntry>, ServiceError> {
        self.fetch(&format!("problems/{domain_id}")).await
    }
}

//! Browsing the public domain/problem collections.

use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::ServiceError;
use crate::domain::models::{Collection, DomainEntry, ProblemEntry, SolveRequest};
use crate::domain::ports::CollectionCatalog;

/// Sorted, filtered access to a [`CollectionCatalog`].
pub struct CollectionBrowser {
    catalog: Arc<dyn CollectionCatalog>,
}

impl CollectionBrowser {
    pub fn new(catalog: Arc<dyn CollectionCatalog>) -> Self {
        Self { catalog }
    }

    /// Collections sorted by name, ignoring case.
    pub async fn collections(&self) -> Result<Vec<Collection>, ServiceError> {
        let mut collections = self.catalog.collections().await?;
        collections.sort_by_cached_key(|c| c.collection_name.to_lowercase());
        Ok(collections)
    }

    /// Domains sorted by name, ignoring case.
    pub async fn domains(&self) -> Result<Vec<DomainEntry>, ServiceError> {
        let mut domains = self.catalog.domains().await?;
        domains.sort_by_cached_key(|d| d.domain_name.to_lowercase());
        Ok(domains)
    }

    /// Sorted domains that belong to `collection`.
    pub async fn domains_in(&self, collection: &Collection) -> Result<Vec<DomainEntry>, ServiceError> {
        let members = collection.domain_ids();
        let domains: Vec<_> = self
            .domains()
            .await?
            .into_iter()
            .filter(|domain| members.contains(&domain.domain_id))
            .collect();
        debug!(
            collection = %collection.collection_name,
            count = domains.len(),
            "filtered domains by collection"
        );
        Ok(domains)
    }

    /// Problems of a domain sorted by name, ignoring case.
    pub async fn problems(&self, domain_id: i64) -> Result<Vec<ProblemEntry>, ServiceError> {
        let mut problems = self.catalog.problems(domain_id).await?;
        problems.sort_by_cached_key(|p| p.problem.to_lowercase());
        Ok(problems)
    }
}

/// A solve request that lets the service fetch both documents itself.
pub fn solve_request_for(problem: &ProblemEntry) -> SolveRequest {
    SolveRequest::from_urls(problem.domain_url.clone(), problem.problem_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedCatalog;

    #[async_trait]
    impl CollectionCatalog for FixedCatalog {
        async fn collections(&self) -> Result<Vec<Collection>, ServiceError> {
            Ok(serde_json::from_value(json!([
                {"collection_id": 2, "collection_name": "ipc-2000", "domain_set": "[1, 3]"},
                {"collection_id": 1, "collection_name": "Classical", "domain_set": [2]}
            ]))
            .unwrap())
        }

        async fn domains(&self) -> Result<Vec<DomainEntry>, ServiceError> {
            Ok(serde_json::from_value(json!([
                {"domain_id": 1, "domain_name": "logistics"},
                {"domain_id": 2, "domain_name": "Blocksworld"},
                {"domain_id": 3, "domain_name": "elevators"}
            ]))
            .unwrap())
        }

        async fn problems(&self, domain_id: i64) -> Result<Vec<ProblemEntry>, ServiceError> {
            Ok(serde_json::from_value(json!([
                {"problem": "probBLOCKS-5", "domain_url": format!("http://d/{domain_id}"),
                 "problem_url": "http://p/5", "upper_bound": null},
                {"problem": "probBLOCKS-10", "domain_url": format!("http://d/{domain_id}"),
                 "problem_url": "http://p/10", "upper_bound": 34.0}
            ]))
            .unwrap())
        }
    }

    fn browser() -> CollectionBrowser {
        CollectionBrowser::new(Arc::new(FixedCatalog))
    }

    #[tokio::test]
    async fn test_collections_sorted_case_insensitively() {
        let names: Vec<_> = browser()
            .collections()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.collection_name)
            .collect();
        assert_eq!(names, vec!["Classical", "ipc-2000"]);
    }

    #[tokio::test]
    async fn test_domains_in_collection() {
        let browser = browser();
        let collections = browser.collections().await.unwrap();
        let ipc = collections
            .iter()
            .find(|c| c.collection_name == "ipc-2000")
            .unwrap();
        let names: Vec<_> = browser
            .domains_in(ipc)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.domain_name)
            .collect();
        assert_eq!(names, vec!["elevators", "logistics"]);
    }

    #[tokio::test]
    async fn test_problems_sorted_and_bounds_labelled() {
        let problems = browser().problems(2).await.unwrap();
        assert_eq!(problems[0].problem, "probBLOCKS-10");
        assert_eq!(problems[1].upper_bound_label(), "unknown");
    }

    #[test]
    fn test_solve_request_uses_urls() {
        let problem: ProblemEntry = serde_json::from_value(json!({
            "problem": "p01", "domain_url": "http://d/1", "problem_url": "http://p/1"
        }))
        .unwrap();
        let request = solve_request_for(&problem);
        assert!(request.is_url());
        assert_eq!(request.domain_text(), "http://d/1");
        assert_eq!(request.problem_text(), "http://p/1");
    }
}

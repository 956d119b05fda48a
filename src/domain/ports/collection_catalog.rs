use async_trait::async_trait;

use crate::domain::errors::ServiceError;
use crate::domain::models::{Collection, DomainEntry, ProblemEntry};

/// Port trait for the public domain/problem collection API
///
/// Results come back in service order; sorting is left to the caller.
#[async_trait]
pub trait CollectionCatalog: Send + Sync {
    async fn collections(&self) -> Result<Vec<Collection>, ServiceError>;

    async fn domains(&self) -> Result<Vec<DomainEntry>, ServiceError>;

    /// Problems of one domain, each with the URLs of its hosted documents.
    async fn problems(&self, domain_id: i64) -> Result<Vec<ProblemEntry>, ServiceError>;
}

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::ServiceError;
use crate::domain::models::{PackageIndex, SolveRequest, TaskHandle};

/// Port trait for a Planning-as-a-Service endpoint
///
/// The solve protocol is asynchronous: [`submit`](SolverService::submit)
/// starts a task and returns the raw submit response (which should carry a
/// task handle in its `result` field), and [`check`](SolverService::check)
/// reports on a task until it settles.
///
/// Responses are handed back as raw JSON. Interpreting them (task handle
/// extraction, status classification, plan parsing) belongs to the solve
/// workflow, so an adapter only has to move bytes and map transport
/// failures to [`ServiceError`].
///
/// Implementations must be `Send + Sync`; every method takes `&self`.
#[async_trait]
pub trait SolverService: Send + Sync {
    /// Base URL every endpoint is resolved against.
    fn base_url(&self) -> &str;

    /// URL a status check for `handle` is sent to.
    fn poll_url(&self, handle: &TaskHandle) -> String {
        handle.poll_url(self.base_url())
    }

    /// `GET {base}/package`
    async fn list_packages(&self) -> Result<PackageIndex, ServiceError>;

    /// `POST {base}/package/{package}/solve`
    async fn submit(&self, package: &str, request: &SolveRequest) -> Result<Value, ServiceError>;

    /// `POST {base}{handle}` with `{"adaptor": adaptor}`
    async fn check(&self, handle: &TaskHandle, adaptor: &str) -> Result<Value, ServiceError>;

    /// `POST {base}/solve-and-validate` with `{"probID": problem_id}`
    async fn solve_and_validate(&self, problem_id: i64) -> Result<Value, ServiceError>;
}

//! Solve-and-validate runs over benchmark problems.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::models::{ValidationReport, ValidationStatus};
use crate::domain::ports::SolverService;

/// Runs `solve-and-validate` requests one after another.
pub struct ValidationRunner {
    service: Arc<dyn SolverService>,
}

impl ValidationRunner {
    pub fn new(service: Arc<dyn SolverService>) -> Self {
        Self { service }
    }

    /// Validate every problem in `problem_ids`, strictly in order.
    pub async fn run(&self, problem_ids: &[i64]) -> Vec<ValidationReport> {
        self.run_with(problem_ids, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_report` as each result arrives.
    #[instrument(skip(self, on_report), fields(count = problem_ids.len()))]
    pub async fn run_with<F>(&self, problem_ids: &[i64], mut on_report: F) -> Vec<ValidationReport>
    where
        F: FnMut(&ValidationReport),
    {
        let mut reports = Vec::with_capacity(problem_ids.len());
        for &problem_id in problem_ids {
            let report = self.validate(problem_id).await;
            on_report(&report);
            reports.push(report);
        }
        let valid = reports.iter().filter(|r| r.is_valid()).count();
        info!(valid, total = reports.len(), "validation run finished");
        reports
    }

    async fn validate(&self, problem_id: i64) -> ValidationReport {
        let status = match self.service.solve_and_validate(problem_id).await {
            Ok(response) => status_of(&response),
            Err(err) => {
                warn!(problem_id, error = %err, "solve-and-validate request failed");
                ValidationStatus::Error(err.to_string())
            }
        };
        ValidationReport { problem_id, status }
    }
}

fn status_of(response: &Value) -> ValidationStatus {
    match response.pointer("/result/val_status") {
        Some(Value::String(status)) if status == "valid" => ValidationStatus::Valid,
        Some(Value::String(status)) => ValidationStatus::Failed(status.clone()),
        Some(other) => ValidationStatus::Failed(other.to_string()),
        None => ValidationStatus::Failed("missing val_status".to_string()),
    }
}

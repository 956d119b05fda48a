use serde::Serialize;

/// Problem ids exercised by a default validation run, one per domain.
pub const DEFAULT_VALIDATION_PROBLEMS: [i64; 10] =
    [8, 2352, 1809, 2703, 1116, 4399, 211, 4436, 818, 2487];

/// Result of solving and validating one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub problem_id: i64,
    pub status: ValidationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    /// The validator rejected the plan; carries the reported status.
    Failed(String),
    /// The request itself failed.
    Error(String),
}

impl ValidationReport {
    pub const fn is_valid(&self) -> bool {
        matches!(self.status, ValidationStatus::Valid)
    }

    pub fn summary(&self) -> String {
        match &self.status {
            ValidationStatus::Valid => "Ok!".to_string(),
            ValidationStatus::Failed(status) => format!("Failed: {status}"),
            ValidationStatus::Error(message) => format!("Error: {message}"),
        }
    }
}

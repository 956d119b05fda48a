//! Domain errors for the PaaS client.

use thiserror::Error;

/// Failure talking to a remote HTTP service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The service answered with a non-success status code.
    #[error("Request to {url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("Could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ServiceError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                url
            }
        }
    }
}

/// Errors raised by the solve workflow.
///
/// A service-reported solve error and a poll timeout are outcomes, not
/// errors; see [`SolveOutcome`](crate::domain::models::SolveOutcome).
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Submission failed: {0}")]
    Submission(#[source] ServiceError),

    #[error("Submit response from {url} did not contain a task handle")]
    MissingTaskHandle { url: String },

    #[error("Error: Malformed URL? {url}")]
    PollTransport {
        url: String,
        #[source]
        source: ServiceError,
    },

    #[error("Task {0} is already being polled")]
    AlreadyPolling(String),

    #[error("Package listing failed: {0}")]
    Catalog(#[source] ServiceError),

    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    #[error("Invalid value '{value}' for parameter '{name}', expected one of: {expected}")]
    InvalidParameter {
        name: String,
        value: String,
        expected: String,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Solve task aborted: {0}")]
    Aborted(String),
}

/// Errors reading planning documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read document {id}: {reason}")]
    Read { id: String, reason: String },

    #[error("Need a domain and a problem document, got: {0}")]
    IncompleteSelection(String),
}

/// Errors persisting user settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed settings file {path}: {reason}")]
    Format { path: String, reason: String },
}

//! PaaS client - submit-and-poll client for Planning-as-a-Service solvers
//!
//! A solve request (domain and problem documents plus solver parameters) is
//! submitted to a solver package, the returned task is polled at a fixed
//! interval for a bounded number of attempts, and the resulting plans or
//! diagnostics are handed to a renderer.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): The solve workflow and its helpers
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, config, logging, files
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use paas_client::infrastructure::{PaasClient, PaasClientConfig};
//! use paas_client::services::SolveAdapter;
//!
//! let client = Arc::new(PaasClient::with_config(PaasClientConfig::default())?);
//! let adapter = SolveAdapter::new(client);
//! let outcome = adapter
//!     .run("lama-first", request, &notifier, &renderer, &CancellationToken::new())
//!     .await?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DocumentError, ServiceError, SettingsError, SolveError};
pub use domain::models::{
    Config, Plan, PollAttempt, ResultView, SolveOutcome, SolveRequest, SolveResult, TaskHandle,
};
pub use domain::ports::{Notifier, ResultRenderer, SolverService};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{PollMachine, SolveAdapter, SolveHandle};

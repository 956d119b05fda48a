//! Infrastructure layer module
//!
//! Adapters that satisfy the domain ports:
//! - PaaS solver HTTP client
//! - planning.domains collection client
//! - Filesystem document source and settings store
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod documents;
pub mod http;
pub mod logging;
pub mod paas;
pub mod planning_domains;
pub mod settings;

pub use documents::FileDocumentSource;
pub use paas::{PaasClient, PaasClientConfig};
pub use planning_domains::PlanningDomainsClient;
pub use settings::FileSettingsStore;

//! Domain layer for the PaaS client
//!
//! Models of the solve protocol, the port traits that infrastructure
//! adapters implement, and the error taxonomy.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DocumentError, ServiceError, SettingsError, SolveError};

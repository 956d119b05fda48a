pub mod client;

pub use client::{PaasClient, PaasClientConfig};

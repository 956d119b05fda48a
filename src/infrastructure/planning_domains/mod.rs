pub mod client;

pub use client::PlanningDomainsClient;

//! Port trait definitions (Hexagonal Architecture)
//!
//! Interfaces the solve workflow depends on:
//! - SolverService: the remote planning service
//! - CollectionCatalog: the public domain/problem collection
//! - DocumentSource: where domain/problem text comes from
//! - Notifier / ResultRenderer: user-facing output
//! - SettingsStore: persisted user settings

pub mod collection_catalog;
pub mod document_source;
pub mod notifier;
pub mod renderer;
pub mod settings_store;
pub mod solver_service;

pub use collection_catalog::CollectionCatalog;
pub use document_source::DocumentSource;
pub use notifier::Notifier;
pub use renderer::ResultRenderer;
pub use settings_store::SettingsStore;
pub use solver_service::SolverService;

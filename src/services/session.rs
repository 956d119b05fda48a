//! Per-user solve context.

use tracing::debug;

use crate::domain::errors::SettingsError;
use crate::domain::models::{PackageIndex, PluginSettings};
use crate::domain::ports::SettingsStore;

/// State carried between solves: the service URL, the package schema last
/// fetched from it and the documents used last time.
#[derive(Debug, Clone, Default)]
pub struct SolveSession {
    base_url: String,
    packages: Option<PackageIndex>,
    last_domain: Option<String>,
    last_problem: Option<String>,
}

impl SolveSession {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the session at another service; drops the cached packages.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        let base_url = base_url.into();
        if base_url != self.base_url {
            self.packages = None;
        }
        self.base_url = base_url;
    }

    pub const fn packages(&self) -> Option<&PackageIndex> {
        self.packages.as_ref()
    }

    pub fn set_packages(&mut self, packages: PackageIndex) {
        self.packages = Some(packages);
    }

    pub fn remember_selection(&mut self, domain: impl Into<String>, problem: impl Into<String>) {
        self.last_domain = Some(domain.into());
        self.last_problem = Some(problem.into());
    }

    pub fn last_domain(&self) -> Option<&str> {
        self.last_domain.as_deref()
    }

    pub fn last_problem(&self) -> Option<&str> {
        self.last_problem.as_deref()
    }

    /// Settings worth persisting.
    pub fn save(&self) -> PluginSettings {
        PluginSettings::new(self.base_url.clone())
    }

    /// Apply persisted settings. Only the base URL is restored.
    pub fn load(&mut self, settings: &PluginSettings) {
        self.set_base_url(settings.base_url.clone());
    }

    /// Load settings from `store` if any were saved. Returns whether they were.
    pub async fn restore(&mut self, store: &dyn SettingsStore) -> Result<bool, SettingsError> {
        match store.load().await? {
            Some(settings) => {
                debug!(base_url = %settings.base_url, "restored saved settings");
                self.load(&settings);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn persist(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        store.save(&self.save()).await
    }
}

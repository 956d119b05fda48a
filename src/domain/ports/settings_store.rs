use async_trait::async_trait;

use crate::domain::errors::SettingsError;
use crate::domain::models::PluginSettings;

/// Persistence for [`PluginSettings`] between sessions.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn save(&self, settings: &PluginSettings) -> Result<(), SettingsError>;

    /// Previously saved settings, or `None` when nothing was saved yet.
    async fn load(&self) -> Result<Option<PluginSettings>, SettingsError>;
}

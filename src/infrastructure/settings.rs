//! JSON file persistence for user settings.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::SettingsError;
use crate::domain::models::PluginSettings;
use crate::domain::ports::SettingsStore;

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, err: &std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }

    fn format_error(&self, err: &serde_json::Error) -> SettingsError {
        SettingsError::Format {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn save(&self, settings: &PluginSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error(&err))?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|err| self.format_error(&err))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|err| self.io_error(&err))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<PluginSettings>, SettingsError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(&err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| self.format_error(&err))
    }
}

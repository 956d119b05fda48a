//! CLI command implementations.

pub mod browse;
pub mod packages;
pub mod settings;
pub mod solve;
pub mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::models::Config;
use crate::infrastructure::{FileSettingsStore, PaasClient, PaasClientConfig};
use crate::services::SolveSession;

/// Everything a command needs: configuration, the session with the resolved
/// base URL, and the settings store it was restored from.
pub struct CommandContext {
    pub config: Config,
    pub session: SolveSession,
    pub settings: FileSettingsStore,
}

impl CommandContext {
    /// Resolve the base URL: `--base-url` flag, then saved settings, then
    /// configuration.
    pub async fn new(config: Config, base_url_flag: Option<&str>) -> Self {
        let settings = FileSettingsStore::new(config.settings_path.clone());
        let mut session = SolveSession::new(config.service.base_url.clone());

        match session.restore(&settings).await {
            Ok(true) => debug!(base_url = %session.base_url(), "using saved base URL"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "ignoring unreadable settings file"),
        }
        if let Some(flag) = base_url_flag {
            session.set_base_url(flag);
        }

        Self {
            config,
            session,
            settings,
        }
    }

    /// HTTP client for the session's solver service.
    pub fn solver(&self) -> Result<Arc<PaasClient>> {
        let client_config = PaasClientConfig::from_service(&self.config.service)
            .with_base_url(self.session.base_url());
        let client = PaasClient::with_config(client_config)
            .with_context(|| format!("Failed to create client for {}", self.session.base_url()))?;
        Ok(Arc::new(client))
    }
}

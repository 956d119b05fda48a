use serde::{Deserialize, Serialize};

/// User settings that survive between sessions.
///
/// Only the service base URL is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(alias = "PASURL")]
    pub base_url: String,
}

impl PluginSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the PaaS client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Solver service connection
    #[serde(default)]
    pub service: ServiceConfig,

    /// Status polling behaviour
    #[serde(default)]
    pub poll: PollConfig,

    /// Public domain/problem collection API
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where persisted user settings live
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from(".paas/settings.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            poll: PollConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
            settings_path: default_settings_path(),
        }
    }
}

/// Solver service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceConfig {
    /// Base URL of the planning service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Package used when none is named on the command line
    #[serde(default = "default_package")]
    pub default_package: String,

    /// Adaptor the service should apply to results
    #[serde(default = "default_adaptor")]
    pub adaptor: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_package() -> String {
    "lama-first".to_string()
}

fn default_adaptor() -> String {
    crate::domain::models::solve::DEFAULT_ADAPTOR.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_package: default_package(),
            adaptor: default_adaptor(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollConfig {
    /// Fixed delay before every status check, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Status checks allowed before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

const fn default_interval_ms() -> u64 {
    5_000
}

const fn default_max_attempts() -> u32 {
    5
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Collection API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_url")]
    pub api_url: String,
}

fn default_catalog_url() -> String {
    "https://api.planning.domains/json/classical/".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: default_catalog_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files (None logs to stderr only)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project-local configuration.
pub const CONFIG_DIR: &str = ".paas";

/// Prefix of environment variable overrides, e.g. `PAAS_POLL__MAX_ATTEMPTS`.
pub const ENV_PREFIX: &str = "PAAS_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Service base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid base URL: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid catalog URL: {0}. Must start with http:// or https://")]
    InvalidCatalogUrl(String),

    #[error("Default package cannot be empty")]
    EmptyDefaultPackage,

    #[error("Invalid max_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    #[error("Invalid poll interval: {0}ms. Must be positive")]
    InvalidInterval(u64),

    #[error("Invalid request timeout: {0}s. Must be positive")]
    InvalidRequestTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .paas/config.yaml (project config)
    /// 3. .paas/local.yaml (local overrides, optional)
    /// 4. Environment variables (PAAS_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same layering as [`load`](Self::load) with the YAML files read from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.service.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !is_http_url(base_url) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        if !is_http_url(&config.catalog.api_url) {
            return Err(ConfigError::InvalidCatalogUrl(config.catalog.api_url.clone()));
        }

        if config.service.default_package.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultPackage);
        }

        if config.service.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(0));
        }

        if config.poll.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(0));
        }

        if config.poll.interval_ms == 0 {
            return Err(ConfigError::InvalidInterval(0));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

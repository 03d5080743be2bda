//! Configuration management for the Anime Explorer services.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream metadata provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Explorer client settings
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

/// Upstream (Jikan API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent sent upstream
    pub user_agent: String,

    /// Throttle applied before detail and picture requests
    #[serde(default)]
    pub throttle: ThrottlePolicy,
}

/// Throttle strategy for upstream calls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ThrottlePolicy {
    /// Never wait
    Disabled,

    /// Sleep a fixed amount before every call
    FixedDelay { delay_ms: u64 },

    /// Shared token bucket: `capacity` calls in a burst, refilled continuously
    TokenBucket { capacity: u32, refill_per_second: f64 },
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Explorer client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base URL of the gateway API, including the `/api` prefix
    pub gateway_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            timeout_seconds: 30,
            user_agent: "anime-explorer-gateway/0.1.0".to_string(),
            throttle: ThrottlePolicy::default(),
        }
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        // Jikan allows 3 req/s and 60 req/min
        ThrottlePolicy::TokenBucket {
            capacity: 3,
            refill_per_second: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:3001/api".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl UpstreamConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ExplorerConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Parse the configured default log level
    pub fn log_level(&self) -> Result<Level> {
        self.logging
            .default_level
            .parse::<Level>()
            .with_context(|| format!("Invalid log level: {}", self.logging.default_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.upstream.base_url, "https://api.jikan.moe/v4");
        assert_eq!(config.upstream.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.upstream.throttle,
            ThrottlePolicy::TokenBucket {
                capacity: 3,
                refill_per_second: 1.0
            }
        );
        assert_eq!(config.explorer.gateway_url, "http://localhost:3001/api");
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut saved_config = Config::default();
        saved_config.server.port = 4000;
        saved_config.upstream.throttle = ThrottlePolicy::FixedDelay { delay_ms: 500 };
        saved_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.server.port, 4000);
        assert_eq!(
            loaded_config.upstream.throttle,
            ThrottlePolicy::FixedDelay { delay_ms: 500 }
        );
        assert_eq!(
            loaded_config.upstream.base_url,
            saved_config.upstream.base_url
        );

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_partial_config_uses_section_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            [upstream]
            base_url = "http://127.0.0.1:9000/v4"
            timeout_seconds = 5
            user_agent = "test"

            [upstream.throttle]
            strategy = "disabled"
            "#,
        )?;

        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000/v4");
        assert_eq!(config.upstream.throttle, ThrottlePolicy::Disabled);
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.logging.default_level, "info");
        Ok(())
    }

    #[test]
    fn test_explorer_timeout_defaults_when_omitted() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            [explorer]
            gateway_url = "http://10.0.0.2:3001/api"
            "#,
        )?;
        assert_eq!(config.explorer.gateway_url, "http://10.0.0.2:3001/api");
        assert_eq!(config.explorer.timeout(), Duration::from_secs(60));

        let config: Config = toml::from_str(
            r#"
            [explorer]
            timeout_seconds = 5
            "#,
        )?;
        assert_eq!(config.explorer.gateway_url, "http://localhost:3001/api");
        assert_eq!(config.explorer.timeout(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = Config::default();
        assert_eq!(config.log_level().unwrap(), Level::INFO);

        config.logging.default_level = "loud".to_string();
        assert!(config.log_level().is_err());
    }
}

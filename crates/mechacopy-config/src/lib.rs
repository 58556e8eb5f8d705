//! Configuration management for mechacopy
//!
//! Configuration is layered: built-in defaults, then an optional YAML, TOML
//! or JSON file, then `MECHACOPY__*` environment variables. The result is
//! validated once and handed to the engine as an immutable value.
//!
//! # Features
//!
//! - **Multiple formats**: YAML, TOML and JSON files
//! - **Validation**: worker counts, glob patterns and log levels are checked up front
//! - **Environment overrides**: `MECHACOPY__RETRY__MAX_ROUNDS=3` and friends
//! - **Defaults**: every field has a default, so an empty file is valid
//!
//! # Examples
//!
//! ```rust,no_run
//! use mechacopy_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_source_file("mechacopy.yaml")
//!     .add_env_prefix("MECHACOPY")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! println!("Workers: {}", config.workers.worker_count);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use mechacopy_types::{EnumerationLimits, RetryPolicy, WorkerCount};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MECHACOPY";

/// Accepted values for `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for mechacopy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker pool sizing
    pub workers: WorkersConfig,
    /// Retry behaviour after the initial pass
    pub retry: RetryPolicy,
    /// File-name filtering
    pub filter: FilterConfig,
    /// Directory walk limits
    pub enumeration: EnumerationLimits,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Worker pool sizing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
    /// Workers in the initial pass
    pub worker_count: WorkerCount,
    /// Workers in retry rounds, same as `worker_count` when unset
    pub retry_worker_count: Option<WorkerCount>,
}

/// File-name filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Glob patterns a file name must match to be copied
    pub patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*".to_string()],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(ConfigBuilder::validate(&config).is_ok());
        assert_eq!(config.enumeration.max_concurrent_listings, 16);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_patterns_fail_validation() {
        let mut config = Config::default();
        config.filter.patterns.clear();
        assert!(matches!(
            ConfigBuilder::validate(&config),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("retry:\n  delay_secs: 0\n").unwrap();
        assert_eq!(config.retry.delay_secs, 0);
        assert_eq!(config.retry.max_rounds, 10);
        assert_eq!(config.workers.worker_count.get(), 10);
    }
}

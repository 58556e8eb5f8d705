//! Configuration builder for layered configuration loading

use crate::{Config, ConfigError, ConfigResult, LOG_LEVELS};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use mechacopy_io::PatternMatcher;
use std::path::{Path, PathBuf};

/// Separator between nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

/// Configuration builder for loading configuration from multiple sources
///
/// Sources are applied in the order they were added, on top of
/// [`Config::default`]. Missing files are ignored.
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ConfigSource>,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File { path: PathBuf, format: FileFormat },
    Environment { prefix: String },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
        }
    }

    /// Add a configuration file source, format taken from the extension
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File { path, format });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ConfigSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Build and validate the configuration
    pub fn build(mut self) -> ConfigResult<Config> {
        let defaults = serde_yaml::to_value(Config::default())
            .map_err(|e| ConfigError::other(format!("Failed to serialize defaults: {}", e)))?;
        self.inner = self.inner.add_source(config::Config::try_from(&defaults)?);

        for source in &self.sources {
            match source {
                ConfigSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ConfigSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix)
                            .separator(ENV_SEPARATOR)
                            .try_parsing(true)
                            .list_separator(",")
                            .with_list_parse_key("filter.patterns"),
                    );
                }
            }
        }

        let result: Config = self.inner.build()?.try_deserialize()?;
        Self::validate(&result)?;
        Ok(result)
    }

    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }

    /// Validate a configuration value
    pub fn validate(config: &Config) -> ConfigResult<()> {
        if config.enumeration.max_concurrent_listings == 0 {
            return Err(ConfigError::validation(
                "Concurrent listing limit must be greater than 0",
            ));
        }

        if config.filter.patterns.is_empty() {
            return Err(ConfigError::validation(
                "At least one file pattern is required",
            ));
        }
        PatternMatcher::new(&config.filter.patterns)
            .map_err(|e| ConfigError::invalid_value("filter.patterns", e.to_string()))?;

        if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::validation(
                "Log level must be one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.workers.worker_count.get(), 10);
        assert!(config.workers.retry_worker_count.is_none());
        assert!(config.retry.enabled);
        assert_eq!(config.retry.max_rounds, 10);
        assert_eq!(config.retry.delay_secs, 10);
        assert_eq!(config.filter.patterns, vec!["*".to_string()]);
    }

    #[test]
    fn test_builder_yaml_file() {
        let file = yaml_file(
            r#"
workers:
  worker_count: 4
  retry_worker_count: 1
retry:
  max_rounds: 2
filter:
  patterns: ["*.txt", "*.csv"]
"#,
        );

        let config = ConfigBuilder::new()
            .add_source_file(file.path())
            .build()
            .unwrap();

        assert_eq!(config.workers.worker_count.get(), 4);
        assert_eq!(config.workers.retry_worker_count.map(|c| c.get()), Some(1));
        assert_eq!(config.retry.max_rounds, 2);
        assert_eq!(config.retry.delay_secs, 10);
        assert_eq!(config.filter.patterns, vec!["*.txt", "*.csv"]);
    }

    #[test]
    fn test_builder_toml_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[retry]\nenabled = false\n\n[logging]\nlevel = \"debug\"").unwrap();

        let config = ConfigBuilder::new()
            .add_source_file(file.path())
            .build()
            .unwrap();

        assert!(!config.retry.enabled);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let config = ConfigBuilder::new()
            .add_source_file("/definitely/not/here/mechacopy.yaml")
            .build()
            .unwrap();
        assert_eq!(config.workers.worker_count.get(), 10);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let file = yaml_file("workers:\n  worker_count: 0\n");

        let result = ConfigBuilder::new().add_source_file(file.path()).build();

        assert!(result.unwrap_err().to_string().contains("below minimum"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let file = yaml_file("filter:\n  patterns: [\"[oops\"]\n");

        let error = ConfigBuilder::new()
            .add_source_file(file.path())
            .build()
            .unwrap_err();

        assert!(matches!(error, ConfigError::InvalidValue { ref key, .. } if key == "filter.patterns"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let file = yaml_file("logging:\n  level: loud\n");

        let result = ConfigBuilder::new().add_source_file(file.path()).build();

        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = yaml_file("retry:\n  max_rounds: 2\n");
        std::env::set_var("MECHACOPYBUILDERTEST__RETRY__MAX_ROUNDS", "7");

        let config = ConfigBuilder::new()
            .add_source_file(file.path())
            .add_env_prefix("MECHACOPYBUILDERTEST")
            .build()
            .unwrap();

        std::env::remove_var("MECHACOPYBUILDERTEST__RETRY__MAX_ROUNDS");
        assert_eq!(config.retry.max_rounds, 7);
    }
}

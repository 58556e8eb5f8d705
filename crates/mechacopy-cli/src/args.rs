//! Command-line arguments shared by both binaries

use anyhow::{Context, Result};
use clap::{Args, Parser};
use mechacopy_config::{Config, ConfigBuilder, ConfigLoader};
use mechacopy_types::WorkerCount;
use std::path::PathBuf;

/// Options common to `mechacopy` and `mechadel`
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable trace-level logging
    #[arg(short, long)]
    pub debug: bool,

    /// Quiet mode - no banner, no progress bar, errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode - debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker tasks (default 10)
    #[arg(short = 'm', long = "mt", value_name = "N")]
    pub worker_count: Option<usize>,

    /// Number of retry rounds for failed items (default 10)
    #[arg(short = 'r', long = "retries", value_name = "N")]
    pub retries: Option<u32>,

    /// Seconds to wait before each retry round (default 10)
    #[arg(short = 'w', long = "wait", value_name = "SECS")]
    pub wait: Option<u64>,

    /// Number of worker tasks in retry rounds (default: same as --mt)
    #[arg(long = "retry-workers", value_name = "N")]
    pub retry_workers: Option<usize>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file instead of the terminal
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CommonArgs {
    /// Load configuration from `--config` or the default locations, then apply flag overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => ConfigLoader::load_default().context("failed to load configuration")?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Override configuration values with whatever flags were given
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(count) = self.worker_count {
            config.workers.worker_count = WorkerCount::new(count).map_err(anyhow::Error::msg)?;
        }
        if let Some(count) = self.retry_workers {
            config.workers.retry_worker_count =
                Some(WorkerCount::new(count).map_err(anyhow::Error::msg)?);
        }
        if let Some(rounds) = self.retries {
            config.retry.max_rounds = rounds;
        }
        if let Some(secs) = self.wait {
            config.retry.delay_secs = secs;
        }
        if self.log_file.is_some() {
            config.logging.log_file.clone_from(&self.log_file);
        }
        if self.log_json {
            config.logging.json_format = true;
        }
        ConfigBuilder::validate(config).context("invalid configuration")?;
        Ok(())
    }
}

/// mechacopy - copy a directory tree with parallel workers and automatic retries
#[derive(Parser, Debug)]
#[command(
    name = "mechacopy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a directory tree with parallel workers and automatic retries",
    long_about = "mechacopy mirrors the files of SOURCE into DESTINATION.\n\
                  Each directory is one unit of work for a fixed pool of workers;\n\
                  files that fail are retried individually after a delay."
)]
pub struct CopyCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// File-name patterns to copy (names or wildcards, default "*")
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}

impl CopyCli {
    /// Configuration with the positional patterns applied
    pub fn load_config(&self) -> Result<Config> {
        let mut config = self.common.load_config()?;
        if !self.patterns.is_empty() {
            config.filter.patterns.clone_from(&self.patterns);
            ConfigBuilder::validate(&config).context("invalid file pattern")?;
        }
        Ok(config)
    }
}

/// mechadel - delete a directory tree with parallel workers
#[derive(Parser, Debug)]
#[command(
    name = "mechadel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Delete a directory tree with parallel workers"
)]
pub struct DeleteCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to delete
    pub target: PathBuf,
}

impl DeleteCli {
    /// Configuration with retries switched off
    pub fn load_config(&self) -> Result<Config> {
        let mut config = self.common.load_config()?;
        config.retry.enabled = false;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_cli_positional_patterns() {
        let cli = CopyCli::try_parse_from([
            "mechacopy", "-m", "4", "-r", "2", "-w", "0", "src", "dst", "*.txt", "*.csv",
        ])
        .unwrap();

        assert_eq!(cli.common.worker_count, Some(4));
        assert_eq!(cli.common.retries, Some(2));
        assert_eq!(cli.common.wait, Some(0));
        assert_eq!(cli.source, PathBuf::from("src"));
        assert_eq!(cli.destination, PathBuf::from("dst"));
        assert_eq!(cli.patterns, vec!["*.txt", "*.csv"]);
    }

    #[test]
    fn test_copy_cli_requires_destination() {
        assert!(CopyCli::try_parse_from(["mechacopy", "src"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = CommonArgs {
            worker_count: Some(3),
            retry_workers: Some(1),
            retries: Some(5),
            wait: Some(0),
            ..CommonArgs::default()
        };
        let mut config = Config::default();

        args.apply_overrides(&mut config).unwrap();

        assert_eq!(config.workers.worker_count.get(), 3);
        assert_eq!(config.workers.retry_worker_count.map(WorkerCount::get), Some(1));
        assert_eq!(config.retry.max_rounds, 5);
        assert_eq!(config.retry.delay_secs, 0);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let args = CommonArgs {
            worker_count: Some(0),
            ..CommonArgs::default()
        };
        assert!(args.apply_overrides(&mut Config::default()).is_err());
    }

    #[test]
    fn test_delete_cli_disables_retries() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mechacopy.yaml");
        ConfigLoader::generate_default_config(&config_path).unwrap();

        let config_arg = config_path.to_str().unwrap();

        let cli = DeleteCli::try_parse_from(["mechadel", "-c", config_arg, "target"]).unwrap();
        let config = cli.load_config().unwrap();

        assert!(!config.retry.enabled);
        assert_eq!(cli.target, PathBuf::from("target"));
    }
}

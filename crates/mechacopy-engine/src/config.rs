//! Per-run engine configuration

use mechacopy_config::Config;
use mechacopy_types::{EnumerationLimits, RetryPolicy, WorkerCount};
use std::time::Duration;

/// Immutable settings for one orchestration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// Workers in the initial pass
    pub worker_count: WorkerCount,
    /// Workers in retry rounds; `None` reuses `worker_count`
    pub retry_worker_count: Option<WorkerCount>,
    /// Retry rounds, delay and on/off switch
    pub retry: RetryPolicy,
    /// File-name globs for the copy action
    pub patterns: Vec<String>,
    /// Limits on the concurrent directory walk
    pub enumeration: EnumerationLimits,
}

impl JobConfig {
    /// Create a job config from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            worker_count: config.workers.worker_count,
            retry_worker_count: config.workers.retry_worker_count,
            retry: config.retry.clone(),
            patterns: config.filter.patterns.clone(),
            enumeration: config.enumeration,
        }
    }

    /// Override the initial pass worker count
    pub fn with_worker_count(mut self, count: WorkerCount) -> Self {
        self.worker_count = count;
        self
    }

    /// Override the retry round worker count
    pub fn with_retry_worker_count(mut self, count: WorkerCount) -> Self {
        self.retry_worker_count = Some(count);
        self
    }

    /// Override the maximum number of retry rounds
    pub fn with_max_retry_rounds(mut self, rounds: u32) -> Self {
        self.retry.max_rounds = rounds;
        self
    }

    /// Override the delay before each retry round
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry.delay_secs = delay.as_secs();
        self
    }

    /// Turn retries on or off
    pub fn with_retry_enabled(mut self, enabled: bool) -> Self {
        self.retry.enabled = enabled;
        self
    }

    /// Replace the file-name patterns
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Override the walk limits
    pub fn with_enumeration(mut self, limits: EnumerationLimits) -> Self {
        self.enumeration = limits;
        self
    }

    /// Workers used by retry rounds
    pub fn retry_workers(&self) -> WorkerCount {
        self.retry_worker_count.unwrap_or(self.worker_count)
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

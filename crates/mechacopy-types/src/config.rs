//! Configuration types for mechacopy
//!
//! Validated newtypes and small policy structs shared by the configuration
//! loader, the engine and the CLI.

use std::time::Duration;

/// Number of worker routines in a round's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct WorkerCount(usize);

impl WorkerCount {
    /// Minimum worker count
    pub const MIN: usize = 1;
    /// Maximum worker count
    pub const MAX: usize = 1024;
    /// Default worker count
    pub const DEFAULT: usize = 10;

    /// Create a new worker count with validation
    pub fn new(count: usize) -> Result<Self, String> {
        if count < Self::MIN {
            Err(format!("Worker count {} is below minimum {}", count, Self::MIN))
        } else if count > Self::MAX {
            Err(format!("Worker count {} exceeds maximum {}", count, Self::MAX))
        } else {
            Ok(Self(count))
        }
    }

    /// Get the worker count value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for WorkerCount {
    type Error = String;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<WorkerCount> for usize {
    fn from(count: WorkerCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounded retry policy applied after the initial pass
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    /// Whether failed items are re-driven at all
    pub enabled: bool,
    /// Maximum number of retry rounds
    pub max_rounds: u32,
    /// Seconds to wait before each retry round
    pub delay_secs: u64,
}

impl RetryPolicy {
    /// Default number of retry rounds
    pub const DEFAULT_MAX_ROUNDS: u32 = 10;
    /// Default delay between rounds, in seconds
    pub const DEFAULT_DELAY_SECS: u64 = 10;

    /// A policy that never retries
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Delay to sleep before each retry round
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Number of rounds the controller may run, zero when disabled
    pub fn effective_rounds(&self) -> u32 {
        if self.enabled {
            self.max_rounds
        } else {
            0
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            delay_secs: Self::DEFAULT_DELAY_SECS,
        }
    }
}

/// Limits on the concurrent directory walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnumerationLimits {
    /// Directories listed at the same time across the whole walk
    pub max_concurrent_listings: usize,
    /// Depth below which subtrees are walked inline instead of in new tasks
    pub parallel_depth: usize,
}

impl EnumerationLimits {
    /// Default number of concurrent listings
    pub const DEFAULT_CONCURRENT_LISTINGS: usize = 16;
    /// Default parallel depth
    pub const DEFAULT_PARALLEL_DEPTH: usize = 8;

    /// Create limits with validation
    pub fn new(max_concurrent_listings: usize, parallel_depth: usize) -> Result<Self, String> {
        if max_concurrent_listings == 0 {
            return Err("Concurrent listing limit must be at least 1".to_string());
        }
        Ok(Self {
            max_concurrent_listings,
            parallel_depth,
        })
    }
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_concurrent_listings: Self::DEFAULT_CONCURRENT_LISTINGS,
            parallel_depth: Self::DEFAULT_PARALLEL_DEPTH,
        }
    }
}

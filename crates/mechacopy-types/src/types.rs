//! Core data types for mechacopy

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which kind of round the worker pool is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundKind {
    /// The initial pass over every enumerated directory
    Pass,
    /// A retry round over individually failed items
    Retry {
        /// 1-based retry round number
        round: u32,
    },
}

impl RoundKind {
    /// Check if this is a retry round
    pub fn is_retry(self) -> bool {
        matches!(self, Self::Retry { .. })
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Retry { round } => write!(f, "retry #{}", round),
        }
    }
}

/// Point-in-time view of a round's directory-level counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundProgress {
    /// Round being reported
    pub kind: RoundKind,
    /// Items dispatched into the round
    pub total: u64,
    /// Items whose action succeeded
    pub succeeded: u64,
    /// Items whose action failed
    pub failed: u64,
}

impl RoundProgress {
    /// Items accounted for so far
    pub fn completed(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Whole-number completion percentage
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            100
        } else {
            self.completed() * 100 / self.total
        }
    }

    /// Check if every dispatched item has been accounted for
    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

impl fmt::Display for RoundProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:3}%] {}/{}({})",
            self.percent(),
            self.completed(),
            self.total,
            self.failed
        )
    }
}

/// Outcome of one orchestration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobSummary {
    /// Directories discovered and dispatched in the initial pass
    pub directories: u64,
    /// Files copied successfully, including recoveries in retry rounds
    pub success_count: u64,
    /// Files skipped because they did not match or were up to date
    pub skip_count: u64,
    /// Unrecovered item failures plus unreadable directories
    pub error_count: u64,
    /// Items still failing after the retry budget was spent
    pub error_items: Vec<PathBuf>,
    /// Directories that could not be listed
    pub failed_directories: Vec<PathBuf>,
    /// Retry rounds actually run
    pub retry_rounds: u32,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl JobSummary {
    /// Files and directories accounted for in the report
    pub fn total(&self) -> u64 {
        self.success_count + self.skip_count + self.error_count
    }

    /// Check if the run finished without unrecovered errors
    pub fn is_clean(&self) -> bool {
        self.error_count == 0
    }
}

//! JSON output format for machine-readable results

use chrono::{DateTime, Utc};
use mechacopy_types::JobSummary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete result of one run
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// What ran and where
    pub metadata: OperationMetadata,
    /// Outcome counters and failures
    pub summary: JsonSummary,
    /// Process exit code the run ends with
    pub exit_code: u8,
}

/// Operation metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// mechacopy version
    pub version: String,
    /// "copy" or "delete"
    pub operation: String,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
    /// Tree the action ran over
    pub source_path: PathBuf,
    /// Copy destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<PathBuf>,
}

/// Outcome counters
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Directories enumerated
    pub directories: u64,
    /// success + skip + error
    pub total: u64,
    /// Files copied
    pub success: u64,
    /// Files skipped
    pub skip: u64,
    /// Items and directories that never succeeded
    pub error: u64,
    /// Retry rounds run
    pub retry_rounds: u32,
    /// Wall time in seconds
    pub elapsed_seconds: f64,
    /// Items still failing
    pub error_items: Vec<PathBuf>,
    /// Directories that could not be processed
    pub failed_directories: Vec<PathBuf>,
}

impl JsonReport {
    /// Build a report for a finished run
    pub fn new(
        operation: &str,
        source: &Path,
        destination: Option<&Path>,
        summary: &JobSummary,
        exit_code: u8,
    ) -> Self {
        Self {
            metadata: OperationMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                operation: operation.to_string(),
                timestamp: Utc::now(),
                source_path: source.to_path_buf(),
                destination_path: destination.map(Path::to_path_buf),
            },
            summary: JsonSummary {
                directories: summary.directories,
                total: summary.total(),
                success: summary.success_count,
                skip: summary.skip_count,
                error: summary.error_count,
                retry_rounds: summary.retry_rounds,
                elapsed_seconds: summary.elapsed.as_secs_f64(),
                error_items: summary.error_items.clone(),
                failed_directories: summary.failed_directories.clone(),
            },
            exit_code,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Shared job status
//!
//! One [`JobStatus`] lives for a whole run and is shared by every worker of
//! every round. File-level counters accumulate across rounds; the
//! directory-level counters live in a [`RoundState`] that is replaced at the
//! start of each round. Counters are atomics, lists sit behind a mutex.

use mechacopy_io::PatternMatcher;
use mechacopy_types::{JobSummary, RoundKind, RoundProgress};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Directory-level outcome counters for a single round
#[derive(Debug)]
pub struct RoundState {
    kind: RoundKind,
    total: u64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl RoundState {
    fn new(kind: RoundKind, total: u64) -> Self {
        Self {
            kind,
            total,
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Which round these counters belong to
    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    /// Record a successful item and return the updated snapshot
    pub fn record_success(&self) -> RoundProgress {
        self.succeeded.fetch_add(1, Ordering::SeqCst);
        self.progress()
    }

    /// Record a failed item and return the updated snapshot
    pub fn record_failure(&self) -> RoundProgress {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.progress()
    }

    /// Current snapshot of the round
    pub fn progress(&self) -> RoundProgress {
        RoundProgress {
            kind: self.kind,
            total: self.total,
            succeeded: self.succeeded.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

/// Concurrency-safe aggregate of one run's outcomes
#[derive(Debug)]
pub struct JobStatus {
    patterns: PatternMatcher,
    success_files: AtomicU64,
    skip_files: AtomicU64,
    failed_items: Mutex<Vec<PathBuf>>,
    failed_directories: Mutex<Vec<PathBuf>>,
    round: RwLock<Arc<RoundState>>,
}

impl JobStatus {
    /// Create an empty status that filters files with `patterns`
    pub fn new(patterns: PatternMatcher) -> Self {
        Self {
            patterns,
            success_files: AtomicU64::new(0),
            skip_files: AtomicU64::new(0),
            failed_items: Mutex::new(Vec::new()),
            failed_directories: Mutex::new(Vec::new()),
            round: RwLock::new(Arc::new(RoundState::new(RoundKind::Pass, 0))),
        }
    }

    /// File-name filter for this run
    pub fn patterns(&self) -> &PatternMatcher {
        &self.patterns
    }

    /// Replace the round counters with fresh ones sized to `total`
    pub async fn begin_round(&self, kind: RoundKind, total: u64) -> Arc<RoundState> {
        let state = Arc::new(RoundState::new(kind, total));
        *self.round.write().await = Arc::clone(&state);
        state
    }

    /// Snapshot of the active round
    pub async fn round_progress(&self) -> RoundProgress {
        self.round.read().await.progress()
    }

    /// Count one file copied
    pub fn add_success_file(&self) {
        self.success_files.fetch_add(1, Ordering::SeqCst);
    }

    /// Count one file skipped
    pub fn add_skip_file(&self) {
        self.skip_files.fetch_add(1, Ordering::SeqCst);
    }

    /// Files copied so far
    pub fn success_files(&self) -> u64 {
        self.success_files.load(Ordering::SeqCst)
    }

    /// Files skipped so far
    pub fn skip_files(&self) -> u64 {
        self.skip_files.load(Ordering::SeqCst)
    }

    /// Remember an item for the next retry round
    pub async fn add_failed_item<P: AsRef<Path>>(&self, item: P) {
        self.failed_items.lock().await.push(item.as_ref().to_path_buf());
    }

    /// Remember a directory that could not be listed
    pub async fn add_failed_directory<P: AsRef<Path>>(&self, dir: P) {
        self.failed_directories
            .lock()
            .await
            .push(dir.as_ref().to_path_buf());
    }

    /// Number of items waiting for a retry
    pub async fn failed_item_count(&self) -> usize {
        self.failed_items.lock().await.len()
    }

    /// Move the failed items out, leaving an empty list behind
    pub async fn take_failed_items(&self) -> Vec<PathBuf> {
        std::mem::take(&mut *self.failed_items.lock().await)
    }

    /// Copy of the failed items in append order
    pub async fn failed_items(&self) -> Vec<PathBuf> {
        self.failed_items.lock().await.clone()
    }

    /// Copy of the unreadable directories in append order
    pub async fn failed_directories(&self) -> Vec<PathBuf> {
        self.failed_directories.lock().await.clone()
    }

    /// Build the run summary from the current state
    pub async fn summary(&self, directories: u64, retry_rounds: u32, elapsed: Duration) -> JobSummary {
        let error_items = self.failed_items().await;
        let failed_directories = self.failed_directories().await;
        JobSummary {
            directories,
            success_count: self.success_files(),
            skip_count: self.skip_files(),
            error_count: (error_items.len() + failed_directories.len()) as u64,
            error_items,
            failed_directories,
            retry_rounds,
            elapsed,
        }
    }
}

//! Job orchestration: enumerate, run the pass, retry, summarise

use crate::action::ActionProvider;
use crate::config::JobConfig;
use crate::enumerator::DirectoryEnumerator;
use crate::pool::{RoundContext, WorkerPool};
use crate::retry::RetryController;
use crate::status::JobStatus;
use mechacopy_io::PatternMatcher;
use mechacopy_types::{JobSummary, ProgressReporter, Result, RoundKind};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Drives one action over every directory under a root
pub struct JobOrchestrator {
    config: JobConfig,
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl std::fmt::Debug for JobOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobOrchestrator")
            .field("config", &self.config)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

impl JobOrchestrator {
    /// Create an orchestrator for `config`
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    /// Send round and completion progress to `reporter`
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Settings this orchestrator runs with
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run `action` over every directory under `root`
    ///
    /// Fails only when the patterns do not compile, `root` cannot be listed,
    /// or a round loses track of its workers. Item failures end up in the
    /// summary instead.
    pub async fn run<P: AsRef<Path>>(
        &self,
        root: P,
        action: Arc<dyn ActionProvider>,
    ) -> Result<JobSummary> {
        let root = root.as_ref();
        let span = info_span!("orchestration", run_id = %Uuid::new_v4(), action = action.name());
        self.run_inner(root, action).instrument(span).await
    }

    async fn run_inner(&self, root: &Path, action: Arc<dyn ActionProvider>) -> Result<JobSummary> {
        let started = Instant::now();
        let patterns = PatternMatcher::new(&self.config.patterns)?;

        let directories = DirectoryEnumerator::new(self.config.enumeration)
            .enumerate(root)
            .await?;
        let directory_count = directories.len() as u64;
        info!(root = %root.display(), directories = directory_count, "directories enumerated");

        let ctx = Arc::new(RoundContext {
            root: root.to_path_buf(),
            action,
            job: Arc::new(JobStatus::new(patterns)),
            reporter: self.reporter.clone(),
        });

        WorkerPool::new(self.config.worker_count)
            .run_round(RoundKind::Pass, directories, &ctx)
            .await?;

        let retry_rounds = if self.config.retry.enabled {
            RetryController::new(self.config.retry.clone(), self.config.retry_workers())
                .run(&ctx)
                .await?
        } else {
            0
        };

        let summary = ctx
            .job
            .summary(directory_count, retry_rounds, started.elapsed())
            .await;
        info!(
            success = summary.success_count,
            skip = summary.skip_count,
            errors = summary.error_count,
            retry_rounds,
            "all work finished"
        );
        if let Some(reporter) = &self.reporter {
            reporter.report_completion(&summary);
        }
        Ok(summary)
    }
}

/// Run `action` over `root` with `config` and no progress reporter
pub async fn run_orchestration<P: AsRef<Path>>(
    root: P,
    action: Arc<dyn ActionProvider>,
    config: &JobConfig,
) -> Result<JobSummary> {
    JobOrchestrator::new(config.clone()).run(root, action).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CopyAction, DeleteAction};
    use mechacopy_types::{Error, JobSummary, RoundProgress};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        rounds: AtomicU64,
        items: AtomicU64,
        completed: AtomicU64,
    }

    impl ProgressReporter for Recorder {
        fn round_started(&self, _kind: RoundKind, _total: u64) {
            self.rounds.fetch_add(1, Ordering::SeqCst);
        }

        fn item_finished(&self, _progress: &RoundProgress) {
            self.items.fetch_add(1, Ordering::SeqCst);
        }

        fn report_completion(&self, _summary: &JobSummary) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn source_tree() -> TempDir {
        let src = TempDir::new().unwrap();
        std::fs::create_dir_all(src.path().join("a/b")).unwrap();
        std::fs::write(src.path().join("a/file1.txt"), b"one").unwrap();
        std::fs::write(src.path().join("a/b/file2.txt"), b"two").unwrap();
        src
    }

    fn quick() -> JobConfig {
        JobConfig::default().with_retry_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_copy_run_reports_progress() {
        let src = source_tree();
        let dst = TempDir::new().unwrap();
        let recorder = Arc::new(Recorder::default());

        let summary = JobOrchestrator::new(quick())
            .with_reporter(recorder.clone())
            .run(src.path(), Arc::new(CopyAction::new(dst.path())))
            .await
            .unwrap();

        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.directories, 3);
        assert_eq!(summary.retry_rounds, 0);
        assert_eq!(recorder.rounds.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.items.load(Ordering::SeqCst), 3);
        assert_eq!(recorder.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let dst = TempDir::new().unwrap();

        let result = run_orchestration(
            dst.path().join("nope"),
            Arc::new(CopyAction::new(dst.path())),
            &quick(),
        )
        .await;

        assert!(matches!(result, Err(Error::DirectoryUnreadable { .. })));
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_fatal() {
        let src = source_tree();

        let result = run_orchestration(
            src.path(),
            Arc::new(DeleteAction::new()),
            &quick().with_patterns(["[broken"]),
        )
        .await;

        assert!(matches!(result, Err(Error::Pattern { .. })));
        assert!(src.path().join("a/b").exists());
    }

    #[tokio::test]
    async fn test_delete_run_removes_everything() {
        let holder = TempDir::new().unwrap();
        let target = holder.path().join("victim");
        std::fs::create_dir_all(target.join("x/y/z")).unwrap();
        std::fs::write(target.join("x/y/file.bin"), b"data").unwrap();

        let summary = run_orchestration(
            &target,
            Arc::new(DeleteAction::new()),
            &quick()
                .with_retry_enabled(false)
                .with_worker_count(mechacopy_types::WorkerCount::new(1).unwrap()),
        )
        .await
        .unwrap();

        assert!(!target.exists());
        assert!(summary.is_clean());
        assert_eq!(summary.failed_directories, Vec::<PathBuf>::new());
    }
}

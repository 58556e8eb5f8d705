//! Fixed-size worker pool fed by a rendezvous channel
//!
//! Every round gets its own channel and its own workers. The feeder's send
//! only completes when a worker is ready to take the item, which bounds
//! in-flight work to the pool size. Dropping the sender closes the channel;
//! workers see the closed channel on their next receive and exit, so no
//! worker outlives the round that spawned it.

use crate::action::ActionProvider;
use crate::status::{JobStatus, RoundState};
use mechacopy_types::{Error, ProgressReporter, Result, RoundKind, RoundProgress, WorkerCount};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Everything a round's workers share
pub struct RoundContext {
    /// Source root the items are relative to
    pub root: PathBuf,
    /// Action applied to each item
    pub action: Arc<dyn ActionProvider>,
    /// Shared run status
    pub job: Arc<JobStatus>,
    /// Optional progress sink
    pub reporter: Option<Arc<dyn ProgressReporter>>,
}

impl std::fmt::Debug for RoundContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundContext")
            .field("root", &self.root)
            .field("action", &self.action.name())
            .finish_non_exhaustive()
    }
}

/// A pool of `size` workers that runs one round at a time
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: WorkerCount,
}

impl WorkerPool {
    /// Create a pool with `size` workers per round
    pub fn new(size: WorkerCount) -> Self {
        Self { size }
    }

    /// Dispatch `items` to the workers and wait until every one is accounted for
    pub async fn run_round(
        &self,
        kind: RoundKind,
        items: Vec<PathBuf>,
        ctx: &Arc<RoundContext>,
    ) -> Result<RoundProgress> {
        let total = items.len() as u64;
        let round = ctx.job.begin_round(kind, total).await;
        if let Some(reporter) = &ctx.reporter {
            reporter.round_started(kind, total);
        }
        debug!(round = %kind, total, workers = self.size.get(), "starting worker pool");

        let (tx, rx) = flume::bounded::<PathBuf>(0);
        let mut workers = JoinSet::new();
        for id in 0..self.size.get() {
            workers.spawn(worker_loop(
                id,
                rx.clone(),
                Arc::clone(ctx),
                Arc::clone(&round),
            ));
        }
        drop(rx);

        let mut feed_error = None;
        for item in items {
            if let Err(e) = tx.send_async(item).await {
                feed_error = Some(Error::sync(format!("work channel closed early: {}", e)));
                break;
            }
        }
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                feed_error.get_or_insert_with(|| Error::sync(format!("worker task failed: {}", e)));
            }
        }
        if let Some(e) = feed_error {
            return Err(e);
        }

        let progress = round.progress();
        if progress.completed() != total {
            return Err(Error::sync(format!(
                "round accounted for {} of {} items",
                progress.completed(),
                total
            )));
        }
        debug!(round = %kind, succeeded = progress.succeeded, failed = progress.failed, "worker pool finished");
        Ok(progress)
    }
}

async fn worker_loop(
    id: usize,
    rx: flume::Receiver<PathBuf>,
    ctx: Arc<RoundContext>,
    round: Arc<RoundState>,
) {
    let kind = round.kind();
    while let Ok(item) = rx.recv_async().await {
        let progress = match kind {
            RoundKind::Pass => run_item(&ctx, &round, &item).await,
            RoundKind::Retry { .. } => retry_item(&ctx, &round, &item).await,
        };
        if let Some(reporter) = &ctx.reporter {
            reporter.item_finished(&progress);
        }
    }
    debug!(worker = id, "worker stopped");
}

async fn run_item(ctx: &RoundContext, round: &RoundState, item: &Path) -> RoundProgress {
    match ctx.action.run(&ctx.root, item, &ctx.job).await {
        Ok(()) => {
            let progress = round.record_success();
            info!(directory = %item.display(), "{}", progress);
            progress
        }
        Err(e) => {
            let progress = round.record_failure();
            error!(directory = %item.display(), error = %e, "{} action failed", progress);
            progress
        }
    }
}

async fn retry_item(ctx: &RoundContext, round: &RoundState, item: &Path) -> RoundProgress {
    match ctx.action.retry(&ctx.root, item).await {
        Ok(()) => {
            ctx.job.add_success_file();
            let progress = round.record_success();
            info!(item = %item.display(), "{} recovered", progress);
            progress
        }
        Err(e) => {
            ctx.job.add_failed_item(item).await;
            let progress = round.record_failure();
            error!(item = %item.display(), error = %e, "{} retry failed", progress);
            progress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mechacopy_io::PatternMatcher;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tracks how many items are being processed at once
    #[derive(Default)]
    struct Gauge {
        current: AtomicUsize,
        peak: AtomicUsize,
        seen: AtomicUsize,
    }

    #[async_trait]
    impl ActionProvider for Gauge {
        fn name(&self) -> &'static str {
            "gauge"
        }

        async fn run(&self, _base: &Path, rel: &Path, _job: &JobStatus) -> Result<()> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            self.seen.fetch_add(1, Ordering::SeqCst);
            if rel.to_string_lossy().starts_with("bad") {
                Err(Error::other("scripted failure"))
            } else {
                Ok(())
            }
        }

        async fn retry(&self, _base: &Path, item: &Path) -> Result<()> {
            if item.to_string_lossy().starts_with("bad") {
                Err(Error::other("still failing"))
            } else {
                Ok(())
            }
        }
    }

    fn context(action: Arc<dyn ActionProvider>) -> Arc<RoundContext> {
        Arc::new(RoundContext {
            root: PathBuf::from("/unused"),
            action,
            job: Arc::new(JobStatus::new(PatternMatcher::new(["*"]).unwrap())),
            reporter: None,
        })
    }

    fn items(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_flight_work_bounded_by_pool_size() {
        let gauge = Arc::new(Gauge::default());
        let ctx = context(gauge.clone());
        let names: Vec<String> = (0..40).map(|i| format!("dir{}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let progress = WorkerPool::new(WorkerCount::new(3).unwrap())
            .run_round(RoundKind::Pass, items(&names), &ctx)
            .await
            .unwrap();

        assert_eq!(progress.total, 40);
        assert_eq!(progress.succeeded, 40);
        assert_eq!(gauge.seen.load(Ordering::SeqCst), 40);
        assert!(gauge.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_pool() {
        let ctx = context(Arc::new(Gauge::default()));

        let progress = WorkerPool::new(WorkerCount::new(2).unwrap())
            .run_round(RoundKind::Pass, items(&["ok1", "bad1", "ok2", "bad2"]), &ctx)
            .await
            .unwrap();

        assert_eq!(progress.succeeded, 2);
        assert_eq!(progress.failed, 2);
        assert_eq!(progress.completed(), progress.total);
    }

    #[tokio::test]
    async fn test_retry_round_requeues_failures_and_counts_recoveries() {
        let ctx = context(Arc::new(Gauge::default()));

        let progress = WorkerPool::new(WorkerCount::new(4).unwrap())
            .run_round(RoundKind::Retry { round: 1 }, items(&["fixed.txt", "bad.txt"]), &ctx)
            .await
            .unwrap();

        assert_eq!(progress.succeeded, 1);
        assert_eq!(ctx.job.success_files(), 1);
        assert_eq!(ctx.job.failed_items().await, vec![PathBuf::from("bad.txt")]);
    }

    #[tokio::test]
    async fn test_empty_round_completes() {
        let ctx = context(Arc::new(Gauge::default()));

        let progress = WorkerPool::new(WorkerCount::new(2).unwrap())
            .run_round(RoundKind::Pass, Vec::new(), &ctx)
            .await
            .unwrap();

        assert_eq!(progress.total, 0);
        assert!(progress.is_complete());
    }
}

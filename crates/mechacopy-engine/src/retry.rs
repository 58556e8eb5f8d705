//! Bounded retry rounds over individually failed items

use crate::pool::{RoundContext, WorkerPool};
use mechacopy_types::{Result, RetryPolicy, RoundKind, WorkerCount};
use std::sync::Arc;
use tracing::{info, warn};

/// Re-drives failed items through fresh worker rounds
#[derive(Debug, Clone)]
pub struct RetryController {
    policy: RetryPolicy,
    pool: WorkerPool,
}

impl RetryController {
    /// Create a controller that retries with `workers` per round
    pub fn new(policy: RetryPolicy, workers: WorkerCount) -> Self {
        Self {
            policy,
            pool: WorkerPool::new(workers),
        }
    }

    /// Run retry rounds until nothing is failing or the budget is spent
    ///
    /// Returns the number of rounds actually run. Items still failing at the
    /// end stay in the job's failed list.
    pub async fn run(&self, ctx: &Arc<RoundContext>) -> Result<u32> {
        let mut attempted = 0;
        for round in 1..=self.policy.effective_rounds() {
            let pending = ctx.job.failed_item_count().await;
            if pending == 0 {
                break;
            }

            info!(round, pending, delay_secs = self.policy.delay_secs, "retrying failed items");
            tokio::time::sleep(self.policy.delay()).await;

            let items = ctx.job.take_failed_items().await;
            attempted = round;
            let progress = self
                .pool
                .run_round(RoundKind::Retry { round }, items, ctx)
                .await?;
            info!(round, recovered = progress.succeeded, still_failing = progress.failed, "retry round finished");
        }

        let remaining = ctx.job.failed_item_count().await;
        if remaining > 0 {
            warn!(remaining, rounds = attempted, "retry budget exhausted");
        }
        Ok(attempted)
    }
}

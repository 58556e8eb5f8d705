//! Core traits for mechacopy

use crate::{JobSummary, RoundKind, RoundProgress};

/// Receives progress from the orchestrator while a run is in flight
///
/// Implementations are shared across worker tasks, so every method takes
/// `&self` and must be cheap.
pub trait ProgressReporter: Send + Sync {
    /// A new round is about to dispatch `total` items
    fn round_started(&self, kind: RoundKind, total: u64);

    /// One item of the current round was accounted for
    fn item_finished(&self, progress: &RoundProgress);

    /// The run finished and produced a summary
    fn report_completion(&self, summary: &JobSummary);
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn round_started(&self, _kind: RoundKind, _total: u64) {}

    fn item_finished(&self, _progress: &RoundProgress) {}

    fn report_completion(&self, _summary: &JobSummary) {}
}

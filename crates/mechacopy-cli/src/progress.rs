//! Terminal progress bars, one per round

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use mechacopy_types::{JobSummary, ProgressReporter, RoundKind, RoundProgress};
use std::sync::Mutex;

const TEMPLATE: &str =
    "{prefix:>10.bold} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// [`ProgressReporter`] that draws an indicatif bar for each round
///
/// Bars live in one [`MultiProgress`]; log output goes through
/// [`MultiProgress::suspend`] so it never tears through a bar.
pub struct RoundProgressBar {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl std::fmt::Debug for RoundProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundProgressBar")
            .field("active", &self.current().is_some())
            .finish_non_exhaustive()
    }
}

impl RoundProgressBar {
    /// Create a reporter that draws to stderr
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    /// Create a reporter that tracks rounds without drawing anything
    pub fn hidden() -> Self {
        Self::with_multi(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    fn with_multi(multi: MultiProgress) -> Self {
        Self {
            multi,
            bar: Mutex::new(None),
        }
    }

    /// Display the round bars are drawn on
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }

    fn current(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }

    fn finish_current(&self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(bar) = bar.take() {
                bar.finish();
            }
        }
    }
}

impl Default for RoundProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for RoundProgressBar {
    fn round_started(&self, kind: RoundKind, total: u64) {
        self.finish_current();

        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(Self::style());
        bar.set_prefix(kind.to_string());

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn item_finished(&self, progress: &RoundProgress) {
        if let Some(bar) = self.current() {
            bar.inc(1);
            if progress.failed > 0 {
                bar.set_message(format!("{} failed", progress.failed));
            }
        }
    }

    fn report_completion(&self, _summary: &JobSummary) {
        self.finish_current();
    }
}

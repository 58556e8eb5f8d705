//! Command-line front ends for mechacopy
//!
//! Two binaries share this library: `mechacopy` copies a tree, `mechadel`
//! deletes one. Both load configuration, set up logging, run the
//! orchestrator with a progress bar, and print a report.
//!
//! Exit codes: `0` when every item succeeded or was skipped, `1` when some
//! items or directories never succeeded, `2` when the run could not start.

pub mod args;
pub mod display;
pub mod json_output;
pub mod logging;
pub mod progress;

use anyhow::{Context, Result};
use args::{CommonArgs, CopyCli, DeleteCli};
use json_output::JsonReport;
use mechacopy_config::Config;
use mechacopy_engine::{ActionProvider, CopyAction, DeleteAction, JobConfig, JobOrchestrator};
use mechacopy_types::JobSummary;
use progress::RoundProgressBar;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Every item succeeded or was skipped
pub const EXIT_CLEAN: u8 = 0;
/// Some items or directories never succeeded
pub const EXIT_ERRORS: u8 = 1;
/// Configuration, pattern, or root directory problems stopped the run
pub const EXIT_FATAL: u8 = 2;

/// Exit code for a finished run
pub fn exit_code(summary: &JobSummary) -> u8 {
    if summary.is_clean() {
        EXIT_CLEAN
    } else {
        EXIT_ERRORS
    }
}

/// Run `mechacopy`
pub async fn run_copy(cli: &CopyCli) -> Result<u8> {
    let config = cli.load_config()?;
    let action = Arc::new(CopyAction::new(&cli.destination));
    execute(
        &cli.common,
        &config,
        "copy",
        &cli.source,
        Some(&cli.destination),
        action,
    )
    .await
}

/// Run `mechadel`
pub async fn run_delete(cli: &DeleteCli) -> Result<u8> {
    let config = cli.load_config()?;
    execute(
        &cli.common,
        &config,
        "delete",
        &cli.target,
        None,
        Arc::new(DeleteAction::new()),
    )
    .await
}

async fn execute(
    common: &CommonArgs,
    config: &Config,
    operation: &str,
    root: &Path,
    destination: Option<&Path>,
    action: Arc<dyn ActionProvider>,
) -> Result<u8> {
    let interactive = !common.quiet && !common.json;
    let progress = interactive.then(|| Arc::new(RoundProgressBar::new()));
    let _guard = logging::init_logging(
        common,
        &config.logging,
        progress.as_deref().map(RoundProgressBar::multi),
    )?;

    let job_config = JobConfig::from_config(config);
    info!(
        workers = job_config.worker_count.get(),
        retry_workers = job_config.retry_workers().get(),
        retry_rounds = job_config.retry.effective_rounds(),
        retry_delay_secs = job_config.retry.delay_secs,
        patterns = ?job_config.patterns,
        "starting {}",
        operation
    );

    if interactive {
        display::print_banner(operation, root, destination);
    }

    let mut orchestrator = JobOrchestrator::new(job_config);
    if let Some(progress) = progress {
        orchestrator = orchestrator.with_reporter(progress);
    }
    let summary = orchestrator
        .run(root, action)
        .await
        .with_context(|| format!("{} of {} could not run", operation, root.display()))?;

    let code = exit_code(&summary);
    if common.json {
        let report = JsonReport::new(operation, root, destination, &summary, code);
        println!("{}", report.to_json()?);
    } else if !common.quiet {
        display::print_summary(&summary);
    }
    Ok(code)
}

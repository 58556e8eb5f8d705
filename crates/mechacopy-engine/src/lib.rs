//! Job orchestration engine for mechacopy
//!
//! This crate walks a source tree concurrently, fans the discovered
//! directories out to a fixed pool of workers, and re-drives individually
//! failed items through bounded retry rounds.
//!
//! # Features
//!
//! - **Bounded enumeration**: a semaphore shared across recursion levels caps concurrent listings
//! - **Backpressure**: a rendezvous channel limits in-flight work to the pool size
//! - **Per-round workers**: each round's workers exit when its channel closes
//! - **Bounded retries**: fixed delay, fixed round budget, independently sized retry pool
//! - **Pluggable actions**: copy and delete share one [`ActionProvider`] trait
//!
//! # Examples
//!
//! ```rust,no_run
//! use mechacopy_engine::{run_orchestration, CopyAction, JobConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> mechacopy_types::Result<()> {
//! let config = JobConfig::default().with_patterns(["*.txt"]);
//! let summary = run_orchestration("source", Arc::new(CopyAction::new("backup")), &config).await?;
//! println!("copied {} files, {} errors", summary.success_count, summary.error_count);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod enumerator;
pub mod orchestrator;
pub mod pool;
pub mod retry;
pub mod status;

pub use action::{ActionProvider, CopyAction, DeleteAction};
pub use config::JobConfig;
pub use enumerator::{DirectoryEnumerator, ROOT_ITEM};
pub use orchestrator::{run_orchestration, JobOrchestrator};
pub use pool::{RoundContext, WorkerPool};
pub use retry::RetryController;
pub use status::{JobStatus, RoundState};

pub use mechacopy_types::{Error, JobSummary, ProgressReporter, Result, RoundKind, RoundProgress};

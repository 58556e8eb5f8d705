//! Per-directory units of work
//!
//! An [`ActionProvider`] does the work for one enumerated directory in the
//! initial pass and knows how to re-attempt a single failed item in a retry
//! round.

use crate::enumerator::ROOT_ITEM;
use crate::status::JobStatus;
use async_trait::async_trait;
use mechacopy_types::Result;
use std::path::{Path, PathBuf};

pub mod copy;
pub mod delete;

pub use copy::CopyAction;
pub use delete::DeleteAction;

/// A pluggable action applied to each discovered directory
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Short name used in logs and run spans
    fn name(&self) -> &'static str;

    /// Process the directory `rel` under `base`, recording file-level outcomes in `job`
    async fn run(&self, base: &Path, rel: &Path, job: &JobStatus) -> Result<()>;

    /// Re-attempt one item that failed in an earlier round
    async fn retry(&self, base: &Path, item: &Path) -> Result<()>;
}

/// Join a relative item onto `base`, treating `"."` as `base` itself
pub fn resolve(base: &Path, rel: &Path) -> PathBuf {
    if rel == Path::new(ROOT_ITEM) {
        base.to_path_buf()
    } else {
        base.join(rel)
    }
}

/// Relative identifier of `name` inside directory `rel`
pub fn item_path(rel: &Path, name: impl AsRef<Path>) -> PathBuf {
    if rel == Path::new(ROOT_ITEM) {
        name.as_ref().to_path_buf()
    } else {
        rel.join(name)
    }
}

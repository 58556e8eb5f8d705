//! Delete action: remove each directory and everything beneath it

use super::{resolve, ActionProvider};
use crate::status::JobStatus;
use async_trait::async_trait;
use mechacopy_types::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::error;

/// Removes directories recursively
///
/// Directories arrive deepest-name-first, so most removals find their target
/// already gone once a parent has been removed; that is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteAction;

impl DeleteAction {
    /// Create a delete action
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionProvider for DeleteAction {
    fn name(&self) -> &'static str {
        "delete"
    }

    async fn run(&self, base: &Path, rel: &Path, job: &JobStatus) -> Result<()> {
        let target = resolve(base, rel);
        match tokio::fs::remove_dir_all(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!(directory = %target.display(), error = %e, "delete failed");
                job.add_failed_directory(&target).await;
                Err(Error::from_io(e, &target))
            }
        }
    }

    async fn retry(&self, _base: &Path, _item: &Path) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechacopy_io::PatternMatcher;
    use tempfile::TempDir;

    fn job() -> JobStatus {
        JobStatus::new(PatternMatcher::new(["*"]).unwrap())
    }

    #[tokio::test]
    async fn test_removes_subtree() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
        std::fs::write(temp_dir.path().join("a/b/f.txt"), b"x").unwrap();
        std::fs::create_dir(temp_dir.path().join("c")).unwrap();

        DeleteAction::new()
            .run(temp_dir.path(), Path::new("a"), &job())
            .await
            .unwrap();

        assert!(!temp_dir.path().join("a").exists());
        assert!(temp_dir.path().join("c").exists());
    }

    #[tokio::test]
    async fn test_root_item_removes_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        std::fs::create_dir_all(target.join("x/y")).unwrap();

        DeleteAction::new()
            .run(&target, Path::new("."), &job())
            .await
            .unwrap();

        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_already_removed_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let job = job();

        DeleteAction::new()
            .run(temp_dir.path(), Path::new("gone/deeper"), &job)
            .await
            .unwrap();

        assert!(job.failed_directories().await.is_empty());
    }

    #[tokio::test]
    async fn test_retry_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("keep")).unwrap();

        DeleteAction::new()
            .retry(temp_dir.path(), Path::new("keep"))
            .await
            .unwrap();

        assert!(temp_dir.path().join("keep").exists());
    }
}

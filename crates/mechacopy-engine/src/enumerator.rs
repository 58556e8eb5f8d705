//! Concurrent directory discovery
//!
//! The walk fans out one task per subdirectory down to
//! [`EnumerationLimits::parallel_depth`], below which subtrees are listed
//! inline by the task that owns them. A semaphore shared by every level caps
//! how many directories are being read at once; a permit is held only for
//! the listing itself, never while waiting on children, so the walk cannot
//! starve itself.

use futures::future::{BoxFuture, FutureExt};
use mechacopy_io::list_immediate_subdirectories;
use mechacopy_types::{EnumerationLimits, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Relative path that stands for the root directory itself
pub const ROOT_ITEM: &str = ".";

/// Walks a tree and returns every directory under it, root included
#[derive(Debug, Clone)]
pub struct DirectoryEnumerator {
    limits: EnumerationLimits,
    permits: Arc<Semaphore>,
}

#[derive(Clone)]
struct Walk {
    root: Arc<PathBuf>,
    limits: EnumerationLimits,
    permits: Arc<Semaphore>,
}

impl DirectoryEnumerator {
    /// Create an enumerator with the given limits
    pub fn new(limits: EnumerationLimits) -> Self {
        let permits = Arc::new(Semaphore::new(limits.max_concurrent_listings.max(1)));
        Self { limits, permits }
    }

    /// List every directory under `root` as a path relative to it
    ///
    /// The root is reported as `"."`. The result is sorted in descending
    /// byte order. Failing to list `root` itself is an error; failing to list
    /// anything deeper keeps that directory in the result, drops its
    /// children and logs a warning.
    pub async fn enumerate<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        let children = {
            let _permit = self.permits.acquire().await;
            list_immediate_subdirectories(root).await?
        };

        let walk = Walk {
            root: Arc::new(root.to_path_buf()),
            limits: self.limits,
            permits: Arc::clone(&self.permits),
        };

        let mut dirs = vec![PathBuf::from(ROOT_ITEM)];
        let mut tasks = JoinSet::new();
        for child in children {
            tasks.spawn(walk.clone().subtree(PathBuf::from(child), 1));
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(found) => dirs.extend(found),
                Err(e) => warn!(error = %e, "directory walk task failed"),
            }
        }

        sort_descending(&mut dirs);
        debug!(root = %root.display(), directories = dirs.len(), "enumeration finished");
        Ok(dirs)
    }
}

impl Walk {
    fn subtree(self, rel: PathBuf, depth: usize) -> BoxFuture<'static, Vec<PathBuf>> {
        async move {
            let path = self.root.join(&rel);
            let listed = match self.permits.acquire().await {
                Ok(_permit) => list_immediate_subdirectories(&path).await,
                Err(e) => Err(mechacopy_types::Error::sync(e.to_string())),
            };

            let mut found = vec![rel.clone()];
            let children = match listed {
                Ok(children) => children,
                Err(e) => {
                    warn!(directory = %path.display(), error = %e, "skipping unreadable subtree");
                    return found;
                }
            };

            if depth < self.limits.parallel_depth {
                let mut tasks = JoinSet::new();
                for child in children {
                    tasks.spawn(self.clone().subtree(rel.join(child), depth + 1));
                }
                while let Some(joined) = tasks.join_next().await {
                    match joined {
                        Ok(sub) => found.extend(sub),
                        Err(e) => warn!(directory = %path.display(), error = %e, "directory walk task failed"),
                    }
                }
            } else {
                for child in children {
                    found.extend(self.clone().subtree(rel.join(child), depth + 1).await);
                }
            }
            found
        }
        .boxed()
    }
}

/// Sort in descending byte order of the path text
pub fn sort_descending(items: &mut [PathBuf]) {
    items.sort_by(|a, b| b.as_os_str().cmp(a.as_os_str()));
}

//! Fixture helpers shared by the integration tests and benchmarks

use async_trait::async_trait;
use mechacopy_engine::{ActionProvider, JobStatus, ROOT_ITEM};
use mechacopy_types::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::TempDir;
use tokio::sync::Mutex;
use walkdir::WalkDir;

/// Create every file in `files` under `root`, with parent directories
pub fn create_tree(root: &Path, files: &[(&str, &[u8])]) -> std::io::Result<()> {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

/// The two-file tree `{a/file1.txt, a/b/file2.txt}`
pub fn sample_tree() -> std::io::Result<TempDir> {
    let dir = TempDir::new()?;
    create_tree(
        dir.path(),
        &[("a/file1.txt", b"first file"), ("a/b/file2.txt", b"second file")],
    )?;
    Ok(dir)
}

/// A tree `width` directories wide and `depth` levels deep, one file per directory
pub fn wide_tree(root: &Path, width: usize, depth: usize) -> std::io::Result<usize> {
    fn build(dir: &Path, width: usize, depth: usize) -> std::io::Result<usize> {
        fs::write(dir.join("data.bin"), [0u8; 64])?;
        if depth == 0 {
            return Ok(1);
        }
        let mut count = 1;
        for i in 0..width {
            let child = dir.join(format!("d{}", i));
            fs::create_dir(&child)?;
            count += build(&child, width, depth - 1)?;
        }
        Ok(count)
    }
    build(root, width, depth)
}

/// Every directory under `root`, relative, with `root` itself as `.`
///
/// Computed with `walkdir` so it is independent of the engine's enumerator.
pub fn oracle_directories(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| match entry.path().strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => PathBuf::from(ROOT_ITEM),
        })
        .collect()
}

/// Every regular file under `root`, relative
pub fn oracle_files(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect()
}

/// Action whose items fail a scripted number of times before succeeding
///
/// The initial pass runs every scripted item when it reaches the root
/// directory; other directories succeed without doing anything.
#[derive(Debug)]
pub struct ScriptedAction {
    failures_left: Mutex<HashMap<PathBuf, u32>>,
    retry_calls: AtomicU64,
}

impl ScriptedAction {
    /// Each `(item, n)` fails `n` times; `u32::MAX` fails forever
    pub fn new(script: &[(&str, u32)]) -> Self {
        Self {
            failures_left: Mutex::new(
                script
                    .iter()
                    .map(|(item, n)| (PathBuf::from(item), *n))
                    .collect(),
            ),
            retry_calls: AtomicU64::new(0),
        }
    }

    /// Number of `retry` calls seen so far
    pub fn retry_calls(&self) -> u64 {
        self.retry_calls.load(Ordering::SeqCst)
    }

    async fn attempt(&self, item: &Path) -> bool {
        let mut left = self.failures_left.lock().await;
        match left.get_mut(item) {
            Some(n) if *n > 0 => {
                *n = n.saturating_sub(1);
                false
            }
            _ => true,
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedAction {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn run(&self, _base: &Path, rel: &Path, job: &JobStatus) -> Result<()> {
        if rel != Path::new(ROOT_ITEM) {
            return Ok(());
        }
        let items: Vec<PathBuf> = self.failures_left.lock().await.keys().cloned().collect();
        for item in items {
            if self.attempt(&item).await {
                job.add_success_file();
            } else {
                job.add_failed_item(&item).await;
            }
        }
        Ok(())
    }

    async fn retry(&self, _base: &Path, item: &Path) -> Result<()> {
        self.retry_calls.fetch_add(1, Ordering::SeqCst);
        if self.attempt(item).await {
            Ok(())
        } else {
            Err(Error::other(format!("{} is still locked", item.display())))
        }
    }
}

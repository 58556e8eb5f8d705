//! Copy action: mirror one directory's files into the destination tree

use super::{item_path, resolve, ActionProvider};
use crate::status::JobStatus;
use async_trait::async_trait;
use mechacopy_io::{big_file_gib, copy_one_file, list_files, needs_copy};
use mechacopy_types::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Copies the files directly inside each directory to `destination`
#[derive(Debug, Clone)]
pub struct CopyAction {
    destination: PathBuf,
}

impl CopyAction {
    /// Create a copy action writing under `destination`
    pub fn new<P: Into<PathBuf>>(destination: P) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Root of the destination tree
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

#[async_trait]
impl ActionProvider for CopyAction {
    fn name(&self) -> &'static str {
        "copy"
    }

    async fn run(&self, base: &Path, rel: &Path, job: &JobStatus) -> Result<()> {
        let src_dir = resolve(base, rel);
        let dst_dir = resolve(&self.destination, rel);

        let names = match list_files(&src_dir).await {
            Ok(names) => names,
            Err(e) => {
                job.add_failed_directory(&src_dir).await;
                return Err(e);
            }
        };

        for name in names {
            let src_file = src_dir.join(&name);
            let dst_file = dst_dir.join(&name);

            if !job.patterns().is_match(&name) {
                job.add_skip_file();
                continue;
            }
            if !needs_copy(&src_file, &dst_file).await {
                debug!(file = %src_file.display(), "destination up to date");
                job.add_skip_file();
                continue;
            }

            let size_gib = match tokio::fs::metadata(&src_file).await {
                Ok(meta) => big_file_gib(meta.len()),
                Err(_) => 0,
            };
            if size_gib > 0 {
                info!(file = %src_file.display(), size_gib, "START COPY BIG FILE");
            }

            if let Err(e) = copy_one_file(&src_file, &dst_file).await {
                error!(file = %src_file.display(), error = %e, "file copy failed");
                job.add_failed_item(item_path(rel, &name)).await;
                continue;
            }

            if size_gib > 0 {
                info!(file = %src_file.display(), size_gib, "END COPY BIG FILE");
            }
            job.add_success_file();
        }
        Ok(())
    }

    async fn retry(&self, base: &Path, item: &Path) -> Result<()> {
        let source = base.join(item);
        let destination = self.destination.join(item);
        copy_one_file(&source, &destination).await.map(|_| ())
    }
}

//! Single-file copy primitive
//!
//! Copies bytes sequentially, forces them to disk and then stamps the
//! destination with the source's modification time so that a later
//! [`needs_copy`](crate::needs_copy) check sees it as up to date.

use filetime::FileTime;
use mechacopy_types::{Error, Result};
use std::path::Path;
use tokio::fs::{self, File};
use tracing::debug;

/// Files above this size get START/END log lines around their copy
pub const BIG_FILE_THRESHOLD: u64 = 1024 * 1024 * 1024;

/// Copy `source` to `destination`, creating parent directories as needed
///
/// Returns the number of bytes written.
pub async fn copy_one_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<u64> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::from_io(e, parent))?;
    }

    let mut reader = File::open(source)
        .await
        .map_err(|e| Error::from_io(e, source))?;
    let mut writer = File::create(destination)
        .await
        .map_err(|e| Error::from_io(e, destination))?;

    let bytes = tokio::io::copy(&mut reader, &mut writer)
        .await
        .map_err(|e| Error::from_io(e, destination))?;
    writer
        .sync_all()
        .await
        .map_err(|e| Error::from_io(e, destination))?;
    drop(writer);

    preserve_timestamp(source, destination).await?;

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "file copied"
    );
    Ok(bytes)
}

/// Set both access and modification time of `destination` to the source mtime
pub async fn preserve_timestamp<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let metadata = fs::metadata(source)
        .await
        .map_err(|e| Error::from_io(e, source))?;
    let modified = FileTime::from_last_modification_time(&metadata);

    let target = destination.to_path_buf();
    tokio::task::spawn_blocking(move || filetime::set_file_times(&target, modified, modified))
        .await
        .map_err(|e| Error::sync(format!("timestamp task failed: {}", e)))?
        .map_err(|e| Error::from_io(e, destination))
}

/// Size in whole GiB when the file counts as big, otherwise zero
pub fn big_file_gib(len: u64) -> u64 {
    if len > BIG_FILE_THRESHOLD {
        len / BIG_FILE_THRESHOLD
    } else {
        0
    }
}

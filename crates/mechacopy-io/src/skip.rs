//! Up-to-date detection for destination files

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

/// The parts of file metadata that decide whether a copy can be skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// File length in bytes
    pub len: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileStamp {
    /// Build a stamp from filesystem metadata
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        Some(Self {
            len: metadata.len(),
            modified: metadata.modified().ok()?,
        })
    }
}

/// True when the destination has the same size and is not older than the source
pub fn compare_for_skip(source: &FileStamp, destination: &FileStamp) -> bool {
    source.len == destination.len && destination.modified >= source.modified
}

/// Check whether `source` has to be copied over `destination`
///
/// Any failure to stat either side counts as "copy it".
pub async fn needs_copy<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> bool {
    let Some(source) = stamp(source.as_ref()).await else {
        return true;
    };
    let Some(destination) = stamp(destination.as_ref()).await else {
        return true;
    };
    !compare_for_skip(&source, &destination)
}

async fn stamp(path: &Path) -> Option<FileStamp> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    FileStamp::from_metadata(&metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use proptest::prelude::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    proptest! {
        #[test]
        fn test_size_mismatch_never_skips(a in 0u64..1_000_000, b in 0u64..1_000_000, t in 0u64..1_000_000) {
            prop_assume!(a != b);
            let source = FileStamp { len: a, modified: at(t) };
            let destination = FileStamp { len: b, modified: at(t + 10) };
            prop_assert!(!compare_for_skip(&source, &destination));
        }

        #[test]
        fn test_skip_follows_mtime_order(len in 0u64..1_000_000, src in 0u64..1_000_000, dst in 0u64..1_000_000) {
            let source = FileStamp { len, modified: at(src) };
            let destination = FileStamp { len, modified: at(dst) };
            prop_assert_eq!(compare_for_skip(&source, &destination), dst >= src);
        }
    }

    #[tokio::test]
    async fn test_missing_destination_needs_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.txt");
        std::fs::write(&source, b"abc").unwrap();

        assert!(needs_copy(&source, temp_dir.path().join("nope.txt")).await);
    }

    #[tokio::test]
    async fn test_identical_newer_destination_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.txt");
        let destination = temp_dir.path().join("b.txt");
        std::fs::write(&source, b"abc").unwrap();
        std::fs::write(&destination, b"xyz").unwrap();

        filetime::set_file_mtime(&source, FileTime::from_unix_time(1_000, 0)).unwrap();
        filetime::set_file_mtime(&destination, FileTime::from_unix_time(2_000, 0)).unwrap();
        assert!(!needs_copy(&source, &destination).await);

        filetime::set_file_mtime(&destination, FileTime::from_unix_time(500, 0)).unwrap();
        assert!(needs_copy(&source, &destination).await);
    }
}

//! Directory listing helpers

use mechacopy_types::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use tokio::fs;

/// Names of the directories directly under `path`
///
/// Symbolic links are not followed, so a link to a directory is not listed.
pub async fn list_immediate_subdirectories<P: AsRef<Path>>(path: P) -> Result<Vec<OsString>> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path)
        .await
        .map_err(|e| Error::directory_unreadable(path, &e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::directory_unreadable(path, &e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::from_io(e, entry.path()))?;
        if file_type.is_dir() {
            names.push(entry.file_name());
        }
    }
    Ok(names)
}

/// Names of the non-directory entries directly under `path`
pub async fn list_files<P: AsRef<Path>>(path: P) -> Result<Vec<OsString>> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path)
        .await
        .map_err(|e| Error::directory_unreadable(path, &e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::directory_unreadable(path, &e))?
    {
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => names.push(entry.file_name()),
            Err(e) => return Err(Error::directory_unreadable(path, &e)),
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_lists_only_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("a")).unwrap();
        std::fs::create_dir(temp_dir.path().join("b")).unwrap();
        std::fs::create_dir(temp_dir.path().join("a/nested")).unwrap();
        std::fs::write(temp_dir.path().join("file.txt"), b"x").unwrap();

        let mut names = list_immediate_subdirectories(temp_dir.path()).await.unwrap();
        names.sort();

        assert_eq!(names, vec![OsString::from("a"), OsString::from("b")]);
    }

    #[tokio::test]
    async fn test_lists_only_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("a")).unwrap();
        std::fs::write(temp_dir.path().join("one.txt"), b"1").unwrap();
        std::fs::write(temp_dir.path().join("two.log"), b"2").unwrap();

        let mut names = list_files(temp_dir.path()).await.unwrap();
        names.sort();

        assert_eq!(names, vec![OsString::from("one.txt"), OsString::from("two.log")]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let error = list_immediate_subdirectories(&missing).await.unwrap_err();

        assert!(matches!(error, Error::DirectoryUnreadable { ref path, .. } if path == &missing));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_directory_is_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .unwrap();

        let names = list_immediate_subdirectories(temp_dir.path()).await.unwrap();

        assert_eq!(names, vec![OsString::from("real")]);
    }
}

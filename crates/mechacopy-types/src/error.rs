//! Error types and handling for mechacopy
//!
//! Every library crate in the workspace reports failures through [`Error`].
//! Besides the usual kind classification, each error carries an [`ErrorClass`]
//! that tells the orchestrator how the failure affects a run: fatal errors
//! abort it, structural errors are recorded but never retried, transient
//! errors feed the retry rounds.

use std::path::{Path, PathBuf};

/// How a failure affects the run that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorClass {
    /// A single item failed; it is eligible for another attempt
    Transient,
    /// A directory could not be listed; recorded and counted, never retried
    Structural,
    /// The run cannot continue
    Fatal,
}

/// Main error type for mechacopy operations
#[derive(thiserror::Error, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was not found
        path: PathBuf,
    },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path with permission issues
        path: PathBuf,
    },

    /// No space left on the destination device
    #[error("No space left on device while writing {path}")]
    StorageFull {
        /// Path being written when the device filled up
        path: PathBuf,
    },

    /// A directory could not be listed
    #[error("Cannot read directory {path}: {message}")]
    DirectoryUnreadable {
        /// Directory that failed to list
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// A file-name pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// Why it was rejected
        message: String,
    },

    /// Work channel or task synchronization failed
    #[error("Synchronization error: {message}")]
    Sync {
        /// Error message describing the synchronization issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors, including path-carrying variants
    Io,
    /// Directory listing failures
    Directory,
    /// Configuration errors
    Config,
    /// Pattern compilation errors
    Pattern,
    /// Synchronization errors
    Sync,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::StorageFull { .. } => ErrorKind::Io,
            Self::DirectoryUnreadable { .. } => ErrorKind::Directory,
            Self::Config { .. } => ErrorKind::Config,
            Self::Pattern { .. } => ErrorKind::Pattern,
            Self::Sync { .. } => ErrorKind::Sync,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Get the run-level class of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Config { .. } | Self::Pattern { .. } | Self::Sync { .. } => ErrorClass::Fatal,
            Self::DirectoryUnreadable { .. } => ErrorClass::Structural,
            Self::Io { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::StorageFull { .. }
            | Self::Other { .. } => ErrorClass::Transient,
        }
    }

    /// Map an I/O error onto a path-carrying variant where one exists
    pub fn from_io(error: std::io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::StorageFull => Self::StorageFull { path },
            _ => Self::Io {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }

    /// Create a directory listing error
    pub fn directory_unreadable(path: impl AsRef<Path>, error: &std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.as_ref().to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new pattern error
    pub fn pattern<P: Into<String>, S: Into<String>>(pattern: P, message: S) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a new sync error
    pub fn sync<S: Into<String>>(message: S) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_message_variants_keep_kind_and_class(message in ".*") {
            let cases = vec![
                (Error::Io { message: message.clone() }, ErrorKind::Io, ErrorClass::Transient),
                (Error::Config { message: message.clone() }, ErrorKind::Config, ErrorClass::Fatal),
                (Error::Sync { message: message.clone() }, ErrorKind::Sync, ErrorClass::Fatal),
                (Error::Other { message: message.clone() }, ErrorKind::Other, ErrorClass::Transient),
            ];

            for (error, kind, class) in cases {
                prop_assert_eq!(error.kind(), kind);
                prop_assert_eq!(error.class(), class);
            }
        }
    }

    #[test]
    fn test_from_io_maps_path_variants() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = Error::from_io(not_found, "a/file1.txt");
        assert!(matches!(error, Error::FileNotFound { ref path } if path == Path::new("a/file1.txt")));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            Error::from_io(denied, "x"),
            Error::PermissionDenied { .. }
        ));

        let full = std::io::Error::new(std::io::ErrorKind::StorageFull, "full");
        let error = Error::from_io(full, "big.bin");
        assert!(matches!(error, Error::StorageFull { .. }));
        assert_eq!(error.class(), ErrorClass::Transient);
    }

    #[test]
    fn test_from_io_keeps_path_in_message() {
        let other = std::io::Error::new(std::io::ErrorKind::Interrupted, "signal");
        let error = Error::from_io(other, "dir/file");
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("dir/file"));
        assert!(error.to_string().contains("signal"));
    }

    #[test]
    fn test_directory_unreadable_is_structural() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::directory_unreadable("locked", &io);
        assert_eq!(error.kind(), ErrorKind::Directory);
        assert_eq!(error.class(), ErrorClass::Structural);
    }

    #[test]
    fn test_pattern_error_display() {
        let error = Error::pattern("[a-", "unclosed character class");
        assert_eq!(error.class(), ErrorClass::Fatal);
        assert_eq!(
            error.to_string(),
            "Invalid pattern '[a-': unclosed character class"
        );
    }

    #[test]
    fn test_class_ordering() {
        assert!(ErrorClass::Transient < ErrorClass::Structural);
        assert!(ErrorClass::Structural < ErrorClass::Fatal);
    }
}

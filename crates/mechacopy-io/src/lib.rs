//! File-level I/O primitives for mechacopy
//!
//! These are the sequential building blocks the engine's action providers
//! call from inside worker tasks. None of them spawn work of their own
//! beyond the blocking timestamp update.
//!
//! - [`copy_one_file`]: copy bytes, sync, and carry the modification time over
//! - [`needs_copy`] / [`compare_for_skip`]: size plus mtime up-to-date check
//! - [`PatternMatcher`] / [`matches_any_pattern`]: case-sensitive file-name globs
//! - [`list_immediate_subdirectories`] / [`list_files`]: one-level listings
//!
//! # Examples
//!
//! ```rust,no_run
//! use mechacopy_io::{copy_one_file, needs_copy, PatternMatcher};
//!
//! # async fn example() -> mechacopy_types::Result<()> {
//! let matcher = PatternMatcher::new(["*.txt"])?;
//! if matcher.is_match("notes.txt") && needs_copy("src/notes.txt", "dst/notes.txt").await {
//!     let bytes = copy_one_file("src/notes.txt", "dst/notes.txt").await?;
//!     println!("Copied {} bytes", bytes);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod copy;
pub mod dir;
pub mod pattern;
pub mod skip;

pub use copy::{big_file_gib, copy_one_file, preserve_timestamp, BIG_FILE_THRESHOLD};
pub use dir::{list_files, list_immediate_subdirectories};
pub use pattern::{matches_any_pattern, PatternMatcher};
pub use skip::{compare_for_skip, needs_copy, FileStamp};

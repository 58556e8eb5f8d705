//! mechacopy integration testing suite
//!
//! Shared fixtures for the cross-crate integration tests and the
//! enumeration benchmark.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Fixture trees, a `walkdir` oracle, and a scripted action provider
pub mod test_utils;

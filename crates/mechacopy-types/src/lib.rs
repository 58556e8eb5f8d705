//! Core type system and error handling for mechacopy
//!
//! This crate provides the foundational types shared by the mechacopy
//! workspace:
//!
//! - **Error handling**: one error enum with kinds and run-level classes
//! - **Configuration**: validated worker counts, retry policy and walk limits
//! - **Run data**: round progress snapshots and the final job summary
//! - **Traits**: progress reporting hooks
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use mechacopy_types::{JobSummary, Result, WorkerCount};
//!
//! fn example_operation() -> Result<JobSummary> {
//!     let workers = WorkerCount::new(4).map_err(mechacopy_types::Error::config)?;
//!     assert_eq!(workers.get(), 4);
//!     Ok(JobSummary::default())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{EnumerationLimits, RetryPolicy, WorkerCount};
pub use error::{Error, ErrorClass, ErrorKind};
pub use result::Result;
pub use traits::*;
pub use types::*;

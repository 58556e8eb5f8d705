//! Result type alias for mechacopy operations

use crate::Error;

/// Result type alias for mechacopy operations
pub type Result<T> = std::result::Result<T, Error>;

//! File-name pattern filtering
//!
//! Patterns are matched against the bare file name, never the full path.
//! `*` and `?` do not cross a path separator and matching is case-sensitive.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use mechacopy_types::{Error, Result};
use std::path::Path;

/// A compiled, ordered set of file-name globs
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternMatcher {
    /// Compile `patterns`, failing on the first one that is not a valid glob
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .case_insensitive(false)
                .build()
                .map_err(|e| Error::pattern(pattern, e.kind().to_string()))?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }
        let set = builder
            .build()
            .map_err(|e| Error::pattern(kept.join(","), e.to_string()))?;
        Ok(Self {
            patterns: kept,
            set,
        })
    }

    /// The source patterns in their original order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check whether the final component of `path` matches any pattern
    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let name = path.file_name().unwrap_or(path.as_os_str());
        self.set.is_match(Path::new(name))
    }
}

/// One-shot form of [`PatternMatcher::is_match`]
///
/// Invalid patterns never match.
pub fn matches_any_pattern<S: AsRef<str>>(file_name: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|pattern| {
        PatternMatcher::new([pattern.as_ref()]).is_ok_and(|matcher| matcher.is_match(file_name))
    })
}

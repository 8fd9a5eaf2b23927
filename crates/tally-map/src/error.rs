//! Error types for schema resolution.

use std::fmt;

/// Errors from resolving a file's header against the alias registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A required alias has no matching column in this file's header.
    SchemaMismatch {
        alias: String,
        candidates: Vec<String>,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaMismatch { alias, candidates } => {
                write!(
                    f,
                    "no column for alias '{alias}' in header (candidates: {})",
                    candidates.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

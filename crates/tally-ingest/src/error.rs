//! Error types for row ingestion.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: no header row")]
    MissingHeader { path: PathBuf },

    #[error("{path}: column '{column}' not present in header")]
    MissingColumn { path: PathBuf, column: String },

    /// A data row's field count differs from the header's.
    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Strict mode encountered a byte outside 7-bit ASCII.
    #[error("{path}:{line}: invalid character data in column '{column}'")]
    Encoding {
        path: PathBuf,
        line: u64,
        column: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

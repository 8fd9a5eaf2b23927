//! Streaming row ingestion for delimited text files.
//!
//! One configurable field delimiter applies to every file in a run. Rows
//! are pulled lazily, one at a time; only the columns a tally run needs
//! are materialized, cleaned (encoding-checked, trimmed, lowercased) and
//! keyed by logical alias.

pub mod clean;
pub mod error;
pub mod options;
pub mod reader;

pub use clean::clean_field;
pub use error::{IngestError, Result};
pub use options::{EncodingMode, IngestOptions};
pub use reader::{RecordReader, read_header};

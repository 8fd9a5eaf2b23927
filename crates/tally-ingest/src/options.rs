//! Ingestion options.

use serde::{Deserialize, Serialize};

/// How to treat bytes outside 7-bit ASCII in field values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingMode {
    /// Fail the run on any non-ASCII byte.
    #[default]
    Strict,
    /// Substitute each offending byte with `?` and continue.
    Lenient,
}

/// Options for reading delimited files.
///
/// One delimiter applies uniformly to every file in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Field delimiter byte. Defaults to `;`.
    pub delimiter: u8,

    /// Strictness for invalid character data. Defaults to strict.
    pub encoding: EncodingMode,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            encoding: EncodingMode::default(),
        }
    }
}

impl IngestOptions {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the encoding strictness.
    pub fn with_encoding(mut self, encoding: EncodingMode) -> Self {
        self.encoding = encoding;
        self
    }
}

//! Lazy record reader for one delimited file.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use tally_map::HeaderMap;
use tally_model::Record;

use crate::clean::clean_field;
use crate::error::{IngestError, Result};
use crate::options::{EncodingMode, IngestOptions};

/// Reads only the header row of a delimited file.
///
/// Header names are trimmed and BOM-stripped so they can be matched
/// against registered candidate names.
pub fn read_header(path: &Path, options: &IngestOptions) -> Result<Vec<String>> {
    let mut reader = open_reader(path, options)?;
    let mut record = ByteRecord::new();
    let has_header = reader
        .read_byte_record(&mut record)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if !has_header {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    Ok(record.iter().map(normalize_header).collect())
}

fn open_reader(path: &Path, options: &IngestOptions) -> Result<csv::Reader<File>> {
    ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn normalize_header(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches('\u{feff}')
        .trim()
        .to_string()
}

struct SelectedColumn {
    alias: String,
    name: String,
    index: usize,
}

/// Lazy, finite, non-restartable stream of normalized records for one
/// file: one [`Record`] per data row, in file order, holding exactly the
/// resolved aliases. The file handle is released when the reader is
/// dropped, whether it was exhausted or abandoned after an error.
pub struct RecordReader {
    reader: csv::Reader<File>,
    path: PathBuf,
    columns: Vec<SelectedColumn>,
    expected: usize,
    mode: EncodingMode,
    line: u64,
}

impl RecordReader {
    /// Opens `path` and positions the stream past the header row.
    ///
    /// `columns` is the per-file header map produced by schema
    /// resolution; each resolved position is checked against the header
    /// actually present in this file.
    pub fn open(path: &Path, options: &IngestOptions, columns: &HeaderMap) -> Result<Self> {
        let mut reader = open_reader(path, options)?;
        let mut header = ByteRecord::new();
        let has_header = reader
            .read_byte_record(&mut header)
            .map_err(|source| IngestError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if !has_header {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
        let names: Vec<String> = header.iter().map(normalize_header).collect();

        let mut selected = Vec::with_capacity(columns.len());
        for (alias, column) in columns.iter() {
            if names.get(column.index).map(String::as_str) != Some(column.name.as_str()) {
                return Err(IngestError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.name.clone(),
                });
            }
            selected.push(SelectedColumn {
                alias: alias.to_string(),
                name: column.name.clone(),
                index: column.index,
            });
        }
        debug!(
            path = %path.display(),
            columns = selected.len(),
            "record reader opened"
        );

        Ok(Self {
            reader,
            path: path.to_path_buf(),
            columns: selected,
            expected: names.len(),
            mode: options.encoding,
            line: 1,
        })
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        let mut raw = ByteRecord::new();
        let has_row = self
            .reader
            .read_byte_record(&mut raw)
            .map_err(|source| IngestError::Read {
                path: self.path.clone(),
                source,
            })?;
        if !has_row {
            return Ok(None);
        }
        self.line += 1;
        if raw.len() != self.expected {
            return Err(IngestError::MalformedRow {
                path: self.path.clone(),
                line: self.line,
                expected: self.expected,
                found: raw.len(),
            });
        }
        let mut record = Record::new();
        for column in &self.columns {
            let bytes = raw.get(column.index).unwrap_or_default();
            match clean_field(bytes, self.mode) {
                Some(value) => {
                    record.insert(column.alias.clone(), value);
                }
                None => {
                    return Err(IngestError::Encoding {
                        path: self.path.clone(),
                        line: self.line,
                        column: column.name.clone(),
                    });
                }
            }
        }
        Ok(Some(record))
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

//! Multi-file frequency aggregation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, info_span};

use tally_ingest::{IngestError, IngestOptions, RecordReader, read_header};
use tally_map::{AliasRegistry, ResolveError, resolve_header};
use tally_model::{CompareOp, CompareValue, Constraint, ValueCounter};

use crate::eval::{ConstraintError, constraints_satisfied};

/// A fatal aggregation failure. Every per-file error carries the path of
/// the file that caused it; the run never retries or skips a file, so a
/// caller wanting partial results must decide file-by-file exclusion
/// itself and build a fresh tally.
#[derive(Debug, Error)]
pub enum RunError {
    /// `run()` was called on an already-populated tally; running again
    /// would double every count.
    #[error("tally has already run; build a new one to count again")]
    AlreadyRun,

    #[error("{path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: ResolveError,
    },

    #[error("{source}")]
    Ingest {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    #[error("{path}: {source}")]
    Constraint {
        path: PathBuf,
        #[source]
        source: ConstraintError,
    },
}

/// Progress snapshot handed to the caller after each completed file.
/// Counts in `counters` are cumulative over every file finished so far.
#[derive(Debug, Clone, Copy)]
pub struct FileProgress<'a> {
    /// File whose pass just finished.
    pub path: &'a Path,
    /// Files fully processed so far, this one included.
    pub files_processed: usize,
    /// Total files in the run.
    pub file_count: usize,
    /// Live view of the counters, complete up to this file.
    pub counters: &'a BTreeMap<String, ValueCounter>,
}

/// Accumulates frequency counts over an ordered collection of delimited
/// files that may name the same logical columns differently.
///
/// Aliases are registered up front, constraints gate which rows count,
/// and one [`ValueCounter`] is kept per tracked alias. Counts accumulate
/// across files in file order; a tally instance performs at most one run.
///
/// # Example
///
/// ```ignore
/// let mut tally = MultiFileTally::new(files, IngestOptions::default());
/// tally.register_alias("status", "CASE_STATUS");
/// tally.register_alias("occupation", "SOC_NAME");
/// tally.add_constraint(Constraint::new(
///     "status",
///     CompareOp::Eq,
///     CompareValue::text("certified"),
/// ));
/// tally.add_counter("occupation");
/// tally.run()?;
/// let counter = &tally.counters()["occupation"];
/// ```
#[derive(Debug, Default)]
pub struct MultiFileTally {
    files: Vec<PathBuf>,
    options: IngestOptions,
    registry: AliasRegistry,
    constraints: Vec<Constraint>,
    counters: BTreeMap<String, ValueCounter>,
    files_processed: usize,
    finished: bool,
}

impl MultiFileTally {
    /// Creates a tally over `files`, processed in the given order.
    pub fn new(files: Vec<PathBuf>, options: IngestOptions) -> Self {
        Self {
            files,
            options,
            ..Self::default()
        }
    }

    /// Installs a pre-built alias registry, replacing the current one.
    pub fn with_registry(mut self, registry: AliasRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Appends one candidate header name for `alias`. Safe to call
    /// repeatedly with the same pair.
    pub fn register_alias(&mut self, alias: impl Into<String>, candidate: impl Into<String>) {
        self.registry.add(alias, candidate);
    }

    /// Appends one admission constraint. Constraint order does not
    /// affect which rows are admitted.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience form of [`Self::add_constraint`].
    pub fn constrain(&mut self, alias: impl Into<String>, op: CompareOp, value: CompareValue) {
        self.add_constraint(Constraint::new(alias, op, value));
    }

    /// Starts tracking frequency counts for `alias`.
    pub fn add_counter(&mut self, alias: impl Into<String>) {
        self.counters.entry(alias.into()).or_default();
    }

    /// Current counters, keyed by alias. Readable at any time; counts
    /// for an in-flight file are complete only once that file's pass has
    /// finished.
    pub fn counters(&self) -> &BTreeMap<String, ValueCounter> {
        &self.counters
    }

    /// Files fully processed so far. Monotonically increasing from 0 to
    /// [`Self::file_count`].
    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    /// Total files in the run.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The aliases a run must resolve in every file: the union of
    /// counter and constraint aliases.
    pub fn required_aliases(&self) -> BTreeSet<String> {
        let mut required: BTreeSet<String> = self.counters.keys().cloned().collect();
        required.extend(self.constraints.iter().map(|c| c.alias.clone()));
        required
    }

    /// Processes every file in order. See [`Self::run_with_progress`].
    pub fn run(&mut self) -> Result<(), RunError> {
        self.run_with_progress(|_| {})
    }

    /// Processes every file in order, invoking `on_file` after each
    /// file's pass completes.
    ///
    /// A second run on the same instance is rejected with
    /// [`RunError::AlreadyRun`]: counters are never reset, so running
    /// again would double every count. Any per-file failure aborts the
    /// run; counts accumulated from files that already completed remain
    /// readable, no row of the failing file is counted.
    pub fn run_with_progress<F>(&mut self, mut on_file: F) -> Result<(), RunError>
    where
        F: FnMut(FileProgress<'_>),
    {
        if self.finished {
            return Err(RunError::AlreadyRun);
        }
        self.finished = true;

        let required = self.required_aliases();
        let file_count = self.files.len();
        let files = self.files.clone();
        for path in &files {
            let span = info_span!("file", path = %path.display());
            let _guard = span.enter();
            self.tally_file(path, &required)?;
            self.files_processed += 1;
            info!(
                files_processed = self.files_processed,
                file_count, "file tallied"
            );
            on_file(FileProgress {
                path,
                files_processed: self.files_processed,
                file_count,
                counters: &self.counters,
            });
        }
        Ok(())
    }

    fn tally_file(&mut self, path: &Path, required: &BTreeSet<String>) -> Result<(), RunError> {
        let header = read_header(path, &self.options).map_err(|source| RunError::Ingest {
            path: path.to_path_buf(),
            source,
        })?;
        let header_map =
            resolve_header(&header, &self.registry, required).map_err(|source| {
                RunError::Resolve {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        let reader =
            RecordReader::open(path, &self.options, &header_map).map_err(|source| {
                RunError::Ingest {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let mut rows = 0u64;
        let mut admitted = 0u64;
        for record in reader {
            let record = record.map_err(|source| RunError::Ingest {
                path: path.to_path_buf(),
                source,
            })?;
            rows += 1;
            if !constraints_satisfied(&record, &self.constraints).map_err(|source| {
                RunError::Constraint {
                    path: path.to_path_buf(),
                    source,
                }
            })? {
                continue;
            }
            admitted += 1;
            for (alias, counter) in &mut self.counters {
                if let Some(value) = record.get(alias) {
                    counter.record(value);
                }
            }
        }
        debug!(rows, admitted, "file pass complete");
        Ok(())
    }
}

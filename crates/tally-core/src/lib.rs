//! Tally core: constraint evaluation and the multi-file aggregator.
//!
//! Files are processed strictly one at a time; within a file, rows are
//! pulled lazily. Each file's header is resolved against the alias
//! registry, admitted rows increment the tracked counters, and any
//! per-file failure aborts the whole run.

pub mod eval;
pub mod tally;

pub use eval::{ConstraintError, constraints_satisfied};
pub use tally::{FileProgress, MultiFileTally, RunError};

//! Library surface of the `tally` binary: argument definitions, command
//! orchestration, logging setup, and summary printing.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;

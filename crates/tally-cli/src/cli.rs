//! CLI argument definitions for tally.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Frequency tallies over delimited text files",
    long_about = "Count how often each value occurs in chosen columns across one or\n\
                  more delimited text files, even when the files name those columns\n\
                  differently. Rows can be filtered with comparison constraints;\n\
                  each tallied column produces a ranked top-N report file."
)]
pub struct Cli {
    /// Input files or directories (a directory expands to its regular
    /// files, sorted by name).
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Logical field to tally; repeat for several counters.
    #[arg(long = "count", value_name = "ALIAS", required = true)]
    pub counts: Vec<String>,

    /// Row admission constraint such as "status==certified" or
    /// "wage>=60000"; repeat to require several (all must hold).
    #[arg(long = "filter", value_name = "ALIAS<OP>VALUE")]
    pub filters: Vec<String>,

    /// Extra candidate header name for an alias, e.g.
    /// "status=CASE_STATUS"; repeatable.
    #[arg(long = "alias", value_name = "ALIAS=HEADER")]
    pub aliases: Vec<String>,

    /// JSON alias registry file mapping each alias to its candidate
    /// header names.
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Field delimiter applied uniformly to every input file.
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR", default_value = ";")]
    pub delimiter: char,

    /// Number of entries per report.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Directory for report files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Count column label in report headers.
    #[arg(long = "count-label", value_name = "LABEL", default_value = "COUNT")]
    pub count_label: String,

    /// Substitute invalid characters with '?' instead of failing.
    #[arg(long = "lenient-encoding")]
    pub lenient_encoding: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

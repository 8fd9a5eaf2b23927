//! Orchestration of a tally invocation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use tally_core::MultiFileTally;
use tally_ingest::{EncodingMode, IngestOptions};
use tally_map::AliasRegistry;
use tally_model::{CompareOp, CompareValue, Constraint};
use tally_report::{ReportColumns, write_top_n};

use crate::cli::Cli;
use crate::types::{ReportEntry, ReportSummary, TallyOutcome};

/// Runs a full tally: discover inputs, build the registry and
/// constraints, process every file, write one report per counter.
pub fn run_tally(cli: &Cli) -> Result<TallyOutcome> {
    let delimiter = ascii_delimiter(cli.delimiter)?;
    let files = discover_inputs(&cli.inputs)?;
    if files.is_empty() {
        bail!("no input files found");
    }
    debug!(files = files.len(), "inputs discovered");

    let mut registry = match &cli.registry {
        Some(path) => AliasRegistry::from_path(path)?,
        None => AliasRegistry::new(),
    };
    for pair in &cli.aliases {
        let (alias, candidate) = parse_alias(pair)?;
        registry.add(alias, candidate);
    }

    let encoding = if cli.lenient_encoding {
        EncodingMode::Lenient
    } else {
        EncodingMode::Strict
    };
    let options = IngestOptions::default()
        .with_delimiter(delimiter)
        .with_encoding(encoding);

    let mut tally = MultiFileTally::new(files, options).with_registry(registry);
    for expr in &cli.filters {
        tally.add_constraint(parse_filter(expr)?);
    }
    for alias in &cli.counts {
        tally.add_counter(alias);
    }

    tally.run()?;

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create output dir: {}", cli.output_dir.display()))?;

    let mut reports = Vec::new();
    for (alias, counter) in tally.counters() {
        let path = cli
            .output_dir
            .join(format!("top_{}_{}.txt", cli.top, alias));
        let columns = ReportColumns::new(
            format!("TOP_{}", alias.to_uppercase()),
            &cli.count_label,
            "PERCENTAGE",
        );
        write_top_n(&path, &columns, counter, cli.top, cli.delimiter)?;
        let entries = counter
            .top_n(cli.top)
            .into_iter()
            .map(|(value, count)| ReportEntry {
                percent: counter.percent_label(&value),
                value: value.to_uppercase(),
                count,
            })
            .collect();
        reports.push(ReportSummary {
            alias: alias.clone(),
            path,
            total: counter.total(),
            entries,
        });
    }
    info!(reports = reports.len(), "tally complete");

    Ok(TallyOutcome {
        files_processed: tally.files_processed(),
        file_count: tally.file_count(),
        reports,
    })
}

fn ascii_delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        bail!("delimiter must be a single ASCII character, got '{delimiter}'");
    }
}

/// Expands the given inputs into an ordered file list. A directory
/// contributes its regular files sorted by name; files pass through in
/// the order given.
fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            let dir = fs::read_dir(input)
                .with_context(|| format!("read input dir: {}", input.display()))?;
            for entry in dir {
                let path = entry
                    .with_context(|| format!("read input dir: {}", input.display()))?
                    .path();
                if path.is_file() {
                    entries.push(path);
                }
            }
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            files.extend(entries);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    Ok(files)
}

/// Parses an `ALIAS=HEADER` candidate registration.
fn parse_alias(pair: &str) -> Result<(&str, &str)> {
    let Some((alias, candidate)) = pair.split_once('=') else {
        bail!("alias '{pair}' must have the form ALIAS=HEADER");
    };
    let alias = alias.trim();
    let candidate = candidate.trim();
    if alias.is_empty() || candidate.is_empty() {
        bail!("alias '{pair}' must have the form ALIAS=HEADER");
    }
    Ok((alias, candidate))
}

/// Parses an `ALIAS<OP>VALUE` constraint. The comparison value's type is
/// inferred once, here: number, else ISO timestamp, else text.
fn parse_filter(expr: &str) -> Result<Constraint> {
    for (idx, _) in expr.char_indices() {
        let rest = &expr[idx..];
        for symbol in ["<=", ">=", "==", "<", ">"] {
            if let Some(raw) = rest.strip_prefix(symbol) {
                let alias = expr[..idx].trim();
                let raw = raw.trim();
                if alias.is_empty() || raw.is_empty() {
                    bail!("filter '{expr}' must have the form ALIAS<OP>VALUE");
                }
                let op = CompareOp::from_symbol(symbol)?;
                return Ok(Constraint::new(alias, op, CompareValue::infer(raw)));
            }
        }
    }
    bail!("filter '{expr}' has no comparison operator (expected ==, <, <=, >, >=)");
}

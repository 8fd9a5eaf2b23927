//! Ranked top-N report files.
//!
//! Each report covers one counter: a header line of three
//! delimiter-joined field names followed by up to N body lines of
//! `NAME;COUNT;PERCENTAGE`, ranked descending by count with ties broken
//! by ascending name.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tally_model::ValueCounter;

/// The three header field names of a report: item label, count label,
/// percentage label.
#[derive(Debug, Clone)]
pub struct ReportColumns {
    pub item: String,
    pub count: String,
    pub percent: String,
}

impl ReportColumns {
    pub fn new(
        item: impl Into<String>,
        count: impl Into<String>,
        percent: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            count: count.into(),
            percent: percent.into(),
        }
    }

    fn header_line(&self, delimiter: char) -> String {
        let mut line = String::new();
        line.push_str(&self.item);
        line.push(delimiter);
        line.push_str(&self.count);
        line.push(delimiter);
        line.push_str(&self.percent);
        line
    }
}

/// Renders the top `n` entries of `counter` as report body lines: the
/// upper-cased value, its count, and its percentage of the counter's
/// total to one decimal place with a trailing `%`.
pub fn render_top_n(counter: &ValueCounter, n: usize, delimiter: char) -> Vec<String> {
    counter
        .top_n(n)
        .into_iter()
        .map(|(value, count)| {
            format!(
                "{}{delimiter}{count}{delimiter}{}",
                value.to_uppercase(),
                counter.percent_label(&value)
            )
        })
        .collect()
}

/// Writes a complete top-N report to `path`: header line plus body.
pub fn write_top_n(
    path: &Path,
    columns: &ReportColumns,
    counter: &ValueCounter,
    n: usize,
    delimiter: char,
) -> Result<()> {
    let mut contents = columns.header_line(delimiter);
    contents.push('\n');
    for line in render_top_n(counter, n, delimiter) {
        contents.push_str(&line);
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("write report: {}", path.display()))?;
    info!(path = %path.display(), entries = counter.len().min(n), "report written");
    Ok(())
}

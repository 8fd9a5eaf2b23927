//! Integration tests for multi-file aggregation.

use std::path::PathBuf;

use tempfile::TempDir;

use tally_core::{MultiFileTally, RunError};
use tally_ingest::IngestOptions;
use tally_model::{CompareOp, CompareValue};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn certified_tally(files: Vec<PathBuf>) -> MultiFileTally {
    let mut tally = MultiFileTally::new(files, IngestOptions::default());
    tally.register_alias("status", "STATUS");
    tally.register_alias("status", "CASE_STATUS");
    tally.register_alias("occupation", "OCCUPATION");
    tally.register_alias("occupation", "SOC_NAME");
    tally.constrain("status", CompareOp::Eq, CompareValue::text("certified"));
    tally.add_counter("occupation");
    tally
}

#[test]
fn test_counts_across_files() {
    let dir = TempDir::new().unwrap();
    let file_a = write_file(
        &dir,
        "a.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n2;denied;nurse\n3;certified;welder\n",
    );
    let file_b = write_file(
        &dir,
        "b.csv",
        "ID;STATUS;OCCUPATION\n4;certified;nurse\n5;certified;welder\n6;certified;welder\n",
    );

    let mut tally = certified_tally(vec![file_a, file_b]);
    tally.run().unwrap();

    let counter = &tally.counters()["occupation"];
    assert_eq!(counter.get("nurse"), 2);
    assert_eq!(counter.get("welder"), 3);
    assert_eq!(counter.total(), 5);
    assert_eq!(tally.files_processed(), 2);
}

#[test]
fn test_heterogeneous_headers_share_one_counter() {
    // Same logical fields, different raw column names and order.
    let dir = TempDir::new().unwrap();
    let file_a = write_file(
        &dir,
        "a.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n",
    );
    let file_b = write_file(
        &dir,
        "b.csv",
        "SOC_NAME;ID;CASE_STATUS\nnurse;2;certified\nwelder;3;certified\n",
    );

    let mut tally = certified_tally(vec![file_a, file_b]);
    tally.run().unwrap();

    let counter = &tally.counters()["occupation"];
    assert_eq!(counter.get("nurse"), 2);
    assert_eq!(counter.get("welder"), 1);
}

#[test]
fn test_partition_invariance() {
    // Splitting one file's rows across two files with the same header
    // yields identical aggregate counts.
    let dir = TempDir::new().unwrap();
    let whole = write_file(
        &dir,
        "whole.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n2;certified;welder\n3;denied;nurse\n4;certified;nurse\n",
    );
    let part_one = write_file(
        &dir,
        "part1.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n2;certified;welder\n",
    );
    let part_two = write_file(
        &dir,
        "part2.csv",
        "ID;STATUS;OCCUPATION\n3;denied;nurse\n4;certified;nurse\n",
    );

    let mut combined = certified_tally(vec![whole]);
    combined.run().unwrap();
    let mut split = certified_tally(vec![part_one, part_two]);
    split.run().unwrap();

    let combined_counter = &combined.counters()["occupation"];
    let split_counter = &split.counters()["occupation"];
    assert_eq!(
        combined_counter.top_n(usize::MAX),
        split_counter.top_n(usize::MAX)
    );
}

#[test]
fn test_no_constraints_counts_every_row() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "a.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n2;denied;nurse\n",
    );
    let mut tally = MultiFileTally::new(vec![file], IngestOptions::default());
    tally.register_alias("occupation", "OCCUPATION");
    tally.add_counter("occupation");
    tally.run().unwrap();

    assert_eq!(tally.counters()["occupation"].get("nurse"), 2);
}

#[test]
fn test_numeric_constraint() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "a.csv",
        "CITY;POPULATION\nspringfield;30000\nshelbyville;8000\ncapital city;120000\n",
    );
    let mut tally = MultiFileTally::new(vec![file], IngestOptions::default());
    tally.register_alias("population", "POPULATION");
    tally.register_alias("city", "CITY");
    tally.constrain("population", CompareOp::Gt, CompareValue::Number(10_000.0));
    tally.add_counter("city");
    tally.run().unwrap();

    let counter = &tally.counters()["city"];
    assert_eq!(counter.total(), 2);
    assert_eq!(counter.get("shelbyville"), 0);
}

#[test]
fn test_schema_mismatch_aborts_before_counting() {
    let dir = TempDir::new().unwrap();
    let good = write_file(
        &dir,
        "good.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n",
    );
    // No candidate for "status" anywhere in this header.
    let bad = write_file(&dir, "bad.csv", "ID;OUTCOME;OCCUPATION\n2;certified;welder\n");

    let mut tally = certified_tally(vec![good, bad]);
    let err = tally.run().unwrap_err();
    assert!(matches!(err, RunError::Resolve { .. }));

    // The completed file's counts remain; nothing from the bad file was
    // counted.
    let counter = &tally.counters()["occupation"];
    assert_eq!(counter.get("nurse"), 1);
    assert_eq!(counter.get("welder"), 0);
    assert_eq!(tally.files_processed(), 1);
}

#[test]
fn test_constraint_type_error_aborts() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "a.csv", "CITY;POPULATION\nspringfield;unknown\n");
    let mut tally = MultiFileTally::new(vec![file], IngestOptions::default());
    tally.register_alias("population", "POPULATION");
    tally.register_alias("city", "CITY");
    tally.constrain("population", CompareOp::Gt, CompareValue::Number(10_000.0));
    tally.add_counter("city");

    let err = tally.run().unwrap_err();
    assert!(matches!(err, RunError::Constraint { .. }));
}

#[test]
fn test_second_run_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "a.csv",
        "ID;STATUS;OCCUPATION\n1;certified;nurse\n",
    );
    let mut tally = certified_tally(vec![file]);
    tally.run().unwrap();
    assert_eq!(tally.counters()["occupation"].get("nurse"), 1);

    let err = tally.run().unwrap_err();
    assert!(matches!(err, RunError::AlreadyRun));
    // Counts are untouched by the rejected second run.
    assert_eq!(tally.counters()["occupation"].get("nurse"), 1);
}

#[test]
fn test_progress_advances_per_file() {
    let dir = TempDir::new().unwrap();
    let file_a = write_file(&dir, "a.csv", "ID;STATUS;OCCUPATION\n1;certified;nurse\n");
    let file_b = write_file(&dir, "b.csv", "ID;STATUS;OCCUPATION\n2;certified;nurse\n");

    let mut tally = certified_tally(vec![file_a, file_b]);
    let mut seen = Vec::new();
    tally
        .run_with_progress(|progress| {
            seen.push((
                progress.files_processed,
                progress.file_count,
                progress.counters["occupation"].total(),
            ));
        })
        .unwrap();

    // Counts observed mid-run are cumulative up to each completed file.
    assert_eq!(seen, vec![(1, 2, 1), (2, 2, 2)]);
    assert_eq!(tally.files_processed(), tally.file_count());
}

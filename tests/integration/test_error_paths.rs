//! End-to-end CLI tests for the failure paths.
//!
//! Each failing invocation must exit non-zero with a descriptive message on
//! stderr; output files flushed before a fatal condition stay on disk.

use std::process::Command;
use tempfile::TempDir;

use bamux_lib::sam::builder::RecordBuilder;

use crate::helpers::assertions::assert_record_names;
use crate::helpers::bam_generator::{create_header, tagged_record, unmapped_record, write_bam};

#[test]
fn test_split_without_mode_is_a_user_error() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    write_bam(&input_bam, &header, vec![unmapped_record("r0")]);

    let output = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run split command");

    assert!(!output.status.success(), "missing split mode must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No property given to split on"), "stderr was: {stderr}");

    // Nothing was read, nothing was written
    let outputs: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.starts_with("out."))
        .collect();
    assert!(outputs.is_empty(), "no output files expected, found: {outputs:?}");
}

#[test]
fn test_split_missing_input_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args(["split", "--input", "/nonexistent/input.bam", "--mapped"])
        .output()
        .expect("Failed to run split command");

    assert!(!output.status.success(), "missing input must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr was: {stderr}");
}

#[test]
fn test_split_malformed_tag_name() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");

    let header = create_header(&[("chr1", 10000)]);
    write_bam(&input_bam, &header, vec![unmapped_record("r0")]);

    let output = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args(["split", "--input", input_bam.to_str().unwrap(), "--tag", "TOOLONG"])
        .output()
        .expect("Failed to run split command");

    assert!(!output.status.success(), "malformed tag name must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exactly 2 characters"), "stderr was: {stderr}");
}

#[test]
fn test_split_inconsistent_tag_type_aborts_but_keeps_written_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    // First RG value is text and locks the storage class; the numeric RG
    // later in the stream is a fatal inconsistency, not a skip.
    let header = create_header(&[("chr1", 10000)]);
    let records = vec![
        tagged_record("a0", "RG", "lib1"),
        tagged_record("a1", "RG", "lib1"),
        RecordBuilder::new().name("bad").sequence("ACGT").tag("RG", 7i32).build(),
        tagged_record("a2", "RG", "lib1"),
    ];
    write_bam(&input_bam, &header, records);

    let output = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--tag",
            "RG",
        ])
        .output()
        .expect("Failed to run split command");

    assert!(!output.status.success(), "inconsistent tag type must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("changed storage class"), "stderr was: {stderr}");

    // The sink opened before the abort was flushed, closed, and kept
    assert_record_names(&temp_dir.path().join("out.TAG_RG_lib1.bam"), &["a0", "a1"]);
}

#[test]
fn test_merge_is_declared_but_unimplemented() {
    let output = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args(["merge", "-i", "a.bam", "-i", "b.bam", "-o", "out.bam"])
        .output()
        .expect("Failed to run merge command");

    assert!(!output.status.success(), "merge must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not implemented"), "stderr was: {stderr}");
}

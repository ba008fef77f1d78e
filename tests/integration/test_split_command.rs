//! End-to-end CLI tests for the split command.
//!
//! These tests run the actual `bamux split` binary and validate:
//! 1. Per-mode output files and record routing
//! 2. Order preservation within each sink
//! 3. Stub resolution from the input filename

use std::process::Command;
use tempfile::TempDir;

use bamux_lib::sam::builder::RecordBuilder;

use crate::helpers::assertions::{assert_record_names, record_count};
use crate::helpers::bam_generator::{
    create_header, mapped_record, tagged_record, unmapped_record, write_bam,
};

#[test]
fn test_split_mapped_mode() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    let records = vec![
        mapped_record("m0", 0),
        mapped_record("m1", 0),
        unmapped_record("u0"),
        mapped_record("m2", 0),
        mapped_record("m3", 0),
        unmapped_record("u1"),
        mapped_record("m4", 0),
        unmapped_record("u2"),
    ];
    write_bam(&input_bam, &header, records);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--mapped",
        ])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");
    assert_record_names(&temp_dir.path().join("out.MAPPED.bam"), &["m0", "m1", "m2", "m3", "m4"]);
    assert_record_names(&temp_dir.path().join("out.UNMAPPED.bam"), &["u0", "u1", "u2"]);
}

#[test]
fn test_split_paired_mode() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    let records = vec![
        RecordBuilder::new().name("p0").sequence("ACGT").paired(true).first_segment(true).build(),
        RecordBuilder::new().name("p0").sequence("ACGT").paired(true).first_segment(false).build(),
        unmapped_record("s0"),
        RecordBuilder::new().name("p1").sequence("ACGT").paired(true).first_segment(true).build(),
    ];
    write_bam(&input_bam, &header, records);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--paired",
        ])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");

    let paired = temp_dir.path().join("out.PAIRED_END.bam");
    let single = temp_dir.path().join("out.SINGLE_END.bam");
    assert_record_names(&paired, &["p0", "p0", "p1"]);
    assert_record_names(&single, &["s0"]);
    // The two sinks partition the input: 3 + 1 = 4 records
    assert_eq!(record_count(&paired) + record_count(&single), 4);
}

#[test]
fn test_split_reference_mode_creates_only_observed_references() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    // chr3 is declared in the header but never observed in the records
    let header = create_header(&[("chr1", 10000), ("chr2", 5000), ("chr3", 2000)]);
    let records = vec![
        mapped_record("a0", 0),
        mapped_record("b0", 1),
        mapped_record("a1", 0),
        unmapped_record("u0"),
    ];
    write_bam(&input_bam, &header, records);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--reference",
        ])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");
    assert_record_names(&temp_dir.path().join("out.REF_chr1.bam"), &["a0", "a1"]);
    assert_record_names(&temp_dir.path().join("out.REF_chr2.bam"), &["b0"]);
    assert_record_names(&temp_dir.path().join("out.REF_unaligned.bam"), &["u0"]);
    assert!(!temp_dir.path().join("out.REF_chr3.bam").exists());
}

#[test]
fn test_split_tag_mode_string_values() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    let records = vec![
        tagged_record("a0", "RG", "lib1"),
        tagged_record("b0", "RG", "lib2"),
        unmapped_record("untagged"),
        tagged_record("a1", "RG", "lib1"),
    ];
    write_bam(&input_bam, &header, records);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--tag",
            "RG",
        ])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");
    assert_record_names(&temp_dir.path().join("out.TAG_RG_lib1.bam"), &["a0", "a1"]);
    assert_record_names(&temp_dir.path().join("out.TAG_RG_lib2.bam"), &["b0"]);
    // The untagged record is skipped, not routed anywhere
    let outputs: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.starts_with("out."))
        .collect();
    assert_eq!(outputs.len(), 2, "unexpected outputs: {outputs:?}");
}

#[test]
fn test_split_tag_mode_integer_values() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    let records = vec![
        RecordBuilder::new().name("z0").sequence("ACGT").tag("NM", 0i32).build(),
        RecordBuilder::new().name("o0").sequence("ACGT").tag("NM", 1i32).build(),
        RecordBuilder::new().name("z1").sequence("ACGT").tag("NM", 0i32).build(),
    ];
    write_bam(&input_bam, &header, records);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--tag",
            "NM",
        ])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");
    assert_record_names(&temp_dir.path().join("out.TAG_NM_0.bam"), &["z0", "z1"]);
    assert_record_names(&temp_dir.path().join("out.TAG_NM_1.bam"), &["o0"]);
}

#[test]
fn test_split_tag_absent_everywhere_succeeds_with_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    write_bam(&input_bam, &header, vec![unmapped_record("r0"), unmapped_record("r1")]);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args([
            "split",
            "--input",
            input_bam.to_str().unwrap(),
            "--stub",
            stub.to_str().unwrap(),
            "--tag",
            "Zq",
        ])
        .status()
        .expect("Failed to run split command");

    // Nothing to split on is not an error
    assert!(status.success(), "Split command should succeed");
    let outputs: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.starts_with("out."))
        .collect();
    assert!(outputs.is_empty(), "no output files expected, found: {outputs:?}");
}

#[test]
fn test_split_reads_standard_input() {
    use std::io::Write;
    use std::process::Stdio;

    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("input.bam");
    let stub = temp_dir.path().join("out");

    let header = create_header(&[("chr1", 10000)]);
    write_bam(&input_bam, &header, vec![mapped_record("m0", 0), unmapped_record("u0")]);
    let bytes = std::fs::read(&input_bam).unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args(["split", "--input", "-", "--stub", stub.to_str().unwrap(), "--mapped"])
        .stdin(Stdio::piped())
        .spawn()
        .expect("Failed to spawn split command");
    child.stdin.take().unwrap().write_all(&bytes).unwrap();
    let status = child.wait().expect("Failed to wait for split command");

    assert!(status.success(), "Split from stdin failed");
    assert_record_names(&temp_dir.path().join("out.MAPPED.bam"), &["m0"]);
    assert_record_names(&temp_dir.path().join("out.UNMAPPED.bam"), &["u0"]);
}

#[test]
fn test_split_stub_defaults_to_input_filename() {
    let temp_dir = TempDir::new().unwrap();
    let input_bam = temp_dir.path().join("reads.bam");

    let header = create_header(&[("chr1", 10000)]);
    write_bam(&input_bam, &header, vec![mapped_record("m0", 0)]);

    let status = Command::new(env!("CARGO_BIN_EXE_bamux"))
        .args(["split", "--input", input_bam.to_str().unwrap(), "--mapped"])
        .status()
        .expect("Failed to run split command");

    assert!(status.success(), "Split command failed");
    assert_record_names(&temp_dir.path().join("reads.MAPPED.bam"), &["m0"]);
}

//! BAM source and sink helpers.
//!
//! This module provides common utilities for opening the BAM source (a file
//! path or standard input) and for creating per-key output BAM writers with
//! consistent error handling.
//!
//! The split tool is a single-pass, single-threaded streamer: the source is
//! pulled one record at a time and every record is fully routed before the
//! next is read, so plain blocking readers and writers are all that is needed.

use anyhow::{Context, Result};
use noodles::bgzf;
use noodles::sam::Header;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Type alias for a BAM reader over a file or standard input.
pub type BamSource = noodles::bam::io::Reader<bgzf::io::Reader<Box<dyn Read>>>;

/// Type alias for an output BAM writer.
pub type BamWriter = noodles::bam::io::Writer<bgzf::io::Writer<File>>;

/// Check if a path refers to stdin.
///
/// Returns true if the path is "-" or "/dev/stdin".
///
/// # Example
/// ```
/// use bamux_lib::bam_io::is_stdin_path;
/// use std::path::Path;
///
/// assert!(is_stdin_path(Path::new("-")));
/// assert!(is_stdin_path(Path::new("/dev/stdin")));
/// assert!(!is_stdin_path(Path::new("input.bam")));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin"
}

/// Open the BAM source and read its header.
///
/// The path may name a file, or stdin via "-" / "/dev/stdin".
///
/// # Returns
/// A tuple of (BAM reader, header). The header carries the reference table
/// shared by every output sink.
///
/// # Errors
/// Returns an error if the file cannot be opened or the header cannot be read.
pub fn open_bam_source<P: AsRef<Path>>(path: P) -> Result<(BamSource, Header)> {
    let path_ref = path.as_ref();

    let inner: Box<dyn Read> = if is_stdin_path(path_ref) {
        Box::new(std::io::stdin().lock())
    } else {
        let file = File::open(path_ref)
            .with_context(|| format!("Failed to open input BAM: {}", path_ref.display()))?;
        Box::new(file)
    };

    let mut reader = noodles::bam::io::Reader::new(inner);
    let header = reader
        .read_header()
        .with_context(|| format!("Failed to read header from: {}", path_ref.display()))?;

    Ok((reader, header))
}

/// Create an output BAM writer and write the shared header.
///
/// # Arguments
/// * `path` - Path for the output BAM file
/// * `header` - SAM header to write (copied from the source, with @PG added)
/// * `compression_level` - BGZF compression level (1-12)
///
/// # Errors
/// Returns an error if the file cannot be created or the header cannot be
/// written. Callers treat this as fatal to the run.
pub fn create_bam_writer<P: AsRef<Path>>(
    path: P,
    header: &Header,
    compression_level: u32,
) -> Result<BamWriter> {
    use bgzf::io::writer::CompressionLevel;

    let path_ref = path.as_ref();
    let output_file = File::create(path_ref)
        .with_context(|| format!("Failed to create output BAM: {}", path_ref.display()))?;

    let mut builder = bgzf::io::writer::Builder::default();
    if let Ok(level) = CompressionLevel::try_from(compression_level as u8) {
        builder = builder.set_compression_level(level);
    }
    let bgzf_writer = builder.build_from_writer(output_file);

    let mut writer = noodles::bam::io::Writer::from(bgzf_writer);
    writer
        .write_header(header)
        .with_context(|| format!("Failed to write header to: {}", path_ref.display()))?;
    Ok(writer)
}

//! Single-pass BAM record splitting.
//!
//! This module ties the pieces of the split pipeline together:
//!
//! 1. [`stub::resolve_stub`] computes the common output filename prefix,
//! 2. [`key::KeyExtractor`] derives a [`key::PartitionKey`] per record for
//!    the selected [`SplitMode`],
//! 3. [`pool::WriterPool`] lazily opens one sink per distinct key and routes
//!    each record to exactly one of them, preserving per-sink order,
//! 4. [`split_records`] drains the source and guarantees the pool is torn
//!    down on every exit path.

pub mod key;
pub mod pool;
pub mod stub;

pub use key::{KeyExtractor, PartitionKey};
pub use pool::WriterPool;
pub use stub::resolve_stub;

use anyhow::{Context, Result};
use noodles::sam::Header;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::RecordBuf;

use crate::errors::SplitError;
use crate::progress::ProgressLogger;

use key::tag_label;

/// Fixed extension shared by every output file.
const OUTPUT_EXTENSION: &str = "bam";

// Filename tokens, matching the original tool's output naming.
const MAPPED_TOKEN: &str = "MAPPED";
const UNMAPPED_TOKEN: &str = "UNMAPPED";
const PAIRED_TOKEN: &str = "PAIRED_END";
const SINGLE_TOKEN: &str = "SINGLE_END";
const REFERENCE_TOKEN: &str = "REF_";
const TAG_TOKEN: &str = "TAG_";
/// Reference-mode token value for records with no reference id.
const UNALIGNED_REFERENCE_NAME: &str = "unaligned";

/// The user-selected split criterion.
#[derive(Debug, Clone)]
pub enum SplitMode {
    /// Split mapped vs unmapped records
    Mapped,
    /// Split paired-end vs single-end records
    Paired,
    /// Split by reference sequence
    Reference,
    /// Split by the values of the named tag
    Tag(Tag),
}

impl SplitMode {
    /// Short description for log output.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Mapped => "mapped/unmapped".to_string(),
            Self::Paired => "paired-end/single-end".to_string(),
            Self::Reference => "reference".to_string(),
            Self::Tag(tag) => format!("tag {}", tag_label(tag)),
        }
    }
}

/// Options for one split run.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Common prefix for every generated output filename
    pub stub: String,
    /// The selected split criterion
    pub mode: SplitMode,
    /// BGZF compression level for output sinks
    pub compression_level: u32,
}

/// Counters describing a completed split run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    /// Records pulled from the source
    pub records_read: u64,
    /// Records routed to a sink
    pub records_routed: u64,
    /// Records skipped because no key could be determined (tag absent)
    pub records_skipped: u64,
    /// Distinct sinks opened
    pub sinks_opened: usize,
}

/// Build the deterministic output filename for a key.
///
/// Patterns: `<stub>.MAPPED.bam` / `<stub>.UNMAPPED.bam`,
/// `<stub>.PAIRED_END.bam` / `<stub>.SINGLE_END.bam`,
/// `<stub>.REF_<name>.bam`, and `<stub>.TAG_<tag>_<value>.bam`.
///
/// The reference *name* is resolved from the header's reference table here,
/// for filename construction only; key equality uses the id.
///
/// # Errors
///
/// Returns [`SplitError::ReferenceNotFound`] when a record's reference id has
/// no entry in the header.
pub fn output_filename(
    stub: &str,
    mode: &SplitMode,
    key: &PartitionKey,
    header: &Header,
) -> std::result::Result<String, SplitError> {
    let filename = match key {
        PartitionKey::Mapped(true) => format!("{stub}.{MAPPED_TOKEN}.{OUTPUT_EXTENSION}"),
        PartitionKey::Mapped(false) => format!("{stub}.{UNMAPPED_TOKEN}.{OUTPUT_EXTENSION}"),
        PartitionKey::Paired(true) => format!("{stub}.{PAIRED_TOKEN}.{OUTPUT_EXTENSION}"),
        PartitionKey::Paired(false) => format!("{stub}.{SINGLE_TOKEN}.{OUTPUT_EXTENSION}"),
        PartitionKey::Reference(Some(id)) => {
            let (name, _) = header
                .reference_sequences()
                .get_index(*id)
                .ok_or(SplitError::ReferenceNotFound { ref_id: *id })?;
            format!("{stub}.{REFERENCE_TOKEN}{name}.{OUTPUT_EXTENSION}")
        }
        PartitionKey::Reference(None) => {
            format!("{stub}.{REFERENCE_TOKEN}{UNALIGNED_REFERENCE_NAME}.{OUTPUT_EXTENSION}")
        }
        PartitionKey::TagInt(_)
        | PartitionKey::TagUInt(_)
        | PartitionKey::TagFloat(_)
        | PartitionKey::TagString(_) => {
            let SplitMode::Tag(tag) = mode else {
                unreachable!("tag keys are only extracted in tag mode");
            };
            format!(
                "{stub}.{TAG_TOKEN}{}_{}.{OUTPUT_EXTENSION}",
                tag_label(tag),
                key.value_text()
            )
        }
    };
    Ok(filename)
}

/// Drain a record source into per-key sinks.
///
/// Each record with a determinable key is written to exactly one sink; a
/// record whose key cannot be determined (tag absent) is skipped. On the
/// fatal tag conditions (unsupported or inconsistent storage class) reading
/// stops immediately. On every exit path, including those aborts, all sinks
/// opened so far are flushed and closed exactly once; files already written
/// stay on disk.
///
/// # Errors
///
/// Propagates source read errors, sink open/write/close failures, and the
/// fatal tag-mode conditions.
pub fn split_records<I>(records: I, header: &Header, opts: &SplitOptions) -> Result<SplitSummary>
where
    I: IntoIterator<Item = std::io::Result<RecordBuf>>,
{
    let mut pool = WriterPool::new(header.clone(), opts.compression_level);
    let mut extractor = KeyExtractor::new(opts.mode.clone());
    let mut summary = SplitSummary::default();
    let mut progress = ProgressLogger::new("Processed records");

    let drained = drain(records, header, opts, &mut pool, &mut extractor, &mut summary, &mut progress);

    summary.sinks_opened = pool.len();
    let closed = pool.teardown();

    drained?;
    closed?;

    progress.finish();
    Ok(summary)
}

fn drain<I>(
    records: I,
    header: &Header,
    opts: &SplitOptions,
    pool: &mut WriterPool,
    extractor: &mut KeyExtractor,
    summary: &mut SplitSummary,
    progress: &mut ProgressLogger,
) -> Result<()>
where
    I: IntoIterator<Item = std::io::Result<RecordBuf>>,
{
    for result in records {
        let record = result.context("Failed to read record from input")?;
        summary.records_read += 1;
        progress.record(1);

        match extractor.extract(&record)? {
            None => summary.records_skipped += 1,
            Some(key) => {
                let filename = output_filename(&opts.stub, &opts.mode, &key, header)?;
                let sink = pool.resolve(key, &filename)?;
                sink.append(header, &record)?;
                summary.records_routed += 1;
            }
        }
    }

    Ok(())
}

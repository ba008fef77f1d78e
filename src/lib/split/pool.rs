//! Lazily-created pool of per-key output sinks.
//!
//! The pool owns every sink for the duration of a run. A sink is opened the
//! first time its key is seen and stays open until [`WriterPool::teardown`],
//! which must run on every exit path (normal completion, configuration error,
//! or extraction abort) so that each opened sink is flushed and closed exactly
//! once.

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::info;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record_buf::RecordBuf;

use crate::bam_io::{BamWriter, create_bam_writer};

use super::key::PartitionKey;

/// One output destination, bound to a single partition key.
pub struct Sink {
    writer: BamWriter,
    path: String,
    records_written: u64,
}

impl Sink {
    /// Append one record, preserving arrival order within this sink.
    pub fn append(&mut self, header: &Header, record: &RecordBuf) -> Result<()> {
        self.writer
            .write_alignment_record(header, record)
            .with_context(|| format!("Failed to write record to: {}", self.path))?;
        self.records_written += 1;
        Ok(())
    }

    /// The path this sink writes to.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of records appended so far.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

/// Maps partition keys to their sinks; keys are unique and looked up exactly.
pub struct WriterPool {
    header: Header,
    compression_level: u32,
    sinks: HashMap<PartitionKey, Sink>,
}

impl WriterPool {
    /// Create an empty pool. The header (with its reference table) is shared
    /// by every sink the pool opens and is not mutated afterwards.
    #[must_use]
    pub fn new(header: Header, compression_level: u32) -> Self {
        Self { header, compression_level, sinks: HashMap::new() }
    }

    /// Return the sink for `key`, opening it at `filename` on first sight.
    ///
    /// # Errors
    ///
    /// Sink creation fails if the destination cannot be created; this is
    /// fatal to the run, and the caller must still invoke [`Self::teardown`]
    /// for the sinks opened so far.
    pub fn resolve(&mut self, key: PartitionKey, filename: &str) -> Result<&mut Sink> {
        if !self.sinks.contains_key(&key) {
            info!("Opening output file: {filename}");
            let writer = create_bam_writer(filename, &self.header, self.compression_level)?;
            let sink = Sink { writer, path: filename.to_string(), records_written: 0 };
            self.sinks.insert(key.clone(), sink);
        }

        Ok(self.sinks.get_mut(&key).expect("sink was just inserted"))
    }

    /// Number of sinks opened so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sink has been opened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Flush and close every sink exactly once, then drop the pool.
    ///
    /// Safe to call with zero sinks. Closing continues past individual
    /// failures; the first failure is reported after all sinks were
    /// attempted.
    pub fn teardown(self) -> Result<()> {
        let Self { header, compression_level: _, sinks } = self;

        let mut first_error = None;
        for sink in sinks.into_values() {
            let Sink { mut writer, path, records_written } = sink;
            match writer.finish(&header) {
                Ok(()) => info!("Closed {path} ({records_written} records)"),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(
                            anyhow::Error::from(e)
                                .context(format!("Failed to close output BAM: {path}")),
                        );
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

//! Utilities for generating test BAM data programmatically.

use bamux_lib::sam::builder::RecordBuilder;
use bstr::BString;
use noodles::bam;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::header::record::value::{Map, map::ReferenceSequence};
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;

/// Creates a minimal SAM header with the given reference sequences.
///
/// # Arguments
///
/// * `refs` - (name, length) pairs for the reference table
///
/// # Returns
///
/// Configured SAM `Header`
pub fn create_header(refs: &[(&str, usize)]) -> Header {
    let mut builder = Header::builder();
    for (name, len) in refs {
        let ref_seq = Map::<ReferenceSequence>::new(
            NonZeroUsize::new(*len).expect("reference length must be non-zero"),
        );
        builder = builder.add_reference_sequence(BString::from(*name), ref_seq);
    }
    builder.build()
}

/// Writes records to a BAM file at `path` with the given header.
pub fn write_bam(path: &Path, header: &Header, records: Vec<RecordBuf>) {
    let mut writer = bam::io::Writer::new(File::create(path).expect("Failed to create BAM file"));
    writer.write_header(header).expect("Failed to write header");

    for record in records {
        writer.write_alignment_record(header, &record).expect("Failed to write record");
    }
    writer.finish(header).expect("Failed to finish BAM");
}

/// Creates a mapped record on the given reference.
pub fn mapped_record(name: &str, ref_id: usize) -> RecordBuf {
    RecordBuilder::new()
        .name(name)
        .sequence("ACGTACGT")
        .qualities(&[30; 8])
        .reference_sequence_id(ref_id)
        .alignment_start(100)
        .mapping_quality(60)
        .build()
}

/// Creates an unmapped record.
pub fn unmapped_record(name: &str) -> RecordBuf {
    RecordBuilder::new().name(name).sequence("ACGTACGT").qualities(&[30; 8]).build()
}

/// Creates an unmapped record carrying a string tag.
pub fn tagged_record(name: &str, tag: &str, value: &str) -> RecordBuf {
    RecordBuilder::new()
        .name(name)
        .sequence("ACGTACGT")
        .qualities(&[30; 8])
        .tag(tag, value)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_header() {
        let header = create_header(&[("chr1", 1000), ("chr2", 500)]);
        assert_eq!(header.reference_sequences().len(), 2);
    }

    #[test]
    fn test_record_shapes() {
        assert!(!mapped_record("m", 0).flags().is_unmapped());
        assert!(unmapped_record("u").flags().is_unmapped());
        assert!(!tagged_record("t", "RG", "lib1").data().is_empty());
    }
}

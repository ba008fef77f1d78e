//! Test-support builder for SAM record buffers.
//!
//! Assembles `RecordBuf`s with a fluent API so tests can state only the
//! fields they care about. Records default to unmapped single-end reads;
//! setting a reference sequence id makes the record mapped, and the pairing
//! setters maintain the segment flags.

use bstr::BString;
use noodles::core::Position;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record::MappingQuality;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::record_buf::{QualityScores, RecordBuf, Sequence};

/// Conversion into a tag value, for the types tests actually use.
pub trait IntoTagValue {
    /// Convert into a `RecordBuf` data field value.
    fn into_tag_value(self) -> Value;
}

impl IntoTagValue for &str {
    fn into_tag_value(self) -> Value {
        Value::String(BString::from(self))
    }
}

impl IntoTagValue for String {
    fn into_tag_value(self) -> Value {
        Value::String(BString::from(self))
    }
}

impl IntoTagValue for i8 {
    fn into_tag_value(self) -> Value {
        Value::Int8(self)
    }
}

impl IntoTagValue for i16 {
    fn into_tag_value(self) -> Value {
        Value::Int16(self)
    }
}

impl IntoTagValue for i32 {
    fn into_tag_value(self) -> Value {
        Value::Int32(self)
    }
}

impl IntoTagValue for u8 {
    fn into_tag_value(self) -> Value {
        Value::UInt8(self)
    }
}

impl IntoTagValue for u16 {
    fn into_tag_value(self) -> Value {
        Value::UInt16(self)
    }
}

impl IntoTagValue for u32 {
    fn into_tag_value(self) -> Value {
        Value::UInt32(self)
    }
}

impl IntoTagValue for f32 {
    fn into_tag_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoTagValue for Value {
    fn into_tag_value(self) -> Value {
        self
    }
}

/// Fluent builder for test records.
#[derive(Default)]
pub struct RecordBuilder {
    name: Option<String>,
    sequence: Option<String>,
    qualities: Option<Vec<u8>>,
    paired: bool,
    first_segment: Option<bool>,
    reference_sequence_id: Option<usize>,
    alignment_start: Option<usize>,
    mapping_quality: Option<u8>,
    tags: Vec<(Tag, Value)>,
}

impl RecordBuilder {
    /// Create a builder for an unmapped, single-end record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the read sequence.
    #[must_use]
    pub fn sequence(mut self, sequence: &str) -> Self {
        self.sequence = Some(sequence.to_string());
        self
    }

    /// Set per-base quality scores.
    #[must_use]
    pub fn qualities(mut self, qualities: &[u8]) -> Self {
        self.qualities = Some(qualities.to_vec());
        self
    }

    /// Mark the record as part of a read pair.
    #[must_use]
    pub fn paired(mut self, paired: bool) -> Self {
        self.paired = paired;
        self
    }

    /// Mark the record as R1 (`true`) or R2 (`false`); implies paired.
    #[must_use]
    pub fn first_segment(mut self, first: bool) -> Self {
        self.paired = true;
        self.first_segment = Some(first);
        self
    }

    /// Set the reference sequence id; the record becomes mapped.
    #[must_use]
    pub fn reference_sequence_id(mut self, id: usize) -> Self {
        self.reference_sequence_id = Some(id);
        self
    }

    /// Set the 1-based alignment start position.
    #[must_use]
    pub fn alignment_start(mut self, start: usize) -> Self {
        self.alignment_start = Some(start);
        self
    }

    /// Set the mapping quality.
    #[must_use]
    pub fn mapping_quality(mut self, mapq: u8) -> Self {
        self.mapping_quality = Some(mapq);
        self
    }

    /// Add a data field tag (e.g. `.tag("RG", "lib1")`, `.tag("NM", 2i32)`).
    ///
    /// # Panics
    /// Panics if the tag name is not exactly 2 bytes.
    #[must_use]
    pub fn tag(self, tag: &str, value: impl IntoTagValue) -> Self {
        self.tag_value(tag, value.into_tag_value())
    }

    /// Add a data field with an explicit `Value` (for variants without a
    /// plain-type shorthand, e.g. characters and arrays).
    ///
    /// # Panics
    /// Panics if the tag name is not exactly 2 bytes.
    #[must_use]
    pub fn tag_value(mut self, tag: &str, value: Value) -> Self {
        let bytes = tag.as_bytes();
        assert_eq!(bytes.len(), 2, "tag name must be exactly 2 bytes: {tag:?}");
        self.tags.push((Tag::from([bytes[0], bytes[1]]), value));
        self
    }

    /// Assemble the record.
    #[must_use]
    pub fn build(self) -> RecordBuf {
        let mut record = RecordBuf::default();

        let mut flags = Flags::empty();
        if self.reference_sequence_id.is_none() {
            flags.insert(Flags::UNMAPPED);
        }
        if self.paired {
            flags.insert(Flags::SEGMENTED);
            match self.first_segment {
                Some(true) => flags.insert(Flags::FIRST_SEGMENT),
                Some(false) => flags.insert(Flags::LAST_SEGMENT),
                None => {}
            }
        }
        *record.flags_mut() = flags;

        *record.name_mut() = self.name.map(BString::from);

        if let Some(sequence) = self.sequence {
            *record.sequence_mut() = Sequence::from(sequence.into_bytes());
        }
        if let Some(qualities) = self.qualities {
            *record.quality_scores_mut() = QualityScores::from(qualities);
        }

        *record.reference_sequence_id_mut() = self.reference_sequence_id;
        *record.alignment_start_mut() = self.alignment_start.and_then(Position::new);
        *record.mapping_quality_mut() = self.mapping_quality.and_then(MappingQuality::new);

        for (tag, value) in self.tags {
            record.data_mut().insert(tag, value);
        }

        record
    }
}

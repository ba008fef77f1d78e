//! Partition key extraction.
//!
//! Each record is assigned a [`PartitionKey`] derived from the selected
//! [`SplitMode`](super::SplitMode). The key is a tagged union over the value
//! types a split criterion can produce: booleans for the flag modes, an
//! optional reference id, and one of four typed tag families.
//!
//! In tag mode the storage class of the first record carrying the tag locks
//! the family for the remainder of the run; a later record whose tag uses a
//! different family aborts the run (reproducing the original tool's single
//! typed pass) rather than being skipped per record.

use std::hash::{Hash, Hasher};

use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::alignment::record_buf::data::field::Value;

use crate::errors::{Result, SplitError};

use super::SplitMode;

/// The value a record is partitioned on.
///
/// Equality and ordering are only ever compared within one variant per run;
/// the float variant compares and hashes by bit pattern, which is exact
/// equality with no normalization.
#[derive(Debug, Clone)]
pub enum PartitionKey {
    /// Mapped (`true`) vs unmapped (`false`) record
    Mapped(bool),
    /// Paired (`true`) vs single-end (`false`) record
    Paired(bool),
    /// Reference sequence id; `None` for records with no reference
    Reference(Option<usize>),
    /// Signed-integer tag value (`c`/`s`/`i` storage classes, widened)
    TagInt(i32),
    /// Unsigned-integer tag value (`C`/`S`/`I` storage classes, widened)
    TagUInt(u32),
    /// Floating-point tag value (`f` storage class)
    TagFloat(f32),
    /// Textual tag value (`A`/`Z`/`H` storage classes)
    TagString(String),
}

impl PartialEq for PartitionKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mapped(a), Self::Mapped(b)) | (Self::Paired(a), Self::Paired(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::TagInt(a), Self::TagInt(b)) => a == b,
            (Self::TagUInt(a), Self::TagUInt(b)) => a == b,
            (Self::TagFloat(a), Self::TagFloat(b)) => a.to_bits() == b.to_bits(),
            (Self::TagString(a), Self::TagString(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PartitionKey {}

impl Hash for PartitionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Mapped(v) | Self::Paired(v) => v.hash(state),
            Self::Reference(v) => v.hash(state),
            Self::TagInt(v) => v.hash(state),
            Self::TagUInt(v) => v.hash(state),
            Self::TagFloat(v) => v.to_bits().hash(state),
            Self::TagString(v) => v.hash(state),
        }
    }
}

/// The four recognized storage-class families for tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    /// Signed integers (`c`, `s`, `i`)
    Int,
    /// Unsigned integers (`C`, `S`, `I`)
    UInt,
    /// Single-precision floats (`f`)
    Float,
    /// Characters, strings, and hex strings (`A`, `Z`, `H`)
    Text,
}

impl TagFamily {
    /// Classify a tag value into a family, or `None` for storage classes the
    /// splitter does not recognize (arrays).
    #[must_use]
    pub fn classify(value: &Value) -> Option<Self> {
        match value {
            Value::Int8(_) | Value::Int16(_) | Value::Int32(_) => Some(Self::Int),
            Value::UInt8(_) | Value::UInt16(_) | Value::UInt32(_) => Some(Self::UInt),
            Value::Float(_) => Some(Self::Float),
            Value::Character(_) | Value::String(_) | Value::Hex(_) => Some(Self::Text),
            Value::Array(_) => None,
        }
    }

    /// Human-readable family name for error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Int => "signed integer",
            Self::UInt => "unsigned integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

/// The BAM type code of a tag value (e.g. `Z` for strings, `B` for arrays).
#[must_use]
pub fn type_code(value: &Value) -> char {
    match value {
        Value::Character(_) => 'A',
        Value::Int8(_) => 'c',
        Value::UInt8(_) => 'C',
        Value::Int16(_) => 's',
        Value::UInt16(_) => 'S',
        Value::Int32(_) => 'i',
        Value::UInt32(_) => 'I',
        Value::Float(_) => 'f',
        Value::String(_) => 'Z',
        Value::Hex(_) => 'H',
        Value::Array(_) => 'B',
    }
}

/// The two-character tag name as text, for filenames and error messages.
#[must_use]
pub fn tag_label(tag: &Tag) -> String {
    String::from_utf8_lossy(tag.as_ref()).into_owned()
}

/// Computes a [`PartitionKey`] per record for one split mode.
///
/// Holds the storage-class family locked in by the first tagged record when
/// running in tag mode.
pub struct KeyExtractor {
    mode: SplitMode,
    locked_family: Option<TagFamily>,
}

impl KeyExtractor {
    /// Create an extractor for the given split mode.
    #[must_use]
    pub fn new(mode: SplitMode) -> Self {
        Self { mode, locked_family: None }
    }

    /// The storage-class family locked in so far, if any (tag mode only).
    #[must_use]
    pub fn locked_family(&self) -> Option<TagFamily> {
        self.locked_family
    }

    /// Compute the partition key for one record.
    ///
    /// Returns `Ok(None)` when the key cannot be determined (tag absent on
    /// this record); the record is skipped, which is never an error.
    ///
    /// # Errors
    ///
    /// - [`SplitError::UnsupportedTagType`] when a tag value's storage class
    ///   is outside the four recognized families
    /// - [`SplitError::InconsistentTagType`] when a tag value's family
    ///   differs from the locked-in one
    ///
    /// Both abort the run; neither is a skippable condition.
    pub fn extract(&mut self, record: &RecordBuf) -> Result<Option<PartitionKey>> {
        match &self.mode {
            SplitMode::Mapped => Ok(Some(PartitionKey::Mapped(!record.flags().is_unmapped()))),
            SplitMode::Paired => Ok(Some(PartitionKey::Paired(record.flags().is_segmented()))),
            SplitMode::Reference => {
                Ok(Some(PartitionKey::Reference(record.reference_sequence_id())))
            }
            SplitMode::Tag(tag) => {
                let Some(value) = record.data().get(tag) else {
                    return Ok(None);
                };

                let Some(family) = TagFamily::classify(value) else {
                    return Err(SplitError::UnsupportedTagType {
                        tag: tag_label(tag),
                        type_code: type_code(value),
                    });
                };

                match self.locked_family {
                    None => self.locked_family = Some(family),
                    Some(expected) if expected != family => {
                        return Err(SplitError::InconsistentTagType {
                            tag: tag_label(tag),
                            expected: expected.label().to_string(),
                            found: family.label().to_string(),
                        });
                    }
                    Some(_) => {}
                }

                Ok(Some(typed_key(value, family)))
            }
        }
    }
}

/// Extract the typed key for a value known to belong to `family`.
fn typed_key(value: &Value, family: TagFamily) -> PartitionKey {
    match (family, value) {
        (TagFamily::Int, Value::Int8(v)) => PartitionKey::TagInt(i32::from(*v)),
        (TagFamily::Int, Value::Int16(v)) => PartitionKey::TagInt(i32::from(*v)),
        (TagFamily::Int, Value::Int32(v)) => PartitionKey::TagInt(*v),
        (TagFamily::UInt, Value::UInt8(v)) => PartitionKey::TagUInt(u32::from(*v)),
        (TagFamily::UInt, Value::UInt16(v)) => PartitionKey::TagUInt(u32::from(*v)),
        (TagFamily::UInt, Value::UInt32(v)) => PartitionKey::TagUInt(*v),
        (TagFamily::Float, Value::Float(v)) => PartitionKey::TagFloat(*v),
        (TagFamily::Text, Value::Character(c)) => {
            PartitionKey::TagString(char::from(*c).to_string())
        }
        (TagFamily::Text, Value::String(s) | Value::Hex(s)) => {
            PartitionKey::TagString(String::from_utf8_lossy(s.as_ref()).into_owned())
        }
        // classify() guarantees family and variant agree
        _ => unreachable!("tag value does not match its classified family"),
    }
}

impl PartitionKey {
    /// The key's value rendered for filename construction.
    #[must_use]
    pub fn value_text(&self) -> String {
        match self {
            Self::Mapped(v) | Self::Paired(v) => v.to_string(),
            Self::Reference(Some(id)) => id.to_string(),
            Self::Reference(None) => "unaligned".to_string(),
            Self::TagInt(v) => v.to_string(),
            Self::TagUInt(v) => v.to_string(),
            Self::TagFloat(v) => v.to_string(),
            Self::TagString(v) => v.clone(),
        }
    }
}

//! SAM/BAM record utilities.
//!
//! Currently this module holds the test-support [`builder::RecordBuilder`]
//! used by unit and integration tests to assemble `RecordBuf`s concisely.

pub mod builder;

pub use builder::RecordBuilder;

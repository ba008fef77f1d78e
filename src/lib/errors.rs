//! Custom error types for bamux operations.

use thiserror::Error;

/// Result type alias for bamux operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Error type for split operations
#[derive(Error, Debug)]
pub enum SplitError {
    /// No split criterion was selected on the command line
    #[error(
        "No property given to split on. Use --mapped, --paired, --reference, or --tag TAG to specify split behavior"
    )]
    NoSplitMode,

    /// A tag value uses a storage class outside the four recognized families
    #[error("Unknown storage class '{type_code}' for tag '{tag}'")]
    UnsupportedTagType {
        /// The tag name
        tag: String,
        /// The BAM type code of the offending value (e.g. 'B')
        type_code: char,
    },

    /// A tag value's storage class differs from the one locked in by the
    /// first record that carried the tag
    #[error("Tag '{tag}' changed storage class mid-file: expected {expected}, found {found}")]
    InconsistentTagType {
        /// The tag name
        tag: String,
        /// The storage class family seen on the first tagged record
        expected: String,
        /// The storage class family on the offending record
        found: String,
    },

    /// A record's reference id has no entry in the header's reference table
    #[error("Reference id {ref_id} not found in header")]
    ReferenceNotFound {
        /// The out-of-range reference sequence id
        ref_id: usize,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "BAM")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}

//! Input validation utilities
//!
//! This module provides common validation functions for command-line
//! parameters, file paths, and SAM tags with consistent error messages.
//!
//! All validation functions use structured error types from [`crate::errors`]
//! to provide rich contextual information when validation fails.

use crate::errors::{Result, SplitError};
use noodles::sam::alignment::record::data::field::Tag;
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input BAM")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use bamux_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "Input BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(SplitError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a SAM tag is exactly 2 characters
///
/// # Arguments
/// * `tag` - Tag string to validate
/// * `name` - Name of the parameter for error messages
///
/// # Returns
/// A 2-byte array representing the tag
///
/// # Errors
/// Returns an error if the tag is not exactly 2 characters
///
/// # Example
/// ```
/// use bamux_lib::validation::validate_tag;
///
/// let tag = validate_tag("RG", "split tag").unwrap();
/// assert_eq!(tag, [b'R', b'G']);
///
/// let result = validate_tag("ABC", "split tag");
/// assert!(result.is_err());
/// ```
pub fn validate_tag(tag: &str, name: &str) -> Result<[u8; 2]> {
    if tag.len() != 2 {
        return Err(SplitError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Tag must be exactly 2 characters, got: '{tag}'"),
        });
    }
    let bytes = tag.as_bytes();
    Ok([bytes[0], bytes[1]])
}

/// Convert a validated string tag to the noodles Tag type
///
/// This combines validation and conversion for convenience.
///
/// # Errors
/// Returns an error if the tag is not exactly 2 characters
///
/// # Example
/// ```
/// use bamux_lib::validation::string_to_tag;
///
/// let tag = string_to_tag("RG", "split tag").unwrap();
/// ```
pub fn string_to_tag(tag: &str, name: &str) -> Result<Tag> {
    let tag_array = validate_tag(tag, name)?;
    Ok(Tag::from(tag_array))
}

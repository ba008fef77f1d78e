//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`, plus the @PG header helper
//! every command uses before writing output.

use anyhow::Result;
use clap::Args;
use noodles::sam::Header;

/// Options for output compression.
///
/// Controls BGZF compression level for output BAM files.
#[derive(Debug, Clone, Default, Args)]
pub struct CompressionOptions {
    /// Compression level for output BAM (1-12).
    ///
    /// Level 1 is fastest with larger files.
    /// Level 12 produces smallest files but is slowest.
    #[arg(long, default_value_t = 1)]
    pub compression_level: u32,
}

/// Add the bamux @PG record (with PP chaining) to a header.
///
/// # Errors
///
/// Returns an error if the program record cannot be added to the header.
pub fn add_pg_record(header: Header, command_line: &str) -> Result<Header> {
    bamux_lib::header::add_pg_record(header, crate::version::VERSION.as_str(), command_line)
}

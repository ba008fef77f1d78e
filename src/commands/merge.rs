//! Merge multiple BAM files into one.
//!
//! The subcommand is declared so the CLI surface matches the toolkit's shape,
//! but the multi-way merge itself is not implemented; executing it reports
//! that and fails.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::commands::command::Command;
use crate::commands::common::CompressionOptions;

/// Merge multiple sorted BAM files into one output (not yet implemented).
#[derive(Debug, Parser)]
#[command(
    name = "merge",
    about = "\x1b[38;5;166m[TOOLKIT]\x1b[0m       \x1b[36mMerge multiple BAM files into one (not yet implemented)\x1b[0m"
)]
pub struct Merge {
    /// Input BAM files
    #[arg(short = 'i', long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output BAM file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Compression options for the output BAM.
    #[command(flatten)]
    pub compression: CompressionOptions,
}

impl Command for Merge {
    fn execute(&self, _command_line: &str) -> Result<()> {
        anyhow::bail!("The merge command is not implemented yet")
    }
}

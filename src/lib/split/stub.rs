//! Output filename stub resolution.
//!
//! Every output file of a split run shares one filename prefix (the "stub").
//! Resolution is pure computation: no I/O, no failure.

use std::path::Path;

/// Resolve the filename stub shared by all outputs of a run.
///
/// Policy, first match wins:
/// 1. an explicit `--stub` is used verbatim;
/// 2. else an explicit input filename is used with its final `.`-delimited
///    extension removed (matching the original tool, the *last* dot anywhere
///    in the path is the cut point, even when it sits in a directory
///    component);
/// 3. else (reading standard input) a human-readable timestamp with all
///    whitespace replaced by underscores.
#[must_use]
pub fn resolve_stub(custom: Option<&str>, input: Option<&Path>) -> String {
    if let Some(stub) = custom {
        return stub.to_string();
    }

    if let Some(path) = input {
        return remove_filename_extension(&path.to_string_lossy());
    }

    timestamp_stub()
}

/// Remove everything from the last dot onward, so `/path/to/file.bam`
/// becomes `/path/to/file`. A dotless string is returned unchanged.
fn remove_filename_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[..idx].to_string(),
        None => filename.to_string(),
    }
}

/// Human-readable local timestamp with whitespace converted to underscores,
/// e.g. `Thu_Aug__7_14:02:45_2026`.
fn timestamp_stub() -> String {
    let now = chrono::Local::now();
    now.format("%a %b %e %H:%M:%S %Y")
        .to_string()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

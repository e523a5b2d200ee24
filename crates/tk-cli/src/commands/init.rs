//! Init command: append an empty tracker block to a note.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tk_core::{EMPTY_CODEBLOCK, find_codeblocks};

/// Appends an empty `timekeep` block, creating the file if needed.
pub fn run<W: Write>(writer: &mut W, file: &Path) -> Result<()> {
    let existing = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", file.display()));
        }
    };
    let index = find_codeblocks(&existing).len();

    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("failed to open {}", file.display()))?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        handle.write_all(b"\n")?;
    }
    handle
        .write_all(EMPTY_CODEBLOCK.as_bytes())
        .with_context(|| format!("failed to write {}", file.display()))?;

    tracing::debug!(path = %file.display(), index, "appended tracker block");
    writeln!(writer, "Added tracker block {index} to {}", file.display())?;
    Ok(())
}

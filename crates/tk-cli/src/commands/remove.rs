//! Remove command: delete an entry, collapsing groups left with one child.

use std::io::Write;

use anyhow::Result;
use tk_core::{Timekeep, remove_entry};

use super::util::find_entry;
use crate::TrackerFile;
use crate::cli::Target;

pub fn run<W: Write>(writer: &mut W, target: &Target, path: &str) -> Result<()> {
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;

    let entry = find_entry(entries, path)?;
    let updated = remove_entry(entries, entry);
    tracker.save(&Timekeep::new(updated))?;

    writeln!(writer, "Removed {}", entry.name())?;
    Ok(())
}

//! Rename command: replace an entry with a renamed copy.

use std::io::Write;

use anyhow::Result;
use tk_core::{TimeEntry, Timekeep, update_entry};

use super::util::find_entry;
use crate::TrackerFile;
use crate::cli::Target;

pub fn run<W: Write>(writer: &mut W, target: &Target, path: &str, name: &str) -> Result<()> {
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;

    let entry = find_entry(entries, path)?;
    let renamed = match entry.as_ref() {
        TimeEntry::Leaf {
            start_time,
            end_time,
            ..
        } => TimeEntry::leaf(name, *start_time, *end_time),
        TimeEntry::Group { sub_entries, .. } => TimeEntry::group(name, sub_entries.clone()),
    };
    tracker.save(&Timekeep::new(update_entry(entries, entry, &renamed)))?;

    writeln!(writer, "Renamed {} to {name}", entry.name())?;
    Ok(())
}

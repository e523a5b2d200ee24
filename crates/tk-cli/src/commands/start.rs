//! Start command: begin a new entry or split an existing one.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tk_core::{
    Timekeep, create_entry, find_running, stop_running_entries, update_entry, with_sub_entry,
};

use super::util::find_entry;
use crate::TrackerFile;
use crate::cli::Target;

/// Starts a top-level entry, or a sub-entry of the entry at `into`.
///
/// Starting a sub-entry stops whatever was running first; starting a
/// top-level entry refuses to run while something is running.
pub fn run<W: Write>(
    writer: &mut W,
    target: &Target,
    name: &str,
    into: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;

    let Some(path) = into else {
        if let Some(running) = find_running(entries) {
            bail!("{} is already running; stop it first", running.name());
        }

        let name = if name.trim().is_empty() {
            format!("Block {}", entries.len() + 1)
        } else {
            name.to_string()
        };

        let mut updated = entries.clone();
        updated.push(create_entry(name.clone(), now));
        tracker.save(&Timekeep::new(updated))?;

        writeln!(writer, "Started {name}")?;
        return Ok(());
    };

    // Paths are positional, so they still address the same entry once stopped.
    let stopped = stop_running_entries(entries, now);
    let parent = find_entry(&stopped, path)?;
    let split = with_sub_entry(parent, name, now);
    let updated = update_entry(&stopped, parent, &split);

    tracker.save(&Timekeep::new(updated))?;

    let started = split
        .sub_entries()
        .and_then(<[_]>::last)
        .map_or("", |entry| entry.name());
    writeln!(writer, "Started {started} in {}", split.name())?;
    Ok(())
}

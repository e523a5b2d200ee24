//! Stop command: close the running entry.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tk_core::{Timekeep, entry_duration, find_running, stop_running_entries};

use crate::cli::Target;
use crate::format::display_duration;
use crate::{Config, TrackerFile};

pub fn run<W: Write>(
    writer: &mut W,
    target: &Target,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<()> {
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;

    let Some(running) = find_running(entries) else {
        writeln!(writer, "Nothing is running.")?;
        return Ok(());
    };
    let elapsed = display_duration(entry_duration(running, now), config);

    tracker.save(&Timekeep::new(stop_running_entries(entries, now)))?;

    writeln!(writer, "Stopped {} after {elapsed}", running.name())?;
    Ok(())
}

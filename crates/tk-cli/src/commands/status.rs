//! Status command: running entry, totals and the entry tree.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tk_core::{
    EntryRef, TimeEntry, entries_ordered, entry_duration, find_running, same_entry,
    total_duration,
};

use crate::cli::Target;
use crate::format::{display_duration, format_timestamp};
use crate::{Config, TrackerFile};

/// JSON status structure.
#[derive(Debug, Serialize)]
pub struct JsonStatus {
    pub running: Option<JsonRunning>,
    pub total_ms: i64,
    pub entry_count: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonRunning {
    pub name: String,
    pub started_at: String,
    pub elapsed_ms: i64,
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    target: &Target,
    config: &Config,
    now: &DateTime<Tz>,
    json: bool,
) -> Result<()>
where
    Tz::Offset: Display,
{
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;
    let now_utc = now.with_timezone(&Utc);

    let running = find_running(entries);
    let total = total_duration(entries, now_utc);

    if json {
        let status = JsonStatus {
            running: running.and_then(|entry| match entry.as_ref() {
                TimeEntry::Leaf {
                    name, start_time, ..
                } => Some(JsonRunning {
                    name: name.clone(),
                    started_at: start_time.to_rfc3339(),
                    elapsed_ms: entry_duration(entry, now_utc),
                }),
                TimeEntry::Group { .. } => None,
            }),
            total_ms: total,
            entry_count: entries.len(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&status)?)?;
        return Ok(());
    }

    match running {
        Some(entry) => writeln!(
            writer,
            "Running: {} ({})",
            entry.name(),
            display_duration(entry_duration(entry, now_utc), config)
        )?,
        None => writeln!(writer, "Not running.")?,
    }
    writeln!(writer, "Total:   {}", display_duration(total, config))?;

    if entries.is_empty() {
        writeln!(writer, "No entries.")?;
        return Ok(());
    }

    writeln!(writer)?;
    write_tree(writer, entries, "", config, now)
}

fn write_tree<W: Write, Tz: TimeZone>(
    writer: &mut W,
    entries: &[EntryRef],
    prefix: &str,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<()>
where
    Tz::Offset: Display,
{
    let now_utc = now.with_timezone(&Utc);
    let depth = prefix.matches('.').count();
    let indent = "  ".repeat(depth);

    for entry in entries_ordered(entries, config.reverse_segment_order) {
        // Paths always use stored positions, whatever the display order.
        let index = entries
            .iter()
            .position(|candidate| same_entry(candidate, entry))
            .unwrap_or_default();
        let path = format!("{prefix}{index}");
        let duration = display_duration(entry_duration(entry, now_utc), config);

        match entry.as_ref() {
            TimeEntry::Leaf {
                name,
                start_time,
                end_time,
            } => {
                let start = format_timestamp(*start_time, &now.timezone(), config);
                let end = end_time.map_or_else(
                    || "running".to_string(),
                    |end| format_timestamp(end, &now.timezone(), config),
                );
                writeln!(writer, "{indent}[{path}] {name}  {start} - {end}  ({duration})")?;
            }
            TimeEntry::Group { name, sub_entries } => {
                writeln!(writer, "{indent}[{path}] {name}  ({duration})")?;
                write_tree(writer, sub_entries, &format!("{path}."), config, now)?;
            }
        }
    }

    Ok(())
}

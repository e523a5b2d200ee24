//! Week command: per-day totals for the week containing now.
//!
//! Days run from local midnight to local midnight in the time zone `now`
//! carries; entries spanning midnight are split between the two days.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc, Weekday};
use tk_core::{total_duration, total_duration_on_day, week_start};

use crate::cli::Target;
use crate::format::display_duration;
use crate::{Config, TrackerFile};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    target: &Target,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<()>
where
    Tz::Offset: Display,
{
    let tracker = TrackerFile::open(&target.file, target.block)?;
    let entries = &tracker.timekeep.entries;

    let monday = week_start(now).unwrap_or_else(|| now.date_naive());
    writeln!(writer, "Week of {}", monday.format("%b %-d, %Y"))?;
    writeln!(writer)?;

    for weekday in WEEK {
        let day_total = total_duration_on_day(entries, now, weekday);
        writeln!(writer, "{weekday}  {}", display_duration(day_total, config))?;
    }

    let total = total_duration(entries, now.with_timezone(&Utc));
    writeln!(writer)?;
    writeln!(writer, "All time  {}", display_duration(total, config))?;
    Ok(())
}

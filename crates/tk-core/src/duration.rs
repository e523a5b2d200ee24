//! Elapsed-time aggregation over entry trees.
//!
//! All durations are in milliseconds. Open leaves are measured up to the
//! caller-supplied `now`; nothing here reads the clock.

use chrono::{
    DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday,
};

use crate::entry::{EntryRef, TimeEntry};

/// Duration of a single entry. Groups are the sum of their children.
pub fn entry_duration(entry: &TimeEntry, now: DateTime<Utc>) -> i64 {
    match entry {
        TimeEntry::Leaf {
            start_time,
            end_time,
            ..
        } => (end_time.unwrap_or(now) - *start_time).num_milliseconds(),
        TimeEntry::Group { sub_entries, .. } => total_duration(sub_entries, now),
    }
}

/// Sum of [`entry_duration`] over a list of entries.
pub fn total_duration(entries: &[EntryRef], now: DateTime<Utc>) -> i64 {
    entries.iter().map(|entry| entry_duration(entry, now)).sum()
}

/// Time spent on one weekday of the week containing `now`.
///
/// The week runs Monday to Sunday and day boundaries are local midnights in
/// `now`'s time zone. Each leaf interval is clipped to `[day start, next day
/// start)`; open leaves run until `now`. A day outside chrono's date range
/// counts as zero.
pub fn total_duration_on_day<Tz: TimeZone>(
    entries: &[EntryRef],
    now: &DateTime<Tz>,
    weekday: Weekday,
) -> i64 {
    let Some((day, next_day)) = week_start(now).and_then(|monday| {
        let day = monday.checked_add_days(Days::new(weekday.num_days_from_monday().into()))?;
        Some((day, day.checked_add_days(Days::new(1))?))
    }) else {
        return 0;
    };

    let tz = now.timezone();
    let day_start = local_midnight_to_utc(&tz, day);
    let day_end = local_midnight_to_utc(&tz, next_day);

    duration_within(entries, now.with_timezone(&Utc), day_start, day_end)
}

/// Local date of the Monday starting the week that contains `now`.
///
/// `None` only when that Monday precedes the earliest date chrono can represent.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<NaiveDate> {
    let today = now.date_naive();
    today.checked_sub_days(Days::new(today.weekday().num_days_from_monday().into()))
}

/// Converts ISO weekday numbers (1 = Monday .. 7 = Sunday).
pub const fn weekday_from_iso(day: u32) -> Option<Weekday> {
    match day {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

fn duration_within(
    entries: &[EntryRef],
    now: DateTime<Utc>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> i64 {
    entries
        .iter()
        .map(|entry| match entry.as_ref() {
            TimeEntry::Leaf {
                start_time,
                end_time,
                ..
            } => {
                let start = (*start_time).max(window_start);
                let end = end_time.unwrap_or(now).min(window_end);
                (end - start).num_milliseconds().max(0)
            }
            TimeEntry::Group { sub_entries, .. } => {
                duration_within(sub_entries, now, window_start, window_end)
            }
        })
        .sum()
}

/// Midnight of `date` in `tz`, as UTC.
/// Ambiguous midnights take the earlier instant; a midnight inside a DST gap
/// falls back to 01:00 local.
fn local_midnight_to_utc<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let resolve = |hour: u32| {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        match tz.from_local_datetime(&date.and_time(time)) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    };

    resolve(0)
        .or_else(|| resolve(1))
        // No zone skips two local hours at midnight; UTC midnight keeps this total.
        .unwrap_or_else(|| Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

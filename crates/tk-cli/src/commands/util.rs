//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use tk_core::EntryRef;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Parse a datetime string as either ISO 8601 or relative time.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(s: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s.trim()) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now - Duration::minutes(n * minutes_per_unit))
}

/// Parses a dot-separated entry path such as `1.0` into indices.
pub fn parse_entry_path(s: &str) -> anyhow::Result<Vec<usize>> {
    s.split('.')
        .map(|part| {
            part.trim().parse::<usize>().with_context(|| {
                format!("invalid entry path {s:?}; expected indices like 0 or 1.2")
            })
        })
        .collect()
}

/// Follows an entry path down the tree.
pub fn resolve_entry<'a>(entries: &'a [EntryRef], path: &[usize]) -> Option<&'a EntryRef> {
    let (first, rest) = path.split_first()?;
    let entry = entries.get(*first)?;
    if rest.is_empty() {
        Some(entry)
    } else {
        resolve_entry(entry.sub_entries()?, rest)
    }
}

/// Looks up an entry path, failing with a readable message.
pub fn find_entry<'a>(entries: &'a [EntryRef], path: &str) -> anyhow::Result<&'a EntryRef> {
    let indices = parse_entry_path(path)?;
    resolve_entry(entries, &indices).with_context(|| format!("no entry at path {path}"))
}

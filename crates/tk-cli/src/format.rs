//! Duration and timestamp formatting for terminal output.

use std::fmt::{Display, Write as _};

use chrono::{DateTime, TimeZone, Utc};

use crate::Config;

/// Formats milliseconds as `1h 2m 3s`, or `01:02:03` when `as_timestamp`.
/// Negative durations are shown as zero.
pub fn format_duration(ms: i64, as_timestamp: bool) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if as_timestamp {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Formats milliseconds as decimal hours, e.g. `12.14h`.
#[expect(
    clippy::cast_precision_loss,
    reason = "durations stay far below 2^52 ms"
)]
pub fn format_decimal_hours(ms: i64) -> String {
    format!("{:.2}h", ms.max(0) as f64 / 3_600_000.0)
}

/// Formats a duration according to the configured style.
pub fn display_duration(ms: i64, config: &Config) -> String {
    let formatted = format_duration(ms, config.timestamp_durations);
    if config.show_decimal_hours {
        format!("{formatted} ({})", format_decimal_hours(ms))
    } else {
        formatted
    }
}

/// Formats an instant in the time zone of `zone`.
/// An unusable `timestamp_format` falls back to RFC 3339.
pub fn format_timestamp<Tz: TimeZone>(time: DateTime<Utc>, zone: &Tz, config: &Config) -> String
where
    Tz::Offset: Display,
{
    let local = time.with_timezone(zone);
    let mut formatted = String::new();
    if write!(formatted, "{}", local.format(&config.timestamp_format)).is_err() {
        tracing::debug!(format = %config.timestamp_format, "invalid timestamp format");
        return local.to_rfc3339();
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_long() {
        assert_eq!(format_duration(0, false), "0s");
        assert_eq!(format_duration(59_999, false), "59s");
        assert_eq!(format_duration(61_000, false), "1m 1s");
        assert_eq!(format_duration(3_723_000, false), "1h 2m 3s");
        assert_eq!(format_duration(-5_000, false), "0s");
    }

    #[test]
    fn test_format_duration_timestamp() {
        assert_eq!(format_duration(3_723_000, true), "01:02:03");
        assert_eq!(format_duration(44_101_000, true), "12:15:01");
        assert_eq!(format_duration(100 * 3_600_000, true), "100:00:00");
    }

    #[test]
    fn test_format_decimal_hours() {
        assert_eq!(format_decimal_hours(43_719_000), "12.14h");
        assert_eq!(format_decimal_hours(0), "0.00h");
    }

    #[test]
    fn test_display_duration_honours_config() {
        let config = Config {
            timestamp_durations: true,
            show_decimal_hours: true,
            ..Config::default()
        };
        assert_eq!(display_duration(5_400_000, &config), "01:30:00 (1.50h)");
        assert_eq!(display_duration(5_400_000, &Config::default()), "1h 30m 0s");
    }

    #[test]
    fn test_format_timestamp_uses_zone() {
        let time = DateTime::parse_from_rfc3339("2024-01-01T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let zone = chrono::FixedOffset::east_opt(3600).unwrap();
        let config = Config {
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            ..Config::default()
        };
        assert_eq!(format_timestamp(time, &zone, &config), "2024-01-02 00:30");
    }

    #[test]
    fn test_format_timestamp_survives_bad_format() {
        let time = DateTime::parse_from_rfc3339("2024-01-01T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let config = Config {
            timestamp_format: "%Q broken".to_string(),
            ..Config::default()
        };
        assert_eq!(format_timestamp(time, &Utc, &config), "2024-01-01T23:30:00+00:00");
    }
}

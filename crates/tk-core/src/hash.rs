//! Structural fingerprints for change detection.
//!
//! Group hashes combine their children by summing, so reordering children
//! (or compensating changes between them) can produce the same hash. Treat a
//! matching hash as "probably unchanged", never as proof of equality.

use crate::entry::TimeEntry;

/// Text standing in for the end time of a running leaf.
const OPEN_END: &str = "open";

/// Rolling 31-multiplier string hash over UTF-16 code units, wrapping at 32 bits.
pub fn str_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Fingerprint of an entry and everything beneath it.
pub fn entry_hash(entry: &TimeEntry) -> i64 {
    match entry {
        TimeEntry::Leaf {
            name,
            start_time,
            end_time,
        } => {
            let end = end_time.map_or_else(
                || OPEN_END.to_string(),
                |end| end.timestamp_millis().to_string(),
            );
            i64::from(str_hash(&format!("{name}{}{end}", start_time.timestamp_millis())))
        }
        TimeEntry::Group { name, sub_entries } => {
            let children: i64 = sub_entries.iter().map(|child| entry_hash(child)).sum();
            i64::from(str_hash(&format!("{name}{children}")))
        }
    }
}

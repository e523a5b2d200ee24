//! Display ordering of entries.

use crate::entry::EntryRef;

/// Entries in display order: as stored, or newest first when `reverse` is set.
pub fn entries_ordered(entries: &[EntryRef], reverse: bool) -> Vec<&EntryRef> {
    if reverse {
        entries.iter().rev().collect()
    } else {
        entries.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::entry::{TimeEntry, same_entry};

    #[test]
    fn reverses_only_when_asked() {
        let start = Utc.timestamp_millis_opt(0).unwrap();
        let entries = vec![
            TimeEntry::leaf("first", start, None),
            TimeEntry::leaf("second", start, None),
        ];

        let forward = entries_ordered(&entries, false);
        let backward = entries_ordered(&entries, true);

        assert!(same_entry(forward[0], &entries[0]));
        assert!(same_entry(backward[0], &entries[1]));
        assert_eq!(backward.len(), 2);
    }
}

//! Locating the currently running entry.
//!
//! A well-formed timekeep has at most one open leaf, but nothing enforces
//! it. When several are open, the first one in depth-first pre-order (list
//! order, children before later siblings) is *the* running entry.

use crate::entry::{EntryRef, TimeEntry, Timekeep};

/// Finds the first open leaf in depth-first pre-order.
pub fn find_running(entries: &[EntryRef]) -> Option<&EntryRef> {
    entries.iter().find_map(|entry| match entry.as_ref() {
        TimeEntry::Group { sub_entries, .. } => find_running(sub_entries),
        TimeEntry::Leaf { end_time: None, .. } => Some(entry),
        TimeEntry::Leaf { .. } => None,
    })
}

/// Whether an entry, or anything beneath it, is still running.
pub fn is_entry_running(entry: &TimeEntry) -> bool {
    match entry {
        TimeEntry::Leaf { end_time, .. } => end_time.is_none(),
        TimeEntry::Group { sub_entries, .. } => find_running(sub_entries).is_some(),
    }
}

/// Whether any entry of the timekeep is running.
pub fn is_keep_running(timekeep: &Timekeep) -> bool {
    find_running(&timekeep.entries).is_some()
}

//! Core logic for the timekeep tracker.
//!
//! This crate contains the entry tree and the pure functions over it:
//! - Duration aggregation, including per-weekday totals
//! - Running entry detection
//! - Structural edits (split, remove with collapse, replace, stop)
//! - Loading, validation and code block splicing of stored trackers
//!
//! Nothing here reads the clock; every function that needs "now" takes it.

pub mod codeblock;
pub mod duration;
pub mod entry;
pub mod hash;
pub mod load;
pub mod mutate;
pub mod order;
pub mod running;

pub use codeblock::{
    Codeblock, CodeblockError, EMPTY_CODEBLOCK, extract_timekeeps, find_codeblocks,
    replace_codeblock,
};
pub use duration::{
    entry_duration, total_duration, total_duration_on_day, week_start, weekday_from_iso,
};
pub use entry::{EntryRef, TimeEntry, Timekeep, same_entry};
pub use hash::entry_hash;
pub use load::{LoadError, ValidationIssue, load};
pub use mutate::{
    create_entry, remove_entry, remove_sub_entry, stop_running_entries, update_entry,
    with_sub_entry,
};
pub use order::entries_ordered;
pub use running::{find_running, is_entry_running, is_keep_running};

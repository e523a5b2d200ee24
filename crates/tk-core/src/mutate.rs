//! Structural edits to entry trees.
//!
//! Every operation returns a new tree and leaves its input untouched.
//! Unchanged nodes are shared with the input, so handles to them stay valid
//! in the result. Nodes are located by identity (see [`same_entry`]).
//!
//! Removal normalizes groups so that no group is left with a single child:
//! such a group collapses into its survivor under the group's own name.
//! A group left with no children at all is dropped from its parent.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::entry::{EntryRef, TimeEntry, same_entry};

/// Creates a freshly started, open leaf.
pub fn create_entry(name: impl Into<String>, now: DateTime<Utc>) -> EntryRef {
    TimeEntry::leaf(name, now, None)
}

/// Starts a new open sub-entry under `parent`.
///
/// A group gets the new leaf appended. A leaf is split into a group carrying
/// the leaf's name, whose first child ("Part 1") keeps the original timing.
/// An empty `name` is replaced with the next "Part N".
pub fn with_sub_entry(parent: &TimeEntry, name: &str, now: DateTime<Utc>) -> EntryRef {
    match parent {
        TimeEntry::Group {
            name: group_name,
            sub_entries,
        } => {
            let child_name = if name.trim().is_empty() {
                format!("Part {}", sub_entries.len() + 1)
            } else {
                name.to_string()
            };

            let mut children = sub_entries.clone();
            children.push(create_entry(child_name, now));
            TimeEntry::group(group_name.clone(), children)
        }
        TimeEntry::Leaf {
            name: leaf_name,
            start_time,
            end_time,
        } => {
            let child_name = if name.trim().is_empty() {
                "Part 2".to_string()
            } else {
                name.to_string()
            };

            TimeEntry::group(
                leaf_name.clone(),
                vec![
                    TimeEntry::leaf("Part 1", *start_time, *end_time),
                    create_entry(child_name, now),
                ],
            )
        }
    }
}

/// Removes `target` from a list of top-level entries.
///
/// Removing a node that is not in the tree is a no-op apart from the
/// normalization applied to every group on the way.
pub fn remove_entry(entries: &[EntryRef], target: &EntryRef) -> Vec<EntryRef> {
    if entries.iter().any(|entry| same_entry(entry, target)) {
        return entries
            .iter()
            .filter(|entry| !same_entry(entry, target))
            .cloned()
            .collect();
    }

    entries
        .iter()
        .filter_map(|entry| remove_sub_entry(entry, target))
        .collect()
}

/// Removes `target` from anywhere beneath `parent`.
///
/// Returns `None` when `parent` is a group and nothing is left in it.
pub fn remove_sub_entry(parent: &EntryRef, target: &EntryRef) -> Option<EntryRef> {
    let TimeEntry::Group { name, sub_entries } = parent.as_ref() else {
        return Some(Arc::clone(parent));
    };

    let mut filtered: Vec<EntryRef> = sub_entries
        .iter()
        .filter(|entry| !same_entry(entry, target))
        .filter_map(|entry| remove_sub_entry(entry, target))
        .collect();

    if filtered.len() > 1 {
        return Some(TimeEntry::group(name.clone(), filtered));
    }

    let survivor = filtered.pop()?;
    let collapsed = match survivor.as_ref() {
        TimeEntry::Leaf {
            start_time,
            end_time,
            ..
        } => TimeEntry::leaf(name.clone(), *start_time, *end_time),
        TimeEntry::Group { sub_entries, .. } => TimeEntry::group(name.clone(), sub_entries.clone()),
    };
    Some(collapsed)
}

/// Replaces the node `previous` with `replacement`, rebuilding its ancestors.
///
/// Callers must ensure `previous` occurs at most once in the tree.
pub fn update_entry(
    entries: &[EntryRef],
    previous: &EntryRef,
    replacement: &EntryRef,
) -> Vec<EntryRef> {
    entries
        .iter()
        .map(|entry| {
            if same_entry(entry, previous) {
                return Arc::clone(replacement);
            }
            match entry.as_ref() {
                TimeEntry::Group { name, sub_entries } => TimeEntry::group(
                    name.clone(),
                    update_entry(sub_entries, previous, replacement),
                ),
                TimeEntry::Leaf { .. } => Arc::clone(entry),
            }
        })
        .collect()
}

/// Closes every open leaf at `now`. Already closed leaves keep their end time.
pub fn stop_running_entries(entries: &[EntryRef], now: DateTime<Utc>) -> Vec<EntryRef> {
    entries
        .iter()
        .map(|entry| match entry.as_ref() {
            TimeEntry::Group { name, sub_entries } => {
                TimeEntry::group(name.clone(), stop_running_entries(sub_entries, now))
            }
            TimeEntry::Leaf {
                name,
                start_time,
                end_time: None,
            } => TimeEntry::leaf(name.clone(), *start_time, Some(now)),
            TimeEntry::Leaf { .. } => Arc::clone(entry),
        })
        .collect()
}

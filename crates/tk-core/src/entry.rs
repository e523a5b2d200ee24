//! The entry tree: timed leaves and named groups.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Shared handle to a node in the entry tree.
///
/// Node identity is the allocation, not the value: two handles refer to the
/// same node only if [`same_entry`] says so. Operations that locate a node
/// (removal, replacement) compare handles, never contents.
pub type EntryRef = Arc<TimeEntry>;

/// A single node in a timekeep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeEntry {
    /// One continuous timed interval. `end_time == None` means it is running.
    Leaf {
        name: String,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    },
    /// A named collection of entries whose duration is the sum of its children.
    Group {
        name: String,
        sub_entries: Vec<EntryRef>,
    },
}

impl TimeEntry {
    /// Creates a new leaf node.
    pub fn leaf(
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> EntryRef {
        Arc::new(Self::Leaf {
            name: name.into(),
            start_time,
            end_time,
        })
    }

    /// Creates a new group node.
    pub fn group(name: impl Into<String>, sub_entries: Vec<EntryRef>) -> EntryRef {
        Arc::new(Self::Group {
            name: name.into(),
            sub_entries,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name, .. } | Self::Group { name, .. } => name,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    /// Returns the children of a group, or `None` for a leaf.
    pub fn sub_entries(&self) -> Option<&[EntryRef]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Group { sub_entries, .. } => Some(sub_entries),
        }
    }
}

/// Whether two handles refer to the same node.
pub fn same_entry(a: &EntryRef, b: &EntryRef) -> bool {
    Arc::ptr_eq(a, b)
}

/// The aggregate root: the top-level list of entries of one tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timekeep {
    pub entries: Vec<EntryRef>,
}

impl Timekeep {
    pub const fn new(entries: Vec<EntryRef>) -> Self {
        Self { entries }
    }

    /// Canonical single-line serialization.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// RFC 3339 in UTC with at least millisecond digits, and more only when the
/// value carries them, so loading the text gives back the same instant.
fn format_timestamp(time: &DateTime<Utc>) -> String {
    let precision = if time.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    time.to_rfc3339_opts(precision, true)
}

impl Serialize for TimeEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TimeEntry", 4)?;
        match self {
            Self::Leaf {
                name,
                start_time,
                end_time,
            } => {
                state.serialize_field("name", name)?;
                state.serialize_field("startTime", &format_timestamp(start_time))?;
                state.serialize_field("endTime", &end_time.as_ref().map(format_timestamp))?;
                state.serialize_field("subEntries", &None::<Vec<EntryRef>>)?;
            }
            Self::Group { name, sub_entries } => {
                state.serialize_field("name", name)?;
                state.serialize_field("startTime", &None::<String>)?;
                state.serialize_field("endTime", &None::<String>)?;
                state.serialize_field("subEntries", sub_entries)?;
            }
        }
        state.end()
    }
}

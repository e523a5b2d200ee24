//! Loading and validating timekeep documents.
//!
//! A document is a JSON object `{"entries": [...]}`. Each entry is either a
//! leaf (`name`, `startTime`, optional `endTime`) or a group (`name`,
//! `subEntries`). `null` and a missing key are treated the same, so documents
//! that spell out every key (`"subEntries": null`) load fine. Timestamps may
//! be epoch milliseconds or RFC 3339 strings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::entry::{EntryRef, TimeEntry, Timekeep};

/// Why a document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The text is not well-formed JSON.
    #[error("Failed to parse timekeep JSON")]
    Parse(#[source] serde_json::Error),

    /// The JSON does not describe a timekeep.
    #[error("Invalid timekeep: {}", Issues(.issues))]
    Invalid { issues: Vec<ValidationIssue> },
}

/// A single schema violation, located by its JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationIssue {
    /// Path such as `entries[0].subEntries[1].startTime`.
    pub path: String,
    pub message: String,
}

struct Issues<'a>(&'a [ValidationIssue]);

impl fmt::Display for Issues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Loads a timekeep from its textual form.
///
/// Blank input is an empty timekeep.
pub fn load(text: &str) -> Result<Timekeep, LoadError> {
    if text.trim().is_empty() {
        return Ok(Timekeep::default());
    }

    let value: Value = serde_json::from_str(text).map_err(|err| {
        tracing::debug!(error = %err, "failed to parse timekeep JSON");
        LoadError::Parse(err)
    })?;

    let mut validator = Validator::default();
    match validator.timekeep(&value) {
        Some(timekeep) if validator.issues.is_empty() => Ok(timekeep),
        _ => {
            tracing::debug!(issues = validator.issues.len(), "timekeep failed validation");
            Err(LoadError::Invalid {
                issues: validator.issues,
            })
        }
    }
}

impl FromStr for Timekeep {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load(s)
    }
}

/// Walks a JSON value, building the typed tree and recording every issue.
#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: if path.is_empty() { "(root)".to_string() } else { path.to_string() },
            message: message.into(),
        });
    }

    fn timekeep(&mut self, value: &Value) -> Option<Timekeep> {
        let Some(object) = value.as_object() else {
            self.issue("", "expected an object");
            return None;
        };
        let Some(entries) = present(object, "entries") else {
            self.issue("entries", "required");
            return None;
        };
        self.entries(entries, "entries").map(Timekeep::new)
    }

    fn entries(&mut self, value: &Value, path: &str) -> Option<Vec<EntryRef>> {
        let Some(items) = value.as_array() else {
            self.issue(path, "expected an array");
            return None;
        };

        // Visit every item before giving up so all issues are reported.
        let parsed: Vec<Option<EntryRef>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.entry(item, &format!("{path}[{i}]")))
            .collect();
        parsed.into_iter().collect()
    }

    fn entry(&mut self, value: &Value, path: &str) -> Option<EntryRef> {
        let Some(object) = value.as_object() else {
            self.issue(path, "expected an object");
            return None;
        };

        let name = match object.get("name") {
            Some(Value::String(name)) => Some(name.clone()),
            Some(_) => {
                self.issue(&field(path, "name"), "expected a string");
                None
            }
            None => {
                self.issue(&field(path, "name"), "required");
                None
            }
        };

        let start = present(object, "startTime");
        let end = present(object, "endTime");
        let sub_entries = present(object, "subEntries");

        match (start, sub_entries) {
            (Some(start), None) => {
                let start_time = self.timestamp(start, &field(path, "startTime"));
                let end_time = match end {
                    Some(end) => Some(self.timestamp(end, &field(path, "endTime"))?),
                    None => None,
                };
                Some(TimeEntry::leaf(name?, start_time?, end_time))
            }
            (None, Some(sub_entries)) => {
                if end.is_some() {
                    self.issue(&field(path, "endTime"), "a group cannot have an end time");
                }
                let children = self.entries(sub_entries, &field(path, "subEntries"));
                if end.is_some() {
                    return None;
                }
                Some(TimeEntry::group(name?, children?))
            }
            (Some(_), Some(_)) => {
                self.issue(path, "an entry cannot have both startTime and subEntries");
                None
            }
            (None, None) => {
                self.issue(path, "an entry needs either startTime or subEntries");
                None
            }
        }
    }

    fn timestamp(&mut self, value: &Value, path: &str) -> Option<DateTime<Utc>> {
        let parsed = match value {
            Value::Number(number) => number
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            Value::String(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        };
        if parsed.is_none() {
            self.issue(
                path,
                "expected a timestamp (epoch milliseconds or RFC 3339 string)",
            );
        }
        parsed
    }
}

/// A key's value, with `null` treated as absent.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn field(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn issues(text: &str) -> Vec<ValidationIssue> {
        match load(text) {
            Err(LoadError::Invalid { issues }) => issues,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_text_is_empty_timekeep() {
        assert_eq!(load("").unwrap(), Timekeep::default());
        assert_eq!(load("  \n\t").unwrap(), Timekeep::default());
    }

    #[test]
    fn loads_numeric_timestamps() {
        let keep = load(r#"{"entries":[{"name":"A","startTime":1000,"endTime":2000}]}"#).unwrap();

        assert_eq!(keep.entries.len(), 1);
        assert_eq!(*keep.entries[0], *TimeEntry::leaf("A", at(1000), Some(at(2000))));
        assert_eq!(crate::duration::total_duration(&keep.entries, at(123_456)), 1000);
    }

    #[test]
    fn loads_document_with_explicit_nulls() {
        let text = r#"{"entries":[
            {"name":"Block 1","startTime":null,"endTime":null,"subEntries":[
                {"name":"Part 1","startTime":"2024-03-01T09:00:00.000Z","endTime":"2024-03-01T10:00:00.000Z","subEntries":null},
                {"name":"Part 2","startTime":"2024-03-01T10:30:00+01:00","endTime":null,"subEntries":null}
            ]}
        ]}"#;

        let keep = load(text).unwrap();
        let group = &keep.entries[0];
        let children = group.sub_entries().unwrap();

        assert_eq!(group.name(), "Block 1");
        assert_eq!(children.len(), 2);
        assert_eq!(
            *children[1],
            *TimeEntry::leaf(
                "Part 2",
                DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                None
            )
        );
    }

    #[test]
    fn serialization_round_trips() {
        let keep = Timekeep::new(vec![
            TimeEntry::leaf("A", at(1_700_000_000_123), Some(at(1_700_000_360_000))),
            TimeEntry::group(
                "G",
                vec![
                    TimeEntry::leaf("Part 1", at(0), Some(at(5))),
                    TimeEntry::group(
                        "nested",
                        vec![
                            TimeEntry::leaf("x", at(5), Some(at(6))),
                            TimeEntry::leaf("y", at(6), None),
                        ],
                    ),
                ],
            ),
        ]);

        let text = keep.to_json().unwrap();
        assert_eq!(load(&text).unwrap(), keep);
        assert_eq!(text.parse::<Timekeep>().unwrap(), keep);
    }

    #[test]
    fn sub_millisecond_timestamps_round_trip() {
        let now = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let keep = Timekeep::new(vec![crate::mutate::create_entry("A", now)]);

        assert_eq!(load(&keep.to_json().unwrap()).unwrap(), keep);
    }

    #[test]
    fn loaded_microseconds_survive_a_save() {
        let text = r#"{"entries":[{"name":"A","startTime":"2024-01-01T09:00:00.123456Z"}]}"#;
        let keep = load(text).unwrap();
        let saved = keep.to_json().unwrap();

        assert!(saved.contains(r#""startTime":"2024-01-01T09:00:00.123456Z""#));
        assert_eq!(load(&saved).unwrap(), keep);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = load("{not valid").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert_eq!(err.to_string(), "Failed to parse timekeep JSON");
    }

    #[test]
    fn rejects_entry_with_both_shapes() {
        let found = issues(
            r#"{"entries":[{"name":"A","startTime":0,"subEntries":[]}]}"#,
        );
        assert_eq!(found, vec![ValidationIssue {
            path: "entries[0]".to_string(),
            message: "an entry cannot have both startTime and subEntries".to_string(),
        }]);
    }

    #[test]
    fn rejects_entry_with_neither_shape() {
        let found = issues(r#"{"entries":[{"name":"A","endTime":5}]}"#);
        assert_eq!(found[0].path, "entries[0]");
    }

    #[test]
    fn rejects_group_with_end_time() {
        let found = issues(
            r#"{"entries":[{"name":"G","endTime":5,"subEntries":[{"name":"a","startTime":0}]}]}"#,
        );
        assert_eq!(found[0].path, "entries[0].endTime");
    }

    #[test]
    fn reports_every_issue_with_its_path() {
        let err = load(
            r#"{"entries":[
                {"name":1,"startTime":0},
                {"name":"G","subEntries":[{"name":"ok","startTime":0},{"name":"bad","startTime":"yesterday"}]},
                "nope"
            ]}"#,
        )
        .unwrap_err();

        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid timekeep: entries[0].name: expected a string; entries[1].subEntries[1].startTime: expected a timestamp (epoch milliseconds or RFC 3339 string); entries[2]: expected an object"
        );
    }

    #[test]
    fn rejects_missing_entries() {
        let found = issues(r#"{"items":[]}"#);
        assert_eq!(found[0].path, "entries");
        assert_eq!(found[0].message, "required");

        let found = issues("[1,2]");
        assert_eq!(found[0].path, "(root)");
    }

    #[test]
    fn accepts_single_child_group_on_load() {
        let keep = load(r#"{"entries":[{"name":"G","subEntries":[{"name":"a","startTime":0}]}]}"#)
            .unwrap();
        assert_eq!(keep.entries[0].sub_entries().map(<[_]>::len), Some(1));
    }
}

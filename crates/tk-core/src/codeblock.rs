//! Locating and rewriting `timekeep` code blocks inside a larger document.
//!
//! A tracker is stored as a fenced block:
//!
//! ~~~text
//! ```timekeep
//! {"entries":[...]}
//! ```
//! ~~~
//!
//! Line numbers are 0-based indices into the document split on `\n`.

use thiserror::Error;

use crate::entry::Timekeep;
use crate::load::{LoadError, load};

/// Text of a freshly inserted, empty tracker.
pub const EMPTY_CODEBLOCK: &str = "```timekeep\n{\"entries\":[]}\n```\n";

const FENCE: &str = "```";
const LANGUAGE: &str = "timekeep";

/// Errors from rewriting a code block.
#[derive(Debug, Error)]
pub enum CodeblockError {
    #[error(
        "invalid code block range {line_start}..{line_end} for a document of {line_count} lines"
    )]
    InvalidRange {
        line_start: usize,
        line_end: usize,
        line_count: usize,
    },

    #[error("failed to serialize timekeep")]
    Serialize(#[from] serde_json::Error),
}

/// A located `timekeep` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeblock {
    /// Line of the opening fence.
    pub line_start: usize,
    /// Line of the closing fence.
    pub line_end: usize,
    /// The lines between the fences.
    pub content: String,
}

impl Codeblock {
    pub fn load(&self) -> Result<Timekeep, LoadError> {
        load(&self.content)
    }
}

/// Finds every terminated `timekeep` block in document order.
pub fn find_codeblocks(document: &str) -> Vec<Codeblock> {
    let lines: Vec<&str> = document.split('\n').collect();
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        let Some(info) = line.trim_start().strip_prefix(FENCE) else {
            continue;
        };
        let info = info.trim();

        match open {
            None if info == LANGUAGE => open = Some(index),
            Some(line_start) if info.is_empty() => {
                blocks.push(Codeblock {
                    line_start,
                    line_end: index,
                    content: lines[line_start + 1..index].join("\n"),
                });
                open = None;
            }
            _ => {}
        }
    }

    blocks
}

/// Loads every block that holds a valid timekeep, skipping the rest.
pub fn extract_timekeeps(document: &str) -> Vec<Timekeep> {
    find_codeblocks(document)
        .iter()
        .filter_map(|block| match block.load() {
            Ok(timekeep) => Some(timekeep),
            Err(err) => {
                tracing::warn!(
                    line = block.line_start,
                    error = %err,
                    "skipping invalid timekeep block"
                );
                None
            }
        })
        .collect()
}

/// Replaces the content lines of the block fenced by `line_start` and
/// `line_end` with the canonical serialization of `timekeep`.
///
/// The fence lines and everything outside them are kept byte for byte.
pub fn replace_codeblock(
    timekeep: &Timekeep,
    document: &str,
    line_start: usize,
    line_end: usize,
) -> Result<String, CodeblockError> {
    let lines: Vec<&str> = document.split('\n').collect();
    if line_start >= line_end || line_end > lines.len() {
        return Err(CodeblockError::InvalidRange {
            line_start,
            line_end,
            line_count: lines.len(),
        });
    }

    let json = timekeep.to_json()?;

    let mut output: Vec<&str> = Vec::with_capacity(lines.len() - (line_end - line_start) + 2);
    output.extend_from_slice(&lines[..=line_start]);
    output.push(&json);
    output.extend_from_slice(&lines[line_end..]);
    Ok(output.join("\n"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::entry::TimeEntry;

    const DOC: &str = "# Notes\n\n```timekeep\n{\"entries\":[]}\n```\n\nAfter\n";

    #[test]
    fn finds_block_and_content() {
        let blocks = find_codeblocks(DOC);
        assert_eq!(blocks, vec![Codeblock {
            line_start: 2,
            line_end: 4,
            content: "{\"entries\":[]}".to_string(),
        }]);
    }

    #[test]
    fn ignores_other_languages_and_unterminated_blocks() {
        let doc = "```rust\nfn main() {}\n```\n```timekeep\n{\"entries\":[]}\n";
        assert!(find_codeblocks(doc).is_empty());
    }

    #[test]
    fn finds_multiple_blocks() {
        let doc = format!("{EMPTY_CODEBLOCK}text\n  ```timekeep\n\n```\n");
        let blocks = find_codeblocks(&doc);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].line_start, 4);
        assert_eq!(blocks[1].line_end, 6);
        assert_eq!(blocks[1].content, "");
    }

    #[test]
    fn extract_skips_invalid_blocks() {
        let doc = format!("```timekeep\n{{oops\n```\n{EMPTY_CODEBLOCK}");
        let keeps = extract_timekeeps(&doc);
        assert_eq!(keeps, vec![Timekeep::default()]);
    }

    #[test]
    fn replace_splices_single_line() {
        let keep = Timekeep::new(vec![TimeEntry::leaf(
            "A",
            Utc.timestamp_millis_opt(0).unwrap(),
            None,
        )]);

        let updated = replace_codeblock(&keep, DOC, 2, 4).unwrap();

        insta::assert_snapshot!(updated, @r#"
        # Notes

        ```timekeep
        {"entries":[{"name":"A","startTime":"1970-01-01T00:00:00.000Z","endTime":null,"subEntries":null}]}
        ```

        After
        "#);
    }

    #[test]
    fn replace_collapses_multi_line_content() {
        let doc = "```timekeep\n{\n  \"entries\": []\n}\n```";
        let updated = replace_codeblock(&Timekeep::default(), doc, 0, 4).unwrap();
        assert_eq!(updated, "```timekeep\n{\"entries\":[]}\n```");
    }

    #[test]
    fn replace_fills_empty_block() {
        let doc = "```timekeep\n```";
        let updated = replace_codeblock(&Timekeep::default(), doc, 0, 1).unwrap();
        assert_eq!(updated, "```timekeep\n{\"entries\":[]}\n```");
    }

    #[test]
    fn replace_preserves_crlf_outside_block() {
        let doc = "before\r\n```timekeep\r\nold\r\n```\r\nafter\r\n";
        let updated = replace_codeblock(&Timekeep::default(), doc, 1, 3).unwrap();
        assert_eq!(updated, "before\r\n```timekeep\r\n{\"entries\":[]}\n```\r\nafter\r\n");
    }

    #[test]
    fn replace_rejects_bad_range() {
        let keep = Timekeep::default();
        assert!(matches!(
            replace_codeblock(&keep, DOC, 4, 2),
            Err(CodeblockError::InvalidRange { .. })
        ));
        assert!(matches!(
            replace_codeblock(&keep, DOC, 2, 40),
            Err(CodeblockError::InvalidRange { line_count: 8, .. })
        ));
    }

    #[test]
    fn located_block_round_trips_through_replace() {
        let keep = Timekeep::new(vec![TimeEntry::leaf(
            "A",
            Utc.timestamp_millis_opt(1000).unwrap(),
            Some(Utc.timestamp_millis_opt(2000).unwrap()),
        )]);
        let block = &find_codeblocks(DOC)[0];

        let updated = replace_codeblock(&keep, DOC, block.line_start, block.line_end).unwrap();
        let reloaded = extract_timekeeps(&updated);

        assert_eq!(reloaded, vec![keep]);
        assert!(updated.starts_with("# Notes\n\n```timekeep\n"));
        assert!(updated.ends_with("```\n\nAfter\n"));
    }
}

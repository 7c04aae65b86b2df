//! Project file encoding
//!
//! A project file is four JSON values, one per line, UTF-8, each line
//! newline-terminated:
//!
//! ```text
//! line 1: bool          - true when the pending queue is exhausted
//! line 2: string        - currently displayed note ("" when exhausted)
//! line 3: [string]      - remaining pending notes, front to back
//! line 4: {name: topic} - topics, each {"name", "notes", "number"}
//! ```
//!
//! Encoding and decoding are pure string transforms; file I/O lives in
//! `persistence`. Only fully decoded input ever produces a `Document`.

use std::collections::{BTreeMap, VecDeque};

use serde::de::DeserializeOwned;

use crate::document::Document;
use crate::models::TopicRecord;
use crate::storage::error::{StorageError, StorageResult, PROJECT_LINES};

/// Serialize a document to the line-oriented project format
pub fn encode(document: &Document) -> StorageResult<String> {
    let exhausted = document.is_exhausted();
    let current = document.current_note().unwrap_or("");
    let remaining: Vec<&str> = document.pending_notes().skip(1).collect();
    let topics: BTreeMap<&str, &TopicRecord> = document
        .topics()
        .map(|topic| (topic.name.as_str(), topic))
        .collect();

    let mut out = String::new();
    push_line(&mut out, &exhausted)?;
    push_line(&mut out, &current)?;
    push_line(&mut out, &remaining)?;
    push_line(&mut out, &topics)?;
    Ok(out)
}

/// Parse the line-oriented project format into a document
///
/// The returned document has no filename; the caller attaches the path it
/// read from.
pub fn decode(text: &str) -> StorageResult<Document> {
    let mut lines = text.lines();

    let exhausted: bool = parse_line(&mut lines, 1)?;
    let current: String = parse_line(&mut lines, 2)?;
    let remaining: Vec<String> = parse_line(&mut lines, 3)?;
    let topics: BTreeMap<String, TopicRecord> = parse_line(&mut lines, 4)?;

    let mut document = Document::new();

    let mut pending = VecDeque::new();
    if !exhausted {
        pending.push_back(current);
        pending.extend(remaining);
    }
    document.set_pending(pending);

    // The map key on the wire is redundant with the record's own name; the
    // record wins.
    for (_, record) in topics {
        document.insert_topic_record(record);
    }

    Ok(document)
}

fn push_line<T: serde::Serialize>(out: &mut String, value: &T) -> StorageResult<()> {
    let encoded =
        serde_json::to_string(value).map_err(|source| StorageError::Encode { source })?;
    out.push_str(&encoded);
    out.push('\n');
    Ok(())
}

fn parse_line<'a, T: DeserializeOwned>(
    lines: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> StorageResult<T> {
    debug_assert!(line <= PROJECT_LINES);
    let raw = lines
        .next()
        .ok_or(StorageError::Truncated { found: line - 1 })?;
    serde_json::from_str(raw).map_err(|source| StorageError::Parse { line, source })
}

//! Persisted data models
//!
//! A note is plain `String` content; topics are the only structured record.
//! Everything here round-trips through the project file as-is. Transient
//! editing state (canvas items, drag state) lives in `Workspace` and never
//! touches these records.

use serde::{Deserialize, Serialize};

/// A named bucket of notes with a persisted display rank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRecord {
    /// Unique key across the document; immutable after creation
    pub name: String,
    /// Notes in the topic, in last-committed display order
    pub notes: Vec<String>,
    /// Sort key for topic display and export order. Assigned as the topic
    /// count at creation and overwritten by reordering; only relative order
    /// is meaningful, not uniqueness or contiguity.
    pub number: u32,
}

impl TopicRecord {
    /// Create an empty topic with the given display rank
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            notes: Vec::new(),
            number,
        }
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Label shown on the topic's summary line
    pub fn summary(&self) -> String {
        let plural = if self.notes.len() == 1 { "" } else { "s" };
        format!("{}: {} note{}", self.name, self.notes.len(), plural)
    }
}

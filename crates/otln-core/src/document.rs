//! The outline document
//!
//! One `Document` owns every topic and the queue of notes that have not been
//! filed into one yet. The front of the queue is the note currently shown to
//! the user. A note lives in exactly one place at a time: the pending queue
//! or a single topic's note list.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::TopicRecord;

/// Errors from document operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("a topic named '{0}' already exists")]
    DuplicateTopic(String),

    #[error("no pending notes")]
    EmptyQueue,

    #[error("no topic named '{0}'")]
    TopicNotFound(String),

    #[error("topic '{topic}' has no matching note")]
    NoteNotFound { topic: String },
}

/// An outline in progress: topics plus the unfiled note queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    filename: Option<PathBuf>,
    topics: BTreeMap<String, TopicRecord>,
    pending: VecDeque<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path the project was loaded from or last saved to
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    // ==================== Topics ====================

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn topic(&self, name: &str) -> Option<&TopicRecord> {
        self.topics.get(name)
    }

    pub fn topics(&self) -> impl Iterator<Item = &TopicRecord> {
        self.topics.values()
    }

    /// Topics sorted by display rank
    ///
    /// `number` values need not be unique; ties keep name order, which only
    /// matters until the next reorder commit rewrites the numbers anyway.
    pub fn topics_by_number(&self) -> Vec<&TopicRecord> {
        let mut topics: Vec<&TopicRecord> = self.topics.values().collect();
        topics.sort_by_key(|t| t.number);
        topics
    }

    /// Create a new empty topic
    ///
    /// The new topic's `number` is the current topic count, placing it after
    /// everything created so far. Never overwrites: a taken name fails with
    /// `DuplicateTopic`.
    pub fn create_topic(&mut self, name: &str) -> Result<&TopicRecord, DocumentError> {
        if self.topics.contains_key(name) {
            return Err(DocumentError::DuplicateTopic(name.to_string()));
        }
        let number = self.topics.len() as u32;
        self.topics
            .insert(name.to_string(), TopicRecord::new(name, number));
        Ok(&self.topics[name])
    }

    // ==================== Pending notes ====================

    pub fn pending_notes(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The currently displayed note: the front of the queue
    pub fn current_note(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    /// True when every note has been filed ("no more notes")
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append a note to the back of the queue (the import path)
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.pending.push_back(note.into());
    }

    /// Show the next note: front rotates to the back
    pub fn next_note(&mut self) {
        if let Some(note) = self.pending.pop_front() {
            self.pending.push_back(note);
        }
    }

    /// Show the previous note: back rotates to the front
    pub fn prev_note(&mut self) {
        if let Some(note) = self.pending.pop_back() {
            self.pending.push_front(note);
        }
    }

    // ==================== Note transfer ====================

    /// File the currently displayed note into a topic, returning it
    ///
    /// Pops the front of the queue and appends it to the topic's notes; the
    /// new front (or exhaustion) becomes the displayed state. Fails with
    /// `EmptyQueue` on an empty queue and leaves every topic unchanged.
    pub fn add_note_to_topic(&mut self, topic: &str) -> Result<String, DocumentError> {
        if self.pending.is_empty() {
            return Err(DocumentError::EmptyQueue);
        }
        let record = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
        let note = self.pending.pop_front().expect("checked non-empty above");
        record.notes.push(note.clone());
        Ok(note)
    }

    /// Pull a note back out of a topic
    ///
    /// Removes the first matching note and pushes it onto the front of the
    /// queue, so it is the next note displayed.
    pub fn remove_note_from_topic(&mut self, topic: &str, note: &str) -> Result<(), DocumentError> {
        let record = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
        let position = record
            .notes
            .iter()
            .position(|n| n == note)
            .ok_or_else(|| DocumentError::NoteNotFound {
                topic: topic.to_string(),
            })?;
        let note = record.notes.remove(position);
        self.pending.push_front(note);
        Ok(())
    }

    // ==================== Order commits & codec hooks ====================

    /// Replace a topic's note order with a freshly derived one
    pub(crate) fn set_topic_notes(
        &mut self,
        topic: &str,
        notes: Vec<String>,
    ) -> Result<(), DocumentError> {
        let record = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
        record.notes = notes;
        Ok(())
    }

    /// Overwrite a topic's display rank
    pub(crate) fn set_topic_number(&mut self, topic: &str, number: u32) -> Result<(), DocumentError> {
        let record = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
        record.number = number;
        Ok(())
    }

    /// Install a topic record wholesale (the load path)
    pub(crate) fn insert_topic_record(&mut self, record: TopicRecord) {
        self.topics.insert(record.name.clone(), record);
    }

    /// Install the pending queue wholesale (the load path)
    pub(crate) fn set_pending(&mut self, pending: VecDeque<String>) {
        self.pending = pending;
    }
}

//! Note command handlers
//!
//! Cycling the pending queue and moving notes in and out of topics.

use std::path::PathBuf;

use anyhow::{Context, Result};

use otln_core::{storage, DocumentError};

use crate::output::Output;

/// Show the next pending note
pub fn next(project: PathBuf, output: &Output) -> Result<()> {
    let mut document = storage::load_project(&project)?;
    document.next_note();
    storage::save_project(&document, &project)?;

    print_current(&document, output);
    Ok(())
}

/// Show the previous pending note
pub fn prev(project: PathBuf, output: &Output) -> Result<()> {
    let mut document = storage::load_project(&project)?;
    document.prev_note();
    storage::save_project(&document, &project)?;

    print_current(&document, output);
    Ok(())
}

/// File the currently displayed note into a topic
pub fn assign(project: PathBuf, topic: String, output: &Output) -> Result<()> {
    let mut document = storage::load_project(&project)?;
    match document.add_note_to_topic(&topic) {
        Ok(note) => {
            storage::save_project(&document, &project)?;
            output.success(&format!("Filed into '{}': {}", topic, note));
            Ok(())
        }
        // Nothing queued is not a failure, there is just nothing to do
        Err(DocumentError::EmptyQueue) => {
            output.message("No more notes.");
            Ok(())
        }
        Err(err) => Err(err).context("Failed to assign note"),
    }
}

/// Move a note out of a topic, back to the front of the queue
pub fn unassign(project: PathBuf, topic: String, note: String, output: &Output) -> Result<()> {
    let mut document = storage::load_project(&project)?;
    document
        .remove_note_from_topic(&topic, &note)
        .context("Failed to unassign note")?;
    storage::save_project(&document, &project)?;

    output.success(&format!("Returned note to the queue from '{}'", topic));
    Ok(())
}

fn print_current(document: &otln_core::Document, output: &Output) {
    match document.current_note() {
        Some(note) => output.message(note),
        None => output.message("No more notes."),
    }
}

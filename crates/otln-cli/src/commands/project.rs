//! Project command handlers
//!
//! Creating a project from a plain-text note file and showing its state.

use std::path::PathBuf;

use anyhow::{Context, Result};

use otln_core::storage::{self, PROJECT_EXT};
use otln_core::Document;

use crate::output::Output;

/// Create a new project from a note file
pub fn new(notes: PathBuf, target: PathBuf, output: &Output) -> Result<()> {
    let imported = storage::import_notes(&notes)
        .with_context(|| format!("Failed to import notes from {}", notes.display()))?;

    let mut document = Document::new();
    for note in &imported {
        document.push_note(note.clone());
    }

    let target = ensure_project_ext(target);
    storage::save_project(&document, &target)
        .with_context(|| format!("Failed to create project {}", target.display()))?;

    output.success(&format!(
        "Created {} with {} note(s)",
        target.display(),
        imported.len()
    ));
    Ok(())
}

/// Show the displayed note and topic lines of a project
pub fn show(project: PathBuf, output: &Output) -> Result<()> {
    let document = storage::load_project(&project)?;
    output.print_status(&document);
    Ok(())
}

/// Append `.otln` when the target has no extension, the way the save
/// dialog's default extension used to
fn ensure_project_ext(path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(PROJECT_EXT)
    } else {
        path
    }
}

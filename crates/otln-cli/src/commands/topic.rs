//! Topic command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use otln_core::storage;

use crate::output::Output;

/// Create a new topic in a project
pub fn create(project: PathBuf, name: String, output: &Output) -> Result<()> {
    let mut document = storage::load_project(&project)?;
    document
        .create_topic(&name)
        .context("Failed to create topic")?;
    storage::save_project(&document, &project)?;

    output.success(&format!("Created topic '{}'", name));
    Ok(())
}

/// List topics in display order
pub fn list(project: PathBuf, output: &Output) -> Result<()> {
    let document = storage::load_project(&project)?;
    output.print_topics(&document.topics_by_number());
    Ok(())
}

/// Show one topic and its notes
pub fn show(project: PathBuf, name: String, output: &Output) -> Result<()> {
    let document = storage::load_project(&project)?;
    match document.topic(&name) {
        Some(topic) => output.print_topic(topic),
        None => bail!("No topic named '{}' in {}", name, project.display()),
    }
    Ok(())
}

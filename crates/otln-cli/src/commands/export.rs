//! Export command handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use otln_core::storage;

use crate::output::Output;

/// Write a project's outline as plain text
pub fn export(project: PathBuf, target: PathBuf, output: &Output) -> Result<()> {
    let document = storage::load_project(&project)?;
    storage::export_outline(&document, &target)
        .with_context(|| format!("Failed to export outline to {}", target.display()))?;

    output.success(&format!("Exported outline to {}", target.display()));
    Ok(())
}

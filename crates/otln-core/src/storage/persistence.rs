//! Project file I/O
//!
//! Reads and writes `.otln` project files, imports plain-text note files,
//! and exports the finished outline. Writes are atomic (serialize fully to a
//! string, write a temp file, then rename), so a failed save never leaves a
//! half-written project behind and never touches the in-memory document.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::document::Document;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::format;

/// Extension required of project files
pub const PROJECT_EXT: &str = "otln";

/// Load a project file into a document
///
/// The path must end in `.otln`; anything else is a user-facing validation
/// error before the file is even opened. The document is only constructed
/// from a fully parsed file.
pub fn load_project(path: &Path) -> StorageResult<Document> {
    if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_EXT) {
        return Err(StorageError::InvalidFileType {
            path: path.to_path_buf(),
            expected: PROJECT_EXT,
        });
    }

    let text = fs::read_to_string(path)
        .map_err(|e| StorageError::from_read(e, path.to_path_buf()))?;
    let mut document = format::decode(&text)?;
    document.set_filename(path);

    info!(
        "loaded project from {} ({} topics, {} pending notes)",
        path.display(),
        document.topic_count(),
        document.pending_count()
    );
    Ok(document)
}

/// Save a document to a project file
///
/// Serializes the whole document to a string first, then writes atomically.
pub fn save_project(document: &Document, path: &Path) -> StorageResult<()> {
    let encoded = format::encode(document)?;
    atomic_write(path, encoded.as_bytes())?;
    info!("saved project to {}", path.display());
    Ok(())
}

/// Read a plain-text note file into individual notes
///
/// Notes are separated by a blank line; a note's internal line breaks are
/// joined with a single space. Empty blocks are dropped.
pub fn import_notes(path: &Path) -> StorageResult<Vec<String>> {
    let text = fs::read_to_string(path)
        .map_err(|e| StorageError::from_read(e, path.to_path_buf()))?;

    let text = text.replace("\r\n", "\n");
    let notes: Vec<String> = text
        .trim()
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| block.lines().collect::<Vec<_>>().join(" "))
        .collect();

    debug!("imported {} notes from {}", notes.len(), path.display());
    Ok(notes)
}

/// Write the document as a human-readable text outline
///
/// Topics in ascending `number` order; each note indented one tab with a
/// blank line after it, and a blank line after each topic block.
pub fn export_outline(document: &Document, path: &Path) -> StorageResult<()> {
    let mut out = String::new();
    for topic in document.topics_by_number() {
        out.push_str(&topic.name);
        out.push_str(":\n");
        for note in &topic.notes {
            out.push('\t');
            out.push_str(note);
            out.push_str("\n\n");
        }
        out.push('\n');
    }

    atomic_write(path, out.as_bytes())?;
    info!("exported outline to {}", path.display());
    Ok(())
}

/// Write data to a file atomically
///
/// Writes to a temp file in the same directory, syncs it, then renames it
/// over the target, so the target is never left partially written.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::from_write(e, parent.to_path_buf()))?;
        }
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("essay.otln");

        let mut doc = Document::new();
        doc.push_note("pending one");
        doc.push_note("pending two");
        doc.create_topic("Intro").unwrap();
        doc.create_topic("Body").unwrap();
        doc.add_note_to_topic("Body").unwrap();

        save_project(&doc, &path).unwrap();
        let loaded = load_project(&path).unwrap();

        assert_eq!(loaded.filename(), Some(path.as_path()));
        assert_eq!(
            loaded.pending_notes().collect::<Vec<_>>(),
            vec!["pending two"]
        );
        assert_eq!(loaded.topic("Intro"), doc.topic("Intro"));
        assert_eq!(loaded.topic("Body"), doc.topic("Body"));
    }

    #[test]
    fn test_load_rejects_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "essay.txt", "true\n\"\"\n[]\n{}\n");

        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileType { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_project(&dir.path().join("absent.otln")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_import_splits_on_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "notes.txt",
            "Alpha line one\nAlpha line two\n\nBeta.\n\n\nGamma\n",
        );

        let notes = import_notes(&path).unwrap();
        assert_eq!(
            notes,
            vec!["Alpha line one Alpha line two", "Beta.", "Gamma"]
        );
    }

    #[test]
    fn test_import_handles_crlf_and_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "crlf.txt", "One\r\nstill one\r\n\r\nTwo\r\n");
        assert_eq!(import_notes(&path).unwrap(), vec!["One still one", "Two"]);

        let path = write_file(&dir, "blank.txt", "\n\n\n");
        assert!(import_notes(&path).unwrap().is_empty());
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = import_notes(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_export_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outline.txt");

        let mut doc = Document::new();
        doc.push_note("point one");
        doc.push_note("point two");
        doc.create_topic("Intro").unwrap();
        doc.create_topic("Body").unwrap();
        doc.add_note_to_topic("Intro").unwrap();
        doc.add_note_to_topic("Intro").unwrap();

        export_outline(&doc, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Intro:\n\tpoint one\n\n\tpoint two\n\n\nBody:\n\n"
        );
    }

    #[test]
    fn test_export_orders_topics_by_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outline.txt");

        let mut doc = Document::new();
        doc.create_topic("First created").unwrap();
        doc.create_topic("Second created").unwrap();
        // Reorder: the later topic now ranks first
        doc.set_topic_number("Second created", 0).unwrap();
        doc.set_topic_number("First created", 5).unwrap();

        export_outline(&doc, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let second = text.find("Second created:").unwrap();
        let first = text.find("First created:").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_import_then_export_preserves_note_multiset() {
        let dir = TempDir::new().unwrap();
        let source = write_file(
            &dir,
            "notes.txt",
            "Alpha line one\nand two\n\nBeta.\n\nGamma\n",
        );

        let notes = import_notes(&source).unwrap();
        let mut doc = Document::new();
        for note in &notes {
            doc.push_note(note.clone());
        }
        doc.create_topic("All").unwrap();
        while !doc.is_exhausted() {
            doc.add_note_to_topic("All").unwrap();
        }

        let out = dir.path().join("outline.txt");
        export_outline(&doc, &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();

        let exported: HashSet<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix('\t'))
            .collect();
        let expected: HashSet<&str> =
            ["Alpha line one and two", "Beta.", "Gamma"].into_iter().collect();
        assert_eq!(exported, expected);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("essay.otln");

        let doc = Document::new();
        save_project(&doc, &nested).unwrap();
        assert!(nested.exists());
        // No temp file left behind
        assert!(!nested.with_extension("tmp").exists());
    }
}

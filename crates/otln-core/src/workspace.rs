//! The editing session
//!
//! A `Workspace` pairs the document with the spatial state the user drags
//! around: one board list holding a line per topic, and one note list per
//! topic. The document's persisted order is only ever rewritten by
//! `commit_order`, which derives it from current item positions; saving and
//! exporting commit first, nothing else does.
//!
//! Frontends hold topic names and `ItemId`s, never references into the
//! workspace, and read state back after each operation.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::document::{Document, DocumentError};
use crate::geometry::Extent;
use crate::list::{ItemId, ListError, PositionalList};
use crate::storage::{self, StorageError};

/// Errors from workspace operations
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("project has no filename yet; save it to an explicit path first")]
    NoFilename,
}

/// Document plus the positional lists its order is derived from
pub struct Workspace {
    config: Config,
    document: Document,
    /// One line per topic; item text is the topic name
    board: PositionalList,
    /// Per-topic note canvases, keyed by topic name
    note_lists: HashMap<String, PositionalList>,
}

impl Workspace {
    /// Start an empty session
    pub fn new(config: Config) -> Self {
        let board = Self::make_list(&config);
        Self {
            config,
            document: Document::new(),
            board,
            note_lists: HashMap::new(),
        }
    }

    /// Rebuild a session around a loaded document
    ///
    /// Board lines are laid out in `topics_by_number` order and each topic's
    /// notes in their stored order, so a freshly loaded session commits back
    /// to exactly the order it was saved with. `measure` supplies the
    /// rendered extent for each item's text; extents are a renderer concern
    /// the core does not guess at.
    pub fn from_document(
        document: Document,
        config: Config,
        mut measure: impl FnMut(&str) -> Extent,
    ) -> Self {
        let mut board = Self::make_list(&config);
        let mut note_lists = HashMap::new();

        for topic in document.topics_by_number() {
            board.insert(&topic.name, measure(&topic.name));
            let mut list = Self::make_list(&config);
            for note in &topic.notes {
                list.insert(note, measure(note));
            }
            note_lists.insert(topic.name.clone(), list);
        }

        Self {
            config,
            document,
            board,
            note_lists,
        }
    }

    fn make_list(config: &Config) -> PositionalList {
        PositionalList::with_gap(config.canvas_width, config.canvas_height, config.item_gap)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The topic board list
    pub fn board(&self) -> &PositionalList {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut PositionalList {
        &mut self.board
    }

    /// A topic's note canvas
    pub fn note_list(&self, topic: &str) -> Option<&PositionalList> {
        self.note_lists.get(topic)
    }

    pub fn note_list_mut(&mut self, topic: &str) -> Option<&mut PositionalList> {
        self.note_lists.get_mut(topic)
    }

    // ==================== Document operations ====================

    /// Create a topic: document record, board line, and empty note canvas
    pub fn create_topic(&mut self, name: &str, line_extent: Extent) -> Result<(), WorkspaceError> {
        self.document.create_topic(name)?;
        self.board.insert(name, line_extent);
        self.note_lists
            .insert(name.to_string(), Self::make_list(&self.config));
        Ok(())
    }

    /// File the currently displayed note into a topic
    pub fn add_note_to_topic(
        &mut self,
        topic: &str,
        note_extent: Extent,
    ) -> Result<String, WorkspaceError> {
        let note = self.document.add_note_to_topic(topic)?;
        let list = self
            .note_lists
            .get_mut(topic)
            .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
        list.insert(&note, note_extent);
        Ok(note)
    }

    /// Pull a dragged-out note back into the pending queue
    ///
    /// Looks up the item's text, removes the first matching note from the
    /// topic (it becomes the next displayed note), then drops the canvas
    /// item.
    pub fn remove_note_from_topic(
        &mut self,
        topic: &str,
        item: ItemId,
    ) -> Result<String, WorkspaceError> {
        let text = {
            let list = self
                .note_lists
                .get(topic)
                .ok_or_else(|| DocumentError::TopicNotFound(topic.to_string()))?;
            let item = list.get(item).ok_or(ListError::UnknownItem(item))?;
            item.text().to_string()
        };

        self.document.remove_note_from_topic(topic, &text)?;
        if let Some(list) = self.note_lists.get_mut(topic) {
            list.remove(item)?;
        }
        debug!("returned note to queue from topic '{}'", topic);
        Ok(text)
    }

    pub fn next_note(&mut self) {
        self.document.next_note();
    }

    pub fn prev_note(&mut self) {
        self.document.prev_note();
    }

    /// Append the notes from a plain-text file to the pending queue
    pub fn import_notes(&mut self, path: &Path) -> Result<usize, WorkspaceError> {
        let notes = storage::import_notes(path)?;
        let count = notes.len();
        for note in notes {
            self.document.push_note(note);
        }
        Ok(count)
    }

    // ==================== Order commit & persistence ====================

    /// Freeze the current spatial arrangement into the document
    ///
    /// Every topic's notes are replaced by its canvas's position order, and
    /// topics are renumbered 0..n by board position. Runs only when called
    /// (saving and exporting call it); persisted order is exactly as fresh
    /// as the last commit.
    pub fn commit_order(&mut self) -> Result<(), WorkspaceError> {
        for (name, list) in &self.note_lists {
            self.document.set_topic_notes(name, list.ordered_texts())?;
        }
        for (rank, line) in self.board.ordered().into_iter().enumerate() {
            self.document.set_topic_number(line.text(), rank as u32)?;
        }
        Ok(())
    }

    /// Commit, then write the project to `path` and remember it
    pub fn save(&mut self, path: &Path) -> Result<(), WorkspaceError> {
        self.commit_order()?;
        storage::save_project(&self.document, path)?;
        self.document.set_filename(path);
        Ok(())
    }

    /// Commit, then write the project to its existing filename
    pub fn save_current(&mut self) -> Result<(), WorkspaceError> {
        let path = self
            .document
            .filename()
            .ok_or(WorkspaceError::NoFilename)?
            .to_path_buf();
        self.save(&path)
    }

    /// Commit, then write the plain-text outline to `path`
    pub fn export(&mut self, path: &Path) -> Result<(), WorkspaceError> {
        self.commit_order()?;
        storage::export_outline(&self.document, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn extent(_text: &str) -> Extent {
        Extent::new(100.0, 20.0)
    }

    fn workspace_with_notes(notes: &[&str]) -> Workspace {
        let mut ws = Workspace::new(Config::default());
        let mut doc = Document::new();
        for note in notes {
            doc.push_note(*note);
        }
        ws.document = doc;
        ws
    }

    #[test]
    fn test_create_topic_builds_board_line_and_canvas() {
        let mut ws = workspace_with_notes(&[]);
        ws.create_topic("Intro", extent("Intro")).unwrap();

        assert_eq!(ws.board().len(), 1);
        assert!(ws.note_list("Intro").unwrap().is_empty());
        assert_eq!(ws.document().topic("Intro").unwrap().number, 0);
    }

    #[test]
    fn test_add_note_lands_on_topic_canvas() {
        let mut ws = workspace_with_notes(&["first", "second"]);
        ws.create_topic("T", extent("T")).unwrap();

        let note = ws.add_note_to_topic("T", extent("first")).unwrap();
        assert_eq!(note, "first");
        assert_eq!(ws.note_list("T").unwrap().ordered_texts(), vec!["first"]);
        assert_eq!(ws.document().current_note(), Some("second"));
    }

    #[test]
    fn test_add_note_on_empty_queue_is_typed_error() {
        let mut ws = workspace_with_notes(&[]);
        ws.create_topic("T", extent("T")).unwrap();

        let err = ws.add_note_to_topic("T", extent("")).unwrap_err();
        assert!(matches!(
            err,
            WorkspaceError::Document(DocumentError::EmptyQueue)
        ));
        assert!(ws.note_list("T").unwrap().is_empty());
    }

    #[test]
    fn test_dragged_note_order_survives_commit() {
        let mut ws = workspace_with_notes(&["a", "b", "c"]);
        ws.create_topic("T", extent("T")).unwrap();
        for _ in 0..3 {
            ws.add_note_to_topic("T", Extent::new(100.0, 20.0)).unwrap();
        }

        // Stored order is still insertion order
        assert_eq!(ws.document().topic("T").unwrap().notes, vec!["a", "b", "c"]);

        // Drag "c" above everything, then commit
        let list = ws.note_list_mut("T").unwrap();
        let c = list.ordered()[2].id();
        list.relocate(c, 0.0, -1000.0).unwrap();
        ws.commit_order().unwrap();

        assert_eq!(ws.document().topic("T").unwrap().notes, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_board_drag_renumbers_topics() {
        let mut ws = workspace_with_notes(&[]);
        ws.create_topic("First", extent("First")).unwrap();
        ws.create_topic("Second", extent("Second")).unwrap();

        let board = ws.board_mut();
        let second_line = board.ordered()[1].id();
        board.relocate(second_line, 0.0, -500.0).unwrap();
        ws.commit_order().unwrap();

        let names: Vec<&str> = ws
            .document()
            .topics_by_number()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_remove_note_returns_it_to_front() {
        let mut ws = workspace_with_notes(&["a", "b"]);
        ws.create_topic("T", extent("T")).unwrap();
        ws.add_note_to_topic("T", extent("a")).unwrap();

        let item = ws.note_list("T").unwrap().ordered()[0].id();
        let text = ws.remove_note_from_topic("T", item).unwrap();
        assert_eq!(text, "a");
        assert!(ws.note_list("T").unwrap().is_empty());
        assert_eq!(
            ws.document().pending_notes().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_from_document_round_trips_order() {
        let mut ws = workspace_with_notes(&["a", "b", "c"]);
        ws.create_topic("Keep", extent("Keep")).unwrap();
        ws.create_topic("Drop", extent("Drop")).unwrap();
        ws.add_note_to_topic("Keep", extent("a")).unwrap();
        ws.add_note_to_topic("Keep", extent("b")).unwrap();
        ws.commit_order().unwrap();

        let rebuilt = Workspace::from_document(ws.document().clone(), Config::default(), extent);
        let mut rebuilt = rebuilt;
        rebuilt.commit_order().unwrap();

        assert_eq!(rebuilt.document(), ws.document());
    }

    #[test]
    fn test_save_load_round_trip_after_drag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("essay.otln");

        let mut ws = workspace_with_notes(&["a", "b", "c"]);
        ws.create_topic("T", extent("T")).unwrap();
        ws.add_note_to_topic("T", extent("a")).unwrap();
        ws.add_note_to_topic("T", extent("b")).unwrap();

        let list = ws.note_list_mut("T").unwrap();
        let b = list.ordered()[1].id();
        list.relocate(b, 0.0, -300.0).unwrap();

        ws.save(&path).unwrap();
        assert_eq!(ws.document().filename(), Some(path.as_path()));

        let loaded = storage::load_project(&path).unwrap();
        assert_eq!(loaded.topic("T").unwrap().notes, vec!["b", "a"]);
        assert_eq!(loaded.pending_notes().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_save_current_requires_filename() {
        let mut ws = workspace_with_notes(&[]);
        assert!(matches!(
            ws.save_current().unwrap_err(),
            WorkspaceError::NoFilename
        ));
    }

    #[test]
    fn test_import_appends_to_queue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "One\n\nTwo lines\nhere\n").unwrap();

        let mut ws = workspace_with_notes(&["existing"]);
        let count = ws.import_notes(&path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            ws.document().pending_notes().collect::<Vec<_>>(),
            vec!["existing", "One", "Two lines here"]
        );
    }
}

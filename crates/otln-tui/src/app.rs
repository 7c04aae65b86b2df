//! Application state and logic

use std::path::PathBuf;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use otln_core::{
    DocumentError, DragController, Extent, Point, Workspace, WorkspaceError,
};

/// Which screen is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The topic board plus the current-note bar
    Board,
    /// One topic's note canvas
    Topic(String),
}

/// Keyboard input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing the name for a new topic
    NewTopic,
}

/// Application state
pub struct App {
    pub workspace: Workspace,
    /// Where `s` saves the project
    pub project_path: PathBuf,
    pub view: View,
    pub input_mode: InputMode,
    /// Name-in-progress while `input_mode` is `NewTopic`
    pub input_buffer: String,
    /// Selected board line, as an index into the board's current order
    pub selected: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Screen region of the active canvas, recorded at draw time so mouse
    /// coordinates can be translated into canvas-local ones
    pub canvas_area: Rect,
    /// True while a dragged note hovers in the drop-to-remove strip
    pub removal_armed: bool,
    drag: DragController,
}

impl App {
    pub fn new(workspace: Workspace, project_path: PathBuf) -> Self {
        Self {
            workspace,
            project_path,
            view: View::Board,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            selected: 0,
            status_message: None,
            should_quit: false,
            canvas_area: Rect::default(),
            removal_armed: false,
            drag: DragController::new(),
        }
    }

    /// Extent of a freshly rendered item: one terminal row, canvas wide
    fn item_extent(&self) -> Extent {
        Extent::new(self.workspace.config().canvas_width - 2.0, 1.0)
    }

    /// Item being dragged, if any
    pub fn dragging(&self) -> Option<otln_core::ItemId> {
        self.drag.active_item()
    }

    // ==================== Selection & views ====================

    /// Name of the selected board line
    pub fn selected_topic(&self) -> Option<String> {
        self.workspace
            .board()
            .ordered()
            .get(self.selected)
            .map(|item| item.text().to_string())
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let count = self.workspace.board().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    /// Switch to the selected topic's note canvas
    pub fn open_selected_topic(&mut self) {
        if let Some(name) = self.selected_topic() {
            self.view = View::Topic(name);
        }
    }

    /// Return to the board
    pub fn back_to_board(&mut self) {
        self.view = View::Board;
        self.removal_armed = false;
    }

    // ==================== Topic & note actions ====================

    pub fn start_topic_input(&mut self) {
        self.input_mode = InputMode::NewTopic;
        self.input_buffer.clear();
    }

    pub fn cancel_topic_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Create the topic named in the input buffer
    pub fn commit_topic_input(&mut self) {
        let name = self.input_buffer.trim().to_string();
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        if name.is_empty() {
            return;
        }

        let extent = self.item_extent();
        match self.workspace.create_topic(&name, extent) {
            Ok(()) => self.status_message = Some(format!("Created topic '{}'", name)),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// File the displayed note into the selected topic
    pub fn assign_to_selected(&mut self) {
        let Some(topic) = self.selected_topic() else {
            self.status_message = Some("No topic selected.".to_string());
            return;
        };

        let extent = self.item_extent();
        match self.workspace.add_note_to_topic(&topic, extent) {
            Ok(_) => self.status_message = Some(format!("Filed into '{}'", topic)),
            // An empty queue is not an error to the user, just nothing to do
            Err(WorkspaceError::Document(DocumentError::EmptyQueue)) => {
                self.status_message = Some("No more notes.".to_string());
            }
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn next_note(&mut self) {
        self.workspace.next_note();
    }

    pub fn prev_note(&mut self) {
        self.workspace.prev_note();
    }

    pub fn save(&mut self) {
        let path = self.project_path.clone();
        match self.workspace.save(&path) {
            Ok(()) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    pub fn export(&mut self) {
        let path = self.project_path.with_extension("txt");
        match self.workspace.export(&path) {
            Ok(()) => self.status_message = Some(format!("Exported {}", path.display())),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    // ==================== Mouse ====================

    /// Route a terminal mouse event into the drag controller
    ///
    /// Coordinates are translated into the active canvas's local space using
    /// the region recorded at draw time; a row above the canvas comes out at
    /// a negative y, which is the drop-to-remove strip on a topic canvas.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let area = self.canvas_area;
        let at = Point::new(
            event.column as f64 - area.x as f64,
            event.row as f64 - area.y as f64,
        );

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = event.column >= area.x
                    && event.column < area.x + area.width
                    && event.row >= area.y
                    && event.row < area.y + area.height;
                if !inside {
                    return;
                }
                match &self.view {
                    View::Board => {
                        self.drag.pointer_down(self.workspace.board(), at);
                    }
                    View::Topic(name) => {
                        if let Some(list) = self.workspace.note_list(name) {
                            self.drag.pointer_down(list, at);
                        }
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                match &self.view {
                    View::Board => {
                        let _ = self.drag.pointer_move(self.workspace.board_mut(), at);
                    }
                    View::Topic(name) => {
                        if let Some(list) = self.workspace.note_list_mut(name) {
                            let _ = self.drag.pointer_move(list, at);
                        }
                    }
                }
                self.removal_armed = matches!(self.view, View::Topic(_))
                    && self.drag.is_dragging()
                    && at.y < 0.0;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.removal_armed = false;
                let Some(end) = self.drag.pointer_up(at) else {
                    return;
                };
                if let View::Topic(name) = &self.view {
                    if end.in_removal_zone() {
                        let name = name.clone();
                        match self.workspace.remove_note_from_topic(&name, end.item) {
                            Ok(note) => {
                                self.status_message =
                                    Some(format!("Back in the queue: {}", note));
                            }
                            Err(err) => self.status_message = Some(err.to_string()),
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

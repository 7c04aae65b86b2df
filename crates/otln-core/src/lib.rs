//! otln core library
//!
//! This crate provides the core functionality for otln, an essay outliner:
//! freeform notes are filed into named topics and ordered by dragging them
//! around a canvas, then saved as a project or exported as a text outline.
//!
//! # Architecture
//!
//! Order is derived, not stored: a [`list::PositionalList`] keeps items at
//! 2-D positions and recomputes its canonical order from vertical position
//! on every query. A drag (driven through [`drag::DragController`]) only
//! translates an item; the new order surfaces at the next query. The
//! [`workspace::Workspace`] owns the document plus the lists, and
//! `commit_order` is the single point where spatial order becomes persisted
//! order.
//!
//! # Quick Start
//!
//! ```text
//! let mut ws = Workspace::new(Config::load()?);
//!
//! ws.import_notes(Path::new("notes.txt"))?;
//! ws.create_topic("Introduction", Extent::new(500.0, 20.0))?;
//! ws.add_note_to_topic("Introduction", Extent::new(500.0, 40.0))?;
//!
//! ws.save(Path::new("essay.otln"))?;
//! ws.export(Path::new("essay-outline.txt"))?;
//! ```
//!
//! # Modules
//!
//! - `workspace`: the editing session (main entry point)
//! - `document`: topics and the pending-note queue
//! - `list`: the position-ordered item container
//! - `drag`: pointer-event state machine
//! - `models`: persisted records
//! - `storage`: project codec, import/export, file I/O
//! - `config`: application configuration

pub mod config;
pub mod document;
pub mod drag;
pub mod geometry;
pub mod list;
pub mod models;
pub mod storage;
pub mod workspace;

pub use config::Config;
pub use document::{Document, DocumentError};
pub use drag::{DragController, DragEnd};
pub use geometry::{Extent, Point};
pub use list::{Item, ItemId, ListError, PositionalList};
pub use models::TopicRecord;
pub use storage::{StorageError, StorageResult, PROJECT_EXT};
pub use workspace::{Workspace, WorkspaceError};

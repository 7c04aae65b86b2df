//! Outline persistence
//!
//! - `format`: the line-oriented project file codec (pure string transform)
//! - `persistence`: file I/O for project load/save, note import, and
//!   outline export
//! - `error`: typed storage errors

pub mod error;
pub mod format;
pub mod persistence;

pub use error::{StorageError, StorageResult, PROJECT_LINES};
pub use persistence::{
    export_outline, import_notes, load_project, save_project, PROJECT_EXT,
};

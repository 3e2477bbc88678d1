//! Core persistence logic for InkNote drawing notes.
//! This crate owns note files, autosave debouncing and lasso selection.

pub mod config;
pub mod document;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, DEFAULT_AUTOSAVE_DELAY_MS};
pub use document::codec::{CodecError, CodecResult, JsonStrokeCodec, StrokeCodec};
pub use document::drawing_document::{
    load_drawing, serialize_drawing, DocumentChange, DrawingDocument,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use model::stroke::{Drawing, Stroke, StrokeId};
pub use service::autosave::{
    AutosaveController, AutosaveError, AutosaveOutcome, AutosaveState, DrawingSink,
    FileDrawingSink,
};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use service::selection::{
    probe_selection, DrawingSurface, SelectionEngine, SelectionSet, ToolKind,
};
pub use store::note_store::{NoteStore, StoreError, StoreResult};
pub use store::path::{note_path, slug, NotePath, Slug, NOTE_FILE_EXTENSION};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

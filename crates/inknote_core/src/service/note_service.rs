//! Note list use-case service.
//!
//! # Responsibility
//! - Keep the in-memory note list in step with the notes directory.
//! - Validate titles before they reach the filesystem.
//! - Wire an opened note to its document and autosave controller.
//!
//! # Invariants
//! - A note is removed from the list only after its file is deleted.
//! - Titles never contain path separators, so every note path stays inside
//!   the notes directory.

use crate::config::CoreConfig;
use crate::document::codec::StrokeCodec;
use crate::document::drawing_document::DrawingDocument;
use crate::model::note::{Note, NoteId};
use crate::service::autosave::{AutosaveController, FileDrawingSink};
use crate::store::note_store::{NoteStore, StoreError};
use crate::store::path::NotePath;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Service error for note list use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title is blank or would escape the notes directory.
    InvalidTitle(String),
    /// No note with this id in the current list.
    NoteNotFound(NoteId),
    /// Store-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(value) => write!(f, "invalid note title: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note list facade over a `NoteStore`.
pub struct NoteService {
    store: NoteStore,
    autosave_delay: Duration,
    notes: Vec<Note>,
}

impl NoteService {
    /// Creates a service with an empty list; call `refresh` to populate it.
    pub fn new(store: NoteStore, autosave_delay: Duration) -> Self {
        Self {
            store,
            autosave_delay,
            notes: Vec::new(),
        }
    }

    /// Startup path: ensures the directory exists and lists its notes.
    pub fn start(config: &CoreConfig) -> NoteServiceResult<Self> {
        let mut service = Self::new(NoteStore::from_config(config), config.autosave_delay());
        service.store.ensure_directory()?;
        service.refresh()?;
        Ok(service)
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Re-reads the notes directory. Ids are regenerated.
    pub fn refresh(&mut self) -> NoteServiceResult<&[Note]> {
        self.notes = self.store.list()?;
        Ok(&self.notes)
    }

    /// Creates a note file and appends the note to the list.
    ///
    /// The list keeps the title as entered; a later `refresh` shows the
    /// slugged file-name form.
    pub fn create_note(&mut self, title: impl Into<String>) -> NoteServiceResult<Note> {
        let title = title.into();
        validate_title(&title)?;

        self.store.ensure_directory()?;
        if self.store.exists(&title) {
            warn!("event=note_create module=note_service status=ok overwrite=true");
        }
        self.store.create(&title)?;

        let note = Note::new(title);
        self.notes.push(note.clone());
        info!(
            "event=note_create module=note_service status=ok count={}",
            self.notes.len()
        );
        Ok(note)
    }

    /// Deletes the note file, then drops the note from the list.
    pub fn delete_note(&mut self, id: NoteId) -> NoteServiceResult<Note> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;

        self.store.delete(&self.notes[index].title)?;
        let removed = self.notes.remove(index);
        info!(
            "event=note_delete module=note_service status=ok count={}",
            self.notes.len()
        );
        Ok(removed)
    }

    pub fn note_path(&self, id: NoteId) -> NoteServiceResult<NotePath> {
        let note = self.find(id).ok_or(NoteServiceError::NoteNotFound(id))?;
        Ok(self.store.resolve_path(&note.title))
    }

    /// Loads the note's drawing with the silent-fallback policy.
    pub fn open_document(
        &self,
        id: NoteId,
        codec: &impl StrokeCodec,
    ) -> NoteServiceResult<DrawingDocument> {
        let path = self.note_path(id)?;
        Ok(DrawingDocument::open(&path, codec))
    }

    /// Builds an autosave controller bound to the note's current path.
    pub fn autosave_for<C: StrokeCodec>(
        &self,
        id: NoteId,
        codec: C,
    ) -> NoteServiceResult<AutosaveController<FileDrawingSink<C>>> {
        let path = self.note_path(id)?;
        Ok(AutosaveController::new(
            FileDrawingSink::new(path, codec),
            self.autosave_delay,
        ))
    }
}

/// Rejects blank titles and titles that are not a single path component.
pub fn validate_title(title: &str) -> NoteServiceResult<()> {
    let invalid = title.trim().is_empty() || title.contains(['/', '\\', '\0']);
    if invalid {
        return Err(NoteServiceError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, NoteServiceError};

    #[test]
    fn validate_title_rejects_blank_and_separators() {
        for bad in ["", "   ", "a/b", "a\\b", "nul\0byte"] {
            assert!(
                matches!(validate_title(bad), Err(NoteServiceError::InvalidTitle(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn validate_title_accepts_punctuation_and_unicode() {
        for good in ["Trip Plan", "Café notes!", "2026-10-19 review"] {
            assert!(validate_title(good).is_ok());
        }
    }
}

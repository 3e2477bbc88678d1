//! Note list model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// In-memory identifier for one listed note.
///
/// Generated per listing; it is not persisted and does not survive a reload.
pub type NoteId = Uuid;

/// One named drawing backed by a single file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Stable for the lifetime of the in-memory list.
    pub id: NoteId,
    /// User-facing title. Listed notes carry the on-disk (slugged) form.
    pub title: String,
}

impl Note {
    /// Creates a note handle with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }
}

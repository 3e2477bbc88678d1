//! Directory-backed note store.
//!
//! # Responsibility
//! - Own the notes directory and every file operation inside it.
//! - Translate filesystem failures into semantic store errors.
//!
//! # Invariants
//! - `create` requires an existing directory (`ensure_directory` first).
//! - `create` over an existing note truncates it without complaint.
//! - `delete` of a missing note is `NotFound`, never a silent success.
//! - Log lines carry metadata only; note titles never reach the log.

use crate::config::CoreConfig;
use crate::model::note::Note;
use crate::store::path::{note_path, title_from_file_name, NotePath};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for note file operations.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure (permissions, missing parent, disk full).
    Io { path: PathBuf, source: io::Error },
    /// Requested note has no backing file.
    NotFound(PathBuf),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Maps `ErrorKind::NotFound` to `StoreError::NotFound`, everything else to `Io`.
    fn from_lookup(path: &Path, source: io::Error) -> Self {
        if source.kind() == ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::io(path, source)
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::NotFound(path) => write!(f, "note not found: `{}`", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

/// Note CRUD over one configured directory.
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes_dir: PathBuf,
}

impl NoteStore {
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.notes_dir.clone())
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Creates the notes directory and its parents when absent.
    ///
    /// "Already exists" is success.
    pub fn ensure_directory(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.notes_dir).map_err(|err| {
            error!(
                "event=notes_dir_create module=store status=error kind={:?}",
                err.kind()
            );
            StoreError::io(&self.notes_dir, err)
        })
    }

    /// Lists one note per `.drawing` file, in directory enumeration order.
    ///
    /// Every call generates fresh note ids.
    pub fn list(&self) -> StoreResult<Vec<Note>> {
        let entries =
            fs::read_dir(&self.notes_dir).map_err(|err| StoreError::io(&self.notes_dir, err))?;

        let mut notes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.notes_dir, err))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(title) = title_from_file_name(&path) {
                notes.push(Note::new(title));
            }
        }

        debug!(
            "event=notes_list module=store status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Creates an empty note file and returns its path.
    ///
    /// A missing notes directory surfaces as `Io`.
    pub fn create(&self, title: &str) -> StoreResult<NotePath> {
        let path = self.resolve_path(title);
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_path())
            .map_err(|err| {
                error!(
                    "event=note_create module=store status=error kind={:?}",
                    err.kind()
                );
                StoreError::io(path.as_path(), err)
            })?;

        info!("event=note_create module=store status=ok");
        Ok(path)
    }

    /// Removes the note file for `title`.
    pub fn delete(&self, title: &str) -> StoreResult<()> {
        let path = self.resolve_path(title);
        fs::remove_file(path.as_path()).map_err(|err| {
            error!(
                "event=note_delete module=store status=error kind={:?}",
                err.kind()
            );
            StoreError::from_lookup(path.as_path(), err)
        })?;

        info!("event=note_delete module=store status=ok");
        Ok(())
    }

    pub fn resolve_path(&self, title: &str) -> NotePath {
        note_path(&self.notes_dir, title)
    }

    pub fn exists(&self, title: &str) -> bool {
        self.resolve_path(title).as_path().is_file()
    }

    /// Reads the raw payload of one note.
    pub fn read_bytes(&self, title: &str) -> StoreResult<Vec<u8>> {
        read_note_file(&self.resolve_path(title))
    }

    /// Overwrites the raw payload of one note, creating the file if needed.
    pub fn write_bytes(&self, title: &str, bytes: &[u8]) -> StoreResult<NotePath> {
        let path = self.resolve_path(title);
        write_note_file(&path, bytes)?;
        Ok(path)
    }
}

/// Reads one note file.
pub fn read_note_file(path: &NotePath) -> StoreResult<Vec<u8>> {
    fs::read(path.as_path()).map_err(|err| StoreError::from_lookup(path.as_path(), err))
}

/// Writes one note file in full.
pub fn write_note_file(path: &NotePath, bytes: &[u8]) -> StoreResult<()> {
    fs::write(path.as_path(), bytes).map_err(|err| StoreError::io(path.as_path(), err))
}

//! File-backed note storage.
//!
//! # Responsibility
//! - Map note titles to file paths deterministically.
//! - Provide create/list/delete over a single notes directory.
//!
//! # Invariants
//! - One note is exactly one `<slug>.drawing` file in the notes directory.
//! - Titles that slug to the same value share one file.
//! - Store APIs return `NotFound` in addition to filesystem errors.

pub mod note_store;
pub mod path;

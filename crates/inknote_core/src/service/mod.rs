//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and document calls into use-case level APIs.
//! - Own the autosave debounce and lasso selection state machines.
//! - Keep UI hosts decoupled from file layout details.

pub mod autosave;
pub mod note_service;
pub mod selection;

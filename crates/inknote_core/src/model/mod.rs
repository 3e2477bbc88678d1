//! Domain model for drawing notes.
//!
//! # Responsibility
//! - Define the note handle shown in note lists.
//! - Define opaque strokes and the ordered drawing they belong to.
//!
//! # Invariants
//! - Every stroke carries a generated `StrokeId`; identity never depends on
//!   payload bytes.
//! - Selection state is never part of a persisted `Drawing`.

pub mod note;
pub mod stroke;

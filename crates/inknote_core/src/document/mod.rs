//! In-memory drawing document and its stroke codec seam.
//!
//! # Responsibility
//! - Hold the current drawing of one open note.
//! - Publish a change notification for every replacement.
//! - Load/serialize through an externally supplied `StrokeCodec`.
//!
//! # Invariants
//! - Loading never fails: unreadable or undecodable files become an empty
//!   drawing.
//! - Subscribers receive the current value immediately on subscription.

pub mod codec;
pub mod drawing_document;

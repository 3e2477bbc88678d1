//! Stroke and drawing model.
//!
//! # Responsibility
//! - Carry opaque ink payloads alongside a stable identity token.
//! - Keep drawing order for serialization.
//!
//! # Invariants
//! - `StrokeId` equality is the only stroke identity used by core.
//! - Core never inspects `Stroke::payload`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Identity token for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for StrokeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One opaque unit of ink content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Host-encoded ink geometry.
    pub payload: Vec<u8>,
}

impl Stroke {
    /// Wraps a payload with a newly generated identity.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self::with_id(StrokeId::new(), payload)
    }

    /// Wraps a payload with an identity that already exists on the host side.
    pub fn with_id(id: StrokeId, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }
}

/// Ordered stroke collection belonging to one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Returns stroke ids in drawing order.
    pub fn stroke_ids(&self) -> Vec<StrokeId> {
        self.strokes.iter().map(|stroke| stroke.id).collect()
    }

    /// Returns the id set used for identity-based set difference.
    pub fn id_set(&self) -> BTreeSet<StrokeId> {
        self.strokes.iter().map(|stroke| stroke.id).collect()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.strokes.iter().any(|stroke| stroke.id == id)
    }

    /// Removes every stroke whose id is in `ids`, keeping the order of the rest.
    ///
    /// Returns the number of removed strokes.
    pub fn remove_ids(&mut self, ids: &BTreeSet<StrokeId>) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|stroke| !ids.contains(&stroke.id));
        before - self.strokes.len()
    }
}

//! Lasso selection derived from a destructive surface probe.
//!
//! # Responsibility
//! - Work out which strokes the host lasso currently selects.
//! - Leave the surface exactly as it was before the probe.
//!
//! # Invariants
//! - The probe only runs while a lasso tool is active.
//! - After `refresh`, the surface holds the pre-probe drawing in its
//!   original order.
//! - Selection is never written into a `Drawing`.

use crate::model::stroke::{Drawing, StrokeId};
use log::debug;
use std::collections::BTreeSet;

/// Tool categories the host reports for its active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Ink,
    Eraser,
    Lasso,
    Other,
}

impl ToolKind {
    pub fn is_lasso(self) -> bool {
        matches!(self, Self::Lasso)
    }
}

/// Host drawing surface as seen by the selection probe.
pub trait DrawingSurface {
    /// Current stroke collection, in surface order.
    fn drawing(&self) -> &Drawing;
    /// Replaces the stroke collection wholesale.
    fn set_drawing(&mut self, drawing: Drawing);
    /// Removes whatever the host considers lasso-selected.
    fn extract_selection(&mut self);
    fn active_tool(&self) -> ToolKind;
}

/// Stroke ids picked by the last lasso interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<StrokeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &BTreeSet<StrokeId> {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrokeId> {
        self.ids.iter()
    }
}

impl FromIterator<StrokeId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = StrokeId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Runs the probe once and returns `S0 - S1`.
///
/// Non-lasso tools short-circuit to an empty selection without touching the
/// surface.
pub fn probe_selection(surface: &mut impl DrawingSurface) -> SelectionSet {
    if !surface.active_tool().is_lasso() {
        return SelectionSet::new();
    }

    let before = surface.drawing().clone();
    surface.extract_selection();
    let remaining = surface.drawing().id_set();

    let selected: SelectionSet = before
        .strokes()
        .iter()
        .map(|stroke| stroke.id)
        .filter(|id| !remaining.contains(id))
        .collect();

    // Restore from the captured snapshot, never by re-inserting into S1.
    if surface.drawing() != &before {
        surface.set_drawing(before);
    }

    debug!(
        "event=lasso_probe module=selection status=ok selected={}",
        selected.len()
    );
    selected
}

/// Holds the published selection between lasso interactions.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    current: SelectionSet,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the selection from the surface and publishes it.
    pub fn refresh(&mut self, surface: &mut impl DrawingSurface) -> &SelectionSet {
        self.current = probe_selection(surface);
        &self.current
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.current
    }

    pub fn has_selection(&self) -> bool {
        !self.current.is_empty()
    }

    pub fn clear(&mut self) {
        self.current = SelectionSet::new();
    }

    /// Hands the selection to the caller and clears it.
    pub fn take(&mut self) -> SelectionSet {
        std::mem::take(&mut self.current)
    }
}

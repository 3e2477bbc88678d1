//! Drawing document: current value, revisions and change feed.
//!
//! # Responsibility
//! - Own the drawing of one open note and its revision counter.
//! - Fan out `DocumentChange` events over mpsc channels.
//! - Provide the silent-fallback load path used when a note is opened.
//!
//! # Invariants
//! - Revision 0 is the loaded (or empty) value; every replacement bumps it.
//! - Disconnected subscribers are dropped on the next notification.

use crate::document::codec::{CodecResult, StrokeCodec};
use crate::model::stroke::{Drawing, Stroke};
use crate::service::selection::SelectionSet;
use crate::store::note_store::{read_note_file, StoreError};
use crate::store::path::NotePath;
use log::{debug, warn};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One published document value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub revision: u64,
    pub drawing: Drawing,
}

/// Loads a drawing, falling back to an empty one.
///
/// A missing file, a read failure, an empty file and undecodable bytes all
/// yield `Drawing::default()`.
pub fn load_drawing(path: &NotePath, codec: &impl StrokeCodec) -> Drawing {
    let bytes = match read_note_file(path) {
        Ok(bytes) => bytes,
        Err(StoreError::NotFound(_)) => {
            debug!("event=drawing_load module=document status=ok source=missing_file");
            return Drawing::default();
        }
        Err(err) => {
            warn!("event=drawing_load module=document status=error stage=read error={err}");
            return Drawing::default();
        }
    };

    if bytes.is_empty() {
        debug!("event=drawing_load module=document status=ok source=empty_file");
        return Drawing::default();
    }

    match codec.decode(&bytes) {
        Ok(drawing) => {
            debug!(
                "event=drawing_load module=document status=ok strokes={}",
                drawing.len()
            );
            drawing
        }
        Err(err) => {
            warn!(
                "event=drawing_load module=document status=error stage=decode bytes={} error={err}",
                bytes.len()
            );
            Drawing::default()
        }
    }
}

/// Encodes a drawing with the given codec.
pub fn serialize_drawing(drawing: &Drawing, codec: &impl StrokeCodec) -> CodecResult<Vec<u8>> {
    codec.encode(drawing)
}

/// In-memory document for one open note.
#[derive(Debug, Default)]
pub struct DrawingDocument {
    drawing: Drawing,
    revision: u64,
    subscribers: Vec<Sender<DocumentChange>>,
}

impl DrawingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_drawing(drawing: Drawing) -> Self {
        Self {
            drawing,
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    /// Opens the note at `path` using the silent-fallback load policy.
    pub fn open(path: &NotePath, codec: &impl StrokeCodec) -> Self {
        Self::from_drawing(load_drawing(path, codec))
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a change listener.
    ///
    /// The current value is queued right away, so the first received event
    /// is always the initial (loaded) state.
    pub fn subscribe(&mut self) -> Receiver<DocumentChange> {
        let (sender, receiver) = channel();
        // Why: the receiver is still held here, so this send cannot fail.
        let _ = sender.send(self.snapshot());
        self.subscribers.push(sender);
        receiver
    }

    /// Replaces the whole drawing and notifies subscribers.
    pub fn replace(&mut self, drawing: Drawing) {
        self.drawing = drawing;
        self.bump();
    }

    /// Mutates the drawing in place and notifies subscribers.
    pub fn update(&mut self, edit: impl FnOnce(&mut Drawing)) {
        edit(&mut self.drawing);
        self.bump();
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.update(|drawing| drawing.push(stroke));
    }

    /// Deletes the selected strokes, notifying only when something was removed.
    ///
    /// Returns the number of removed strokes.
    pub fn remove_strokes(&mut self, selection: &SelectionSet) -> usize {
        let removed = self.drawing.remove_ids(selection.ids());
        if removed > 0 {
            self.bump();
        }
        removed
    }

    pub fn serialize(&self, codec: &impl StrokeCodec) -> CodecResult<Vec<u8>> {
        serialize_drawing(&self.drawing, codec)
    }

    fn snapshot(&self) -> DocumentChange {
        DocumentChange {
            revision: self.revision,
            drawing: self.drawing.clone(),
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
        let change = self.snapshot();
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::DrawingDocument;
    use crate::model::stroke::{Drawing, Stroke};
    use crate::service::selection::SelectionSet;

    #[test]
    fn subscribe_delivers_initial_value_first() {
        let stroke = Stroke::new(vec![1]);
        let mut document = DrawingDocument::from_drawing(Drawing::from_strokes(vec![stroke]));
        let feed = document.subscribe();

        let initial = feed.try_recv().expect("initial value queued");
        assert_eq!(initial.revision, 0);
        assert_eq!(initial.drawing.len(), 1);
        assert!(feed.try_recv().is_err());
    }

    #[test]
    fn every_edit_bumps_revision_and_notifies() {
        let mut document = DrawingDocument::new();
        let feed = document.subscribe();
        let _ = feed.try_recv();

        document.add_stroke(Stroke::new(vec![1]));
        document.replace(Drawing::new());

        let revisions: Vec<u64> = feed.try_iter().map(|change| change.revision).collect();
        assert_eq!(revisions, vec![1, 2]);
    }

    #[test]
    fn removing_nothing_does_not_notify() {
        let mut document = DrawingDocument::new();
        document.add_stroke(Stroke::new(vec![1]));
        let feed = document.subscribe();
        let _ = feed.try_recv();

        assert_eq!(document.remove_strokes(&SelectionSet::new()), 0);
        assert!(feed.try_recv().is_err());
        assert_eq!(document.revision(), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut document = DrawingDocument::new();
        drop(document.subscribe());
        let live = document.subscribe();

        document.add_stroke(Stroke::new(vec![2]));
        assert_eq!(document.subscribers.len(), 1);
        assert_eq!(live.try_iter().count(), 2);
    }
}

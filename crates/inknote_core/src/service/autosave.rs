//! Debounced autosave state machine.
//!
//! # Responsibility
//! - Coalesce bursts of document changes into a single write.
//! - Persist the latest pending drawing once the debounce window elapses.
//!
//! # Invariants
//! - The first notification after construction (the loaded value) never
//!   schedules a save.
//! - Each accepted change resets the deadline to `now + delay`.
//! - A failed save is reported once and not retried; the controller is back
//!   in `Idle` either way.
//! - The save target is fixed at construction; a pending save always lands on
//!   the note it was scheduled for.
//!
//! Time is passed in explicitly. The host owns the actual timer: it asks
//! `next_deadline()` when to wake up and calls `poll(now)` when it does.

use crate::config::CoreConfig;
use crate::document::codec::{CodecError, StrokeCodec};
use crate::document::drawing_document::DocumentChange;
use crate::model::stroke::Drawing;
use crate::store::note_store::{write_note_file, StoreError};
use crate::store::path::NotePath;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Failure of one persist attempt.
#[derive(Debug)]
pub enum AutosaveError {
    Encode(CodecError),
    Store(StoreError),
}

impl Display for AutosaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AutosaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CodecError> for AutosaveError {
    fn from(value: CodecError) -> Self {
        Self::Encode(value)
    }
}

impl From<StoreError> for AutosaveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Persistence seam used when a debounce window closes.
pub trait DrawingSink {
    fn persist(&mut self, drawing: &Drawing) -> Result<(), AutosaveError>;
}

/// Encodes with a codec and overwrites one note file.
#[derive(Debug, Clone)]
pub struct FileDrawingSink<C: StrokeCodec> {
    path: NotePath,
    codec: C,
}

impl<C: StrokeCodec> FileDrawingSink<C> {
    pub fn new(path: NotePath, codec: C) -> Self {
        Self { path, codec }
    }

    pub fn path(&self) -> &NotePath {
        &self.path
    }
}

impl<C: StrokeCodec> DrawingSink for FileDrawingSink<C> {
    fn persist(&mut self, drawing: &Drawing) -> Result<(), AutosaveError> {
        let bytes = self.codec.encode(drawing)?;
        write_note_file(&self.path, &bytes)?;
        debug!(
            "event=drawing_write module=autosave status=ok bytes={}",
            bytes.len()
        );
        Ok(())
    }
}

/// Debounce state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    PendingSave {
        drawing: Drawing,
        revision: u64,
        deadline: Instant,
    },
}

/// Result of one fired save.
#[derive(Debug)]
pub enum AutosaveOutcome {
    Saved { revision: u64 },
    Failed { revision: u64, error: AutosaveError },
}

impl AutosaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Change-to-save pipeline for one open note.
pub struct AutosaveController<S: DrawingSink> {
    sink: S,
    delay: Duration,
    state: AutosaveState,
    awaiting_initial: bool,
}

impl<S: DrawingSink> AutosaveController<S> {
    pub fn new(sink: S, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            state: AutosaveState::Idle,
            awaiting_initial: true,
        }
    }

    pub fn from_config(sink: S, config: &CoreConfig) -> Self {
        Self::new(sink, config.autosave_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &AutosaveState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AutosaveState::PendingSave { .. })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// When the host should call `poll` next, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            AutosaveState::Idle => None,
            AutosaveState::PendingSave { deadline, .. } => Some(*deadline),
        }
    }

    /// Feeds one document notification observed at `now`.
    pub fn on_change(&mut self, change: DocumentChange, now: Instant) {
        if self.awaiting_initial {
            self.awaiting_initial = false;
            debug!(
                "event=autosave_skip_initial module=autosave status=ok revision={}",
                change.revision
            );
            return;
        }

        // Idle and pending both end up here: latest value wins, window restarts.
        self.state = AutosaveState::PendingSave {
            drawing: change.drawing,
            revision: change.revision,
            deadline: now + self.delay,
        };
    }

    /// Drains every queued notification, stamping them with `now`.
    ///
    /// Returns the number of notifications consumed.
    pub fn pump(&mut self, feed: &Receiver<DocumentChange>, now: Instant) -> usize {
        let mut consumed = 0;
        for change in feed.try_iter() {
            self.on_change(change, now);
            consumed += 1;
        }
        consumed
    }

    /// Persists the pending drawing if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<AutosaveOutcome> {
        let due = matches!(
            &self.state,
            AutosaveState::PendingSave { deadline, .. } if *deadline <= now
        );
        if due {
            self.fire()
        } else {
            None
        }
    }

    /// Persists the pending drawing right away, ignoring the deadline.
    pub fn flush(&mut self) -> Option<AutosaveOutcome> {
        self.fire()
    }

    fn fire(&mut self) -> Option<AutosaveOutcome> {
        let AutosaveState::PendingSave {
            drawing, revision, ..
        } = std::mem::replace(&mut self.state, AutosaveState::Idle)
        else {
            return None;
        };

        match self.sink.persist(&drawing) {
            Ok(()) => {
                info!(
                    "event=autosave module=autosave status=ok revision={} strokes={}",
                    revision,
                    drawing.len()
                );
                Some(AutosaveOutcome::Saved { revision })
            }
            Err(error) => {
                error!(
                    "event=autosave module=autosave status=error revision={} error={}",
                    revision, error
                );
                Some(AutosaveOutcome::Failed { revision, error })
            }
        }
    }
}

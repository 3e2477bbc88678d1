use inknote_core::{
    AutosaveController, AutosaveError, AutosaveOutcome, DocumentChange, Drawing, DrawingDocument,
    DrawingSink, FileDrawingSink, JsonStrokeCodec, NoteStore, StoreError, Stroke, StrokeCodec,
};
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(1_000);

#[derive(Default)]
struct RecordingSink {
    writes: Vec<Drawing>,
}

impl DrawingSink for RecordingSink {
    fn persist(&mut self, drawing: &Drawing) -> Result<(), AutosaveError> {
        self.writes.push(drawing.clone());
        Ok(())
    }
}

struct FailingSink {
    attempts: usize,
}

impl DrawingSink for FailingSink {
    fn persist(&mut self, _drawing: &Drawing) -> Result<(), AutosaveError> {
        self.attempts += 1;
        Err(AutosaveError::Store(StoreError::NotFound("gone".into())))
    }
}

fn at(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}

fn edit(revision: u64, marker: u8) -> DocumentChange {
    DocumentChange {
        revision,
        drawing: Drawing::from_strokes(vec![Stroke::new(vec![marker])]),
    }
}

fn loaded(controller: &mut AutosaveController<impl DrawingSink>, start: Instant) {
    controller.on_change(
        DocumentChange {
            revision: 0,
            drawing: Drawing::new(),
        },
        start,
    );
}

#[test]
fn burst_of_edits_collapses_into_one_write_of_last_content() {
    let start = Instant::now();
    let mut controller = AutosaveController::new(RecordingSink::default(), DELAY);
    loaded(&mut controller, start);

    controller.on_change(edit(1, 1), at(start, 0));
    assert!(controller.poll(at(start, 300)).is_none());
    controller.on_change(edit(2, 2), at(start, 300));
    assert!(controller.poll(at(start, 600)).is_none());
    controller.on_change(edit(3, 3), at(start, 600));

    // The first edit's window would have closed at t=1.0; the reset moved it.
    assert!(controller.poll(at(start, 1000)).is_none());
    assert!(controller.poll(at(start, 1590)).is_none());
    assert_eq!(controller.next_deadline(), Some(at(start, 1600)));

    let outcome = controller.poll(at(start, 1600)).unwrap();
    assert!(matches!(outcome, AutosaveOutcome::Saved { revision: 3 }));
    assert!(controller.poll(at(start, 5000)).is_none());

    let writes = &controller.sink().writes;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].strokes()[0].payload, vec![3]);
}

#[test]
fn edits_further_apart_than_delay_each_get_a_write() {
    let start = Instant::now();
    let mut controller = AutosaveController::new(RecordingSink::default(), DELAY);
    loaded(&mut controller, start);

    controller.on_change(edit(1, 1), at(start, 0));
    assert!(controller.poll(at(start, 1000)).unwrap().is_saved());

    controller.on_change(edit(2, 2), at(start, 2000));
    assert!(controller.poll(at(start, 2500)).is_none());
    assert!(controller.poll(at(start, 3000)).unwrap().is_saved());

    let payloads: Vec<Vec<u8>> = controller
        .sink()
        .writes
        .iter()
        .map(|drawing| drawing.strokes()[0].payload.clone())
        .collect();
    assert_eq!(payloads, vec![vec![1], vec![2]]);
}

#[test]
fn failed_save_is_reported_once_and_not_retried() {
    let start = Instant::now();
    let mut controller = AutosaveController::new(FailingSink { attempts: 0 }, DELAY);
    loaded(&mut controller, start);

    controller.on_change(edit(1, 1), start);
    let outcome = controller.poll(at(start, 1000)).unwrap();
    assert!(matches!(outcome, AutosaveOutcome::Failed { revision: 1, .. }));
    assert!(!controller.is_pending());
    assert!(controller.poll(at(start, 10000)).is_none());
    assert_eq!(controller.sink().attempts, 1);

    controller.on_change(edit(2, 2), at(start, 11000));
    assert!(controller.poll(at(start, 12000)).is_some());
    assert_eq!(controller.sink().attempts, 2);
}

#[test]
fn pump_skips_initial_document_value() {
    let start = Instant::now();
    let mut document = DrawingDocument::from_drawing(Drawing::from_strokes(vec![Stroke::new(
        vec![7],
    )]));
    let feed = document.subscribe();
    let mut controller = AutosaveController::new(RecordingSink::default(), DELAY);

    assert_eq!(controller.pump(&feed, start), 1);
    assert!(controller.next_deadline().is_none());

    document.add_stroke(Stroke::new(vec![8]));
    document.add_stroke(Stroke::new(vec![9]));
    assert_eq!(controller.pump(&feed, at(start, 200)), 2);
    assert!(controller.poll(at(start, 1200)).unwrap().is_saved());

    let writes = &controller.sink().writes;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].len(), 3);
}

#[test]
fn flush_writes_pending_drawing_to_original_note_file() {
    let temp = tempfile::tempdir().unwrap();
    let store = NoteStore::new(temp.path());
    let original = store.create("first note").unwrap();
    let sink = FileDrawingSink::new(original.clone(), JsonStrokeCodec);
    let mut controller = AutosaveController::new(sink, DELAY);
    let start = Instant::now();
    loaded(&mut controller, start);

    let drawing = Drawing::from_strokes(vec![Stroke::new(vec![4, 2])]);
    controller.on_change(
        DocumentChange {
            revision: 1,
            drawing: drawing.clone(),
        },
        start,
    );
    // Host navigated elsewhere; the pending save still lands on the first note.
    store.create("second note").unwrap();
    assert!(controller.flush().unwrap().is_saved());

    let bytes = std::fs::read(original.as_path()).unwrap();
    assert_eq!(JsonStrokeCodec.decode(&bytes).unwrap(), drawing);
    assert!(store.read_bytes("second note").unwrap().is_empty());
}

#[test]
fn file_sink_reports_missing_directory_as_store_error() {
    let temp = tempfile::tempdir().unwrap();
    let store = NoteStore::new(temp.path().join("not-created"));
    let sink = FileDrawingSink::new(store.resolve_path("lost"), JsonStrokeCodec);
    let mut controller = AutosaveController::new(sink, DELAY);
    let start = Instant::now();
    loaded(&mut controller, start);

    controller.on_change(edit(1, 1), start);
    let outcome = controller.poll(at(start, 1000)).unwrap();
    assert!(matches!(
        outcome,
        AutosaveOutcome::Failed {
            error: AutosaveError::Store(StoreError::Io { .. }),
            ..
        }
    ));
}

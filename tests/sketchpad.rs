use std::sync::Arc;

use egui::pos2;
use parking_lot::Mutex;
use sketchpad::{
    DrawingEvent, EventHandler, InputEvent, Outcome, PreviewHint, Sketchpad, ToolKind, ToolSelection,
};

/// Records every event the sketchpad emits
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<DrawingEvent>>>,
}

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &DrawingEvent) {
        self.events.lock().push(event.clone());
    }
}

impl Recorder {
    fn take(&self) -> Vec<DrawingEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

fn recording_sketchpad() -> (Sketchpad, Recorder) {
    let sketchpad = Sketchpad::default();
    let recorder = Recorder::default();
    sketchpad.subscribe(Box::new(recorder.clone()));
    (sketchpad, recorder)
}

fn send(sketchpad: &mut Sketchpad, events: impl IntoIterator<Item = InputEvent>) {
    for event in events {
        sketchpad.handle(event).unwrap();
    }
}

#[test]
fn test_sticker_unaffected_by_later_tool_switch() {
    let mut pad = Sketchpad::default();
    send(
        &mut pad,
        [
            InputEvent::SelectTool(ToolSelection::Sticker { glyph: "🌟".into() }),
            InputEvent::PointerDown(pos2(50.0, 50.0)),
            InputEvent::PointerUp,
            InputEvent::SelectTool(ToolSelection::Freehand { thickness: 5.0 }),
        ],
    );

    let committed = pad.history().committed();
    assert_eq!(committed.len(), 1);
    let sticker = committed[0].as_sticker().unwrap();
    assert_eq!(sticker.position(), pos2(50.0, 50.0));
    assert_eq!(sticker.glyph(), "🌟");
    assert_eq!(pad.tool().kind(), ToolKind::Freehand);
}

#[test]
fn test_sticker_without_glyph_is_ignored() {
    let (mut pad, recorder) = recording_sketchpad();
    pad.select_tool(ToolSelection::Sticker { glyph: "".into() });
    recorder.take();

    assert!(pad.pointer_down(pos2(10.0, 10.0)).is_ignored());
    assert!(pad.pointer_move(pos2(20.0, 20.0)).is_ignored());
    assert!(pad.history().committed().is_empty());
    assert!(pad.preview().is_none());
    assert!(recorder.take().is_empty());
}

#[test]
fn test_events_for_a_stroke() {
    let (mut pad, recorder) = recording_sketchpad();
    send(
        &mut pad,
        [
            InputEvent::PointerDown(pos2(10.0, 10.0)),
            InputEvent::PointerMove(pos2(20.0, 20.0)),
            InputEvent::PointerUp,
        ],
    );

    let id = pad.history().committed()[0].id();
    assert_eq!(
        recorder.take(),
        vec![
            DrawingEvent::ActionStarted { id },
            DrawingEvent::ActionExtended { id },
            DrawingEvent::ActionEnded { id },
        ]
    );
}

#[test]
fn test_noops_emit_nothing() {
    let (mut pad, recorder) = recording_sketchpad();
    assert!(pad.undo().is_ignored());
    assert!(pad.redo().is_ignored());
    assert!(pad.clear().is_ignored());
    assert!(pad.pointer_up().is_ignored());
    assert!(pad.pointer_leave().is_ignored());
    assert!(pad.select_tool(ToolSelection::Freehand { thickness: -3.0 }).is_ignored());
    assert!(recorder.take().is_empty());
}

#[test]
fn test_preview_lifecycle() {
    let mut pad = Sketchpad::default();
    pad.pointer_move(pos2(40.0, 40.0));
    let preview = pad.preview().unwrap();
    assert_eq!(preview.position(), pos2(40.0, 40.0));
    assert_eq!(preview.hint(), &PreviewHint::Ring { radius: 1.0 });

    // Starting an action destroys it; moves extend the stroke instead
    pad.pointer_down(pos2(40.0, 40.0));
    assert!(pad.preview().is_none());
    pad.pointer_move(pos2(45.0, 45.0));
    assert!(pad.preview().is_none());

    pad.pointer_up();
    pad.pointer_move(pos2(46.0, 46.0));
    assert!(pad.preview().is_some());

    pad.pointer_leave();
    assert!(pad.preview().is_none());
}

#[test]
fn test_tool_change_updates_visible_preview() {
    let mut pad = Sketchpad::default();
    pad.pointer_move(pos2(40.0, 40.0));
    pad.select_tool(ToolSelection::Sticker { glyph: "🐱".into() });
    assert_eq!(pad.preview().unwrap().hint(), &PreviewHint::Glyph("🐱".into()));
}

#[test]
fn test_pointer_leave_ends_stroke() {
    let mut pad = Sketchpad::default();
    send(
        &mut pad,
        [
            InputEvent::PointerDown(pos2(10.0, 10.0)),
            InputEvent::PointerMove(pos2(20.0, 20.0)),
            InputEvent::PointerLeave,
            InputEvent::PointerMove(pos2(30.0, 30.0)),
        ],
    );

    assert!(!pad.history().is_action_in_progress());
    let stroke = pad.history().committed()[0].as_stroke().unwrap();
    assert_eq!(stroke.points().len(), 2);
}

#[test]
fn test_undo_mid_drag_ends_action_first() {
    let (mut pad, recorder) = recording_sketchpad();
    pad.pointer_down(pos2(10.0, 10.0));
    pad.pointer_move(pos2(20.0, 20.0));
    recorder.take();

    assert!(pad.undo().is_changed());
    let id = pad.history().redo_buffer()[0].id();
    assert_eq!(
        recorder.take(),
        vec![DrawingEvent::ActionEnded { id }, DrawingEvent::Undone { id }]
    );

    // Further moves no longer reach the undone stroke
    pad.pointer_move(pos2(30.0, 30.0));
    assert_eq!(pad.history().redo_buffer()[0].as_stroke().unwrap().points().len(), 2);

    assert!(pad.redo().is_changed());
    assert_eq!(pad.history().committed().len(), 1);
}

#[test]
fn test_redo_mid_drag_with_empty_redo_buffer_only_ends_action() {
    let (mut pad, recorder) = recording_sketchpad();
    pad.pointer_down(pos2(10.0, 10.0));
    pad.pointer_move(pos2(20.0, 20.0));
    let id = pad.history().in_progress().unwrap().id();
    recorder.take();

    assert!(pad.redo().is_changed());
    assert_eq!(recorder.take(), vec![DrawingEvent::ActionEnded { id }]);
    assert!(!pad.history().is_action_in_progress());
    assert_eq!(pad.history().committed().len(), 1);

    // A second redo has nothing left to do
    assert!(pad.redo().is_ignored());
    assert!(recorder.take().is_empty());
}

#[test]
fn test_add_custom_sticker_selects_it() {
    let mut pad = Sketchpad::default();
    assert!(pad.add_sticker(" 🦀 ").is_changed());
    assert_eq!(pad.tool().glyph(), Some("🦀"));
    assert!(pad.palette().glyphs().iter().any(|g| g == "🦀"));
    assert!(pad.add_sticker("🦀").is_ignored());
}

#[test]
fn test_export_request_returns_png() {
    let mut pad = Sketchpad::default();
    send(
        &mut pad,
        [
            InputEvent::PointerDown(pos2(0.0, 0.0)),
            InputEvent::PointerMove(pos2(100.0, 100.0)),
            InputEvent::PointerUp,
        ],
    );

    match pad.handle(InputEvent::Export).unwrap() {
        Outcome::Exported(image) => {
            assert_eq!((image.width, image.height), (1024, 1024));
            let decoded = image::load_from_memory(&image.png).unwrap();
            assert_eq!(decoded.width(), 1024);
            assert_eq!(decoded.height(), 1024);
        }
        other => panic!("expected an export, got {other:?}"),
    }
}

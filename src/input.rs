use egui::{Context, Key, KeyboardShortcut, Modifiers, Pos2, Rect};

use crate::tool::ToolSelection;

/// Input the sketchpad reacts to. Pointer positions are canvas-local.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
    PointerLeave,
    SelectTool(ToolSelection),
    Undo,
    Redo,
    Clear,
    Export,
}

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
const REDO_SHIFT: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);

/// Converts raw egui pointer and keyboard state into [`InputEvent`]s for one canvas
#[derive(Debug, Default)]
pub struct CanvasInput {
    /// Last canvas-local hover position, `None` while the pointer is off the canvas
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl CanvasInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's input for the canvas occupying `canvas` on screen
    pub fn process_input(&mut self, ctx: &Context, canvas: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Text fields keep their own undo; the redo chords are checked first
        // so Cmd+Shift+Z is not also read as undo
        if !ctx.wants_keyboard_input() {
            ctx.input_mut(|input| {
                if input.consume_shortcut(&REDO_SHIFT) || input.consume_shortcut(&REDO) {
                    events.push(InputEvent::Redo);
                } else if input.consume_shortcut(&UNDO) {
                    events.push(InputEvent::Undo);
                }
            });
        }

        ctx.input(|input| {
            let hover = input.pointer.hover_pos().filter(|pos| canvas.contains(*pos));
            let local = hover.map(|pos| to_canvas(canvas, pos));

            match local {
                Some(pos) if Some(pos) != self.last_pointer_pos => {
                    events.push(InputEvent::PointerMove(pos));
                }
                None if self.last_pointer_pos.is_some() => {
                    self.pressed = false;
                    events.push(InputEvent::PointerLeave);
                }
                _ => {}
            }
            self.last_pointer_pos = local;

            // After the move, so the press position is not recorded twice
            if input.pointer.primary_pressed() {
                if let Some(pos) = local {
                    self.pressed = true;
                    events.push(InputEvent::PointerDown(pos));
                }
            }

            if input.pointer.primary_released() && self.pressed {
                self.pressed = false;
                events.push(InputEvent::PointerUp);
            }
        });

        events
    }
}

fn to_canvas(canvas: Rect, pos: Pos2) -> Pos2 {
    (pos - canvas.min).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{PointerButton, RawInput, pos2, vec2};

    fn frame(ctx: &Context, input: &mut CanvasInput, events: Vec<egui::Event>, canvas: Rect) -> Vec<InputEvent> {
        let raw = RawInput {
            events,
            ..Default::default()
        };
        let mut out = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            out = input.process_input(ctx, canvas);
        });
        out
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn key(key: Key, modifiers: Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_history_shortcuts() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(256.0, 256.0));
        let mut input = CanvasInput::new();
        let command = Modifiers::CTRL | Modifiers::COMMAND;

        let events = frame(&ctx, &mut input, vec![key(Key::Z, command)], canvas);
        assert_eq!(events, vec![InputEvent::Undo]);

        let events = frame(&ctx, &mut input, vec![key(Key::Y, command)], canvas);
        assert_eq!(events, vec![InputEvent::Redo]);

        // Shift+Z must not also be read as plain undo
        let events = frame(&ctx, &mut input, vec![key(Key::Z, command | Modifiers::SHIFT)], canvas);
        assert_eq!(events, vec![InputEvent::Redo]);

        let events = frame(&ctx, &mut input, vec![key(Key::Z, Modifiers::NONE)], canvas);
        assert!(events.is_empty());
    }

    #[test]
    fn test_shortcuts_ignored_while_text_field_focused() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(256.0, 256.0));
        let mut input = CanvasInput::new();

        let raw = RawInput {
            events: vec![key(Key::Z, Modifiers::CTRL | Modifiers::COMMAND)],
            ..Default::default()
        };
        let mut out = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            ctx.memory_mut(|memory| memory.request_focus(egui::Id::new("custom_sticker")));
            out = input.process_input(ctx, canvas);
        });
        assert!(out.is_empty());
    }

    #[test]
    fn test_press_drag_release() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(pos2(100.0, 100.0), vec2(256.0, 256.0));
        let mut input = CanvasInput::new();

        let events = frame(
            &ctx,
            &mut input,
            vec![egui::Event::PointerMoved(pos2(110.0, 110.0)), button(pos2(110.0, 110.0), true)],
            canvas,
        );
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove(pos2(10.0, 10.0)),
                InputEvent::PointerDown(pos2(10.0, 10.0)),
            ]
        );

        let events = frame(&ctx, &mut input, vec![egui::Event::PointerMoved(pos2(120.0, 130.0))], canvas);
        assert_eq!(events, vec![InputEvent::PointerMove(pos2(20.0, 30.0))]);

        let events = frame(&ctx, &mut input, vec![button(pos2(120.0, 130.0), false)], canvas);
        assert_eq!(events, vec![InputEvent::PointerUp]);
    }

    #[test]
    fn test_leaving_canvas() {
        let ctx = Context::default();
        let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(256.0, 256.0));
        let mut input = CanvasInput::new();

        frame(&ctx, &mut input, vec![egui::Event::PointerMoved(pos2(5.0, 5.0))], canvas);
        let events = frame(&ctx, &mut input, vec![egui::Event::PointerMoved(pos2(400.0, 5.0))], canvas);
        assert_eq!(events, vec![InputEvent::PointerLeave]);

        let events = frame(&ctx, &mut input, vec![egui::Event::PointerMoved(pos2(500.0, 5.0))], canvas);
        assert!(events.is_empty());
    }
}

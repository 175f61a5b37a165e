//! The application state behind the canvas.
//!
//! [`Sketchpad`] owns the tool, the history and the preview, and is the only
//! place they are mutated. Every mutation emits a [`DrawingEvent`] on the
//! event bus, so a subscriber can redraw (or a test can record) on each
//! change. Requests that change nothing return [`Outcome::Ignored`] and
//! emit nothing.
use egui::Pos2;
use log::debug;

use crate::config::SketchpadConfig;
use crate::error::ExportError;
use crate::event::{DrawingEvent, EventBus, EventHandler};
use crate::export::{self, ExportedImage};
use crate::history::HistoryStack;
use crate::input::InputEvent;
use crate::preview::Preview;
use crate::renderer::{self, Surface};
use crate::tool::{StickerPalette, ToolSelection, ToolState};

#[derive(Debug, Clone)]
pub enum Outcome {
    Changed,
    Ignored,
    Exported(ExportedImage),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

#[derive(Debug)]
pub struct Sketchpad {
    config: SketchpadConfig,
    tool: ToolState,
    palette: StickerPalette,
    history: HistoryStack,
    preview: Option<Preview>,
    events: EventBus,
}

impl Default for Sketchpad {
    fn default() -> Self {
        Self::new(SketchpadConfig::default())
    }
}

impl Sketchpad {
    pub fn new(config: SketchpadConfig) -> Self {
        Self {
            tool: ToolState::new(config.thin_thickness),
            palette: StickerPalette::new(&config.stickers),
            history: HistoryStack::new(),
            preview: None,
            events: EventBus::new(),
            config,
        }
    }

    /// Register a handler that is called after every state change
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    /// Dispatch one input event
    pub fn handle(&mut self, event: InputEvent) -> Result<Outcome, ExportError> {
        let outcome = match event {
            InputEvent::PointerDown(pos) => self.pointer_down(pos),
            InputEvent::PointerMove(pos) => self.pointer_move(pos),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::SelectTool(selection) => self.select_tool(selection),
            InputEvent::Undo => self.undo(),
            InputEvent::Redo => self.redo(),
            InputEvent::Clear => self.clear(),
            InputEvent::Export => Outcome::Exported(self.export()?),
        };
        Ok(outcome)
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> Outcome {
        let Some(style) = self.tool.current_style() else {
            debug!("Pointer down ignored, no sticker selected");
            return Outcome::Ignored;
        };
        self.preview = None;
        let id = self.history.begin_action(pos, style).id();
        self.events.emit(DrawingEvent::ActionStarted { id });
        Outcome::Changed
    }

    /// Extends the running action, or moves the preview when idle
    pub fn pointer_move(&mut self, pos: Pos2) -> Outcome {
        if self.history.extend_action(pos) {
            if let Some(drawable) = self.history.in_progress() {
                self.events.emit(DrawingEvent::ActionExtended { id: drawable.id() });
            }
            return Outcome::Changed;
        }
        self.show_preview(pos)
    }

    pub fn pointer_up(&mut self) -> Outcome {
        self.end_action()
    }

    /// Leaving the canvas ends a running action and hides the preview
    pub fn pointer_leave(&mut self) -> Outcome {
        let ended = self.end_action();
        let hidden = self.hide_preview();
        if ended.is_changed() || hidden.is_changed() {
            Outcome::Changed
        } else {
            Outcome::Ignored
        }
    }

    fn end_action(&mut self) -> Outcome {
        let Some(id) = self.history.in_progress().map(|d| d.id()) else {
            return Outcome::Ignored;
        };
        self.history.end_action();
        self.events.emit(DrawingEvent::ActionEnded { id });
        Outcome::Changed
    }

    pub fn select_tool(&mut self, selection: ToolSelection) -> Outcome {
        if !self.tool.apply(selection) {
            return Outcome::Ignored;
        }
        // The preview always mirrors the current tool
        if let Some(position) = self.preview.as_ref().map(Preview::position) {
            self.preview = Preview::for_tool(position, &self.tool);
        }
        self.events.emit(DrawingEvent::ToolChanged {
            kind: self.tool.kind(),
        });
        Outcome::Changed
    }

    /// Add a custom sticker glyph to the palette and select it
    pub fn add_sticker(&mut self, glyph: &str) -> Outcome {
        if !self.palette.add(glyph) {
            return Outcome::Ignored;
        }
        self.select_tool(ToolSelection::Sticker {
            glyph: glyph.trim().to_owned(),
        })
    }

    pub fn show_preview(&mut self, pos: Pos2) -> Outcome {
        if self.history.is_action_in_progress() {
            return Outcome::Ignored;
        }
        match Preview::for_tool(pos, &self.tool) {
            Some(preview) => {
                self.preview = Some(preview);
                self.events.emit(DrawingEvent::PreviewMoved { position: pos });
                Outcome::Changed
            }
            None => self.hide_preview(),
        }
    }

    pub fn hide_preview(&mut self) -> Outcome {
        if self.preview.take().is_none() {
            return Outcome::Ignored;
        }
        self.events.emit(DrawingEvent::PreviewHidden);
        Outcome::Changed
    }

    /// Undo the last drawable. A running action is ended first, which
    /// alone counts as a change.
    pub fn undo(&mut self) -> Outcome {
        let ended = self.end_action();
        let Some(id) = self.history.committed().last().map(|d| d.id()) else {
            debug!("Nothing to undo");
            return ended;
        };
        self.history.undo();
        self.events.emit(DrawingEvent::Undone { id });
        Outcome::Changed
    }

    pub fn redo(&mut self) -> Outcome {
        let ended = self.end_action();
        let Some(id) = self.history.redo_buffer().last().map(|d| d.id()) else {
            debug!("Nothing to redo");
            return ended;
        };
        self.history.redo();
        self.events.emit(DrawingEvent::Redone { id });
        Outcome::Changed
    }

    pub fn clear(&mut self) -> Outcome {
        if !self.history.clear() {
            return Outcome::Ignored;
        }
        self.events.emit(DrawingEvent::Cleared);
        Outcome::Changed
    }

    /// Encode the finished drawables as a PNG at the configured export scale
    pub fn export(&self) -> Result<ExportedImage, ExportError> {
        export::export_png(&self.history, self.config.canvas_size, self.config.export_scale)
    }

    /// Repaint the whole canvas from history and preview
    pub fn redraw(&self, surface: &mut dyn Surface) {
        renderer::redraw(surface, &self.history, self.preview.as_ref());
    }

    pub fn config(&self) -> &SketchpadConfig {
        &self.config
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn palette(&self) -> &StickerPalette {
        &self.palette
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }
}

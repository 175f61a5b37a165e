use egui::Pos2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::renderer::Surface;
use crate::sticker::Sticker;
use crate::stroke::Stroke;

/// Stable identity of a drawable across undo/redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableId(Uuid);

impl DrawableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrawableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DrawableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters that decide what kind of drawable the next action creates
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Freehand { thickness: f32 },
    Sticker { glyph: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawableKind {
    Stroke(Stroke),
    Sticker(Sticker),
}

/// One user action placed on the canvas.
///
/// A drawable is mutable only while it is the in-progress action of a
/// [`crate::HistoryStack`]; once committed it is never extended again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    id: DrawableId,
    kind: DrawableKind,
}

impl Drawable {
    /// Begin a new drawable at `origin`
    pub fn create(origin: Pos2, style: Style) -> Self {
        let kind = match style {
            Style::Freehand { thickness } => DrawableKind::Stroke(Stroke::new(origin, thickness)),
            Style::Sticker { glyph } => DrawableKind::Sticker(Sticker::new(origin, glyph)),
        };
        Self {
            id: DrawableId::new(),
            kind,
        }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn kind(&self) -> &DrawableKind {
        &self.kind
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match &self.kind {
            DrawableKind::Stroke(stroke) => Some(stroke),
            DrawableKind::Sticker(_) => None,
        }
    }

    pub fn as_sticker(&self) -> Option<&Sticker> {
        match &self.kind {
            DrawableKind::Sticker(sticker) => Some(sticker),
            DrawableKind::Stroke(_) => None,
        }
    }

    /// Feed a new pointer sample into the drawable.
    ///
    /// Strokes append the point, stickers jump to it.
    pub fn extend(&mut self, point: Pos2) {
        match &mut self.kind {
            DrawableKind::Stroke(stroke) => stroke.add_point(point),
            DrawableKind::Sticker(sticker) => sticker.set_position(point),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match &self.kind {
            DrawableKind::Stroke(stroke) => stroke.render(surface),
            DrawableKind::Sticker(sticker) => sticker.render(surface),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            DrawableKind::Stroke(_) => "stroke",
            DrawableKind::Sticker(_) => "sticker",
        }
    }
}

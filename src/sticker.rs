use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::renderer::Surface;

/// Font size used for every sticker, in canvas units.
pub const STICKER_FONT_SIZE: f32 = 32.0;

/// A glyph placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    position: Pos2,
    glyph: String,
}

impl Sticker {
    pub fn new(position: Pos2, glyph: impl Into<String>) -> Self {
        Self {
            position,
            glyph: glyph.into(),
        }
    }

    // Stickers follow the pointer while they are being dragged
    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.glyph(self.position, &self.glyph, STICKER_FONT_SIZE);
    }
}

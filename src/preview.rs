use egui::Pos2;

use crate::renderer::Surface;
use crate::sticker::STICKER_FONT_SIZE;
use crate::tool::{ToolKind, ToolState};

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewHint {
    /// Outline of the brush footprint
    Ring { radius: f32 },
    Glyph(String),
}

/// Cursor-following hint of what the next action will draw.
///
/// Never part of history; rebuilt from the tool on every pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    position: Pos2,
    hint: PreviewHint,
}

impl Preview {
    /// Returns `None` when the tool has nothing to preview (sticker mode without a glyph).
    pub fn for_tool(position: Pos2, tool: &ToolState) -> Option<Self> {
        let hint = match tool.kind() {
            ToolKind::Freehand => PreviewHint::Ring {
                radius: tool.thickness() / 2.0,
            },
            ToolKind::Sticker => PreviewHint::Glyph(tool.glyph()?.to_string()),
        };
        Some(Self { position, hint })
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn hint(&self) -> &PreviewHint {
        &self.hint
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match &self.hint {
            PreviewHint::Ring { radius } => surface.ring(self.position, *radius),
            PreviewHint::Glyph(glyph) => surface.glyph(self.position, glyph, STICKER_FONT_SIZE),
        }
    }
}

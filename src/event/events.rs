use egui::Pos2;

use crate::drawable::DrawableId;
use crate::tool::ToolKind;

/// One state change of the sketchpad. Every variant means "redraw needed".
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingEvent {
    ActionStarted { id: DrawableId },
    ActionExtended { id: DrawableId },
    ActionEnded { id: DrawableId },
    Undone { id: DrawableId },
    Redone { id: DrawableId },
    Cleared,
    ToolChanged { kind: ToolKind },
    PreviewMoved { position: Pos2 },
    PreviewHidden,
}

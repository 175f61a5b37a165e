use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::drawable::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Freehand,
    Sticker,
}

/// A tool selection as it arrives from the input layer
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSelection {
    Freehand { thickness: f32 },
    Sticker { glyph: String },
}

/// Which tool the next action uses and with which parameters.
///
/// Switching tools only affects the next [`crate::HistoryStack::begin_action`];
/// committed and in-progress drawables are never touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    kind: ToolKind,
    thickness: f32,
    glyph: Option<String>,
}

impl ToolState {
    pub fn new(thickness: f32) -> Self {
        Self {
            kind: ToolKind::Freehand,
            thickness,
            glyph: None,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// Switch to freehand drawing. Returns false if the thickness was rejected.
    pub fn select_freehand(&mut self, thickness: f32) -> bool {
        if !thickness.is_finite() || thickness <= 0.0 {
            warn!("Ignoring invalid stroke thickness {thickness}");
            return false;
        }
        self.kind = ToolKind::Freehand;
        self.thickness = thickness;
        true
    }

    /// Switch to sticker placement. A blank glyph leaves sticker mode with nothing selected.
    pub fn select_sticker(&mut self, glyph: &str) {
        let glyph = glyph.trim();
        self.kind = ToolKind::Sticker;
        self.glyph = if glyph.is_empty() {
            debug!("Sticker mode selected without a glyph");
            None
        } else {
            Some(glyph.to_string())
        };
    }

    pub fn apply(&mut self, selection: ToolSelection) -> bool {
        match selection {
            ToolSelection::Freehand { thickness } => self.select_freehand(thickness),
            ToolSelection::Sticker { glyph } => {
                self.select_sticker(&glyph);
                true
            }
        }
    }

    /// The style for the next action, or `None` when sticker mode has no glyph.
    pub fn current_style(&self) -> Option<Style> {
        match self.kind {
            ToolKind::Freehand => Some(Style::Freehand {
                thickness: self.thickness,
            }),
            ToolKind::Sticker => self.glyph.clone().map(|glyph| Style::Sticker { glyph }),
        }
    }
}

/// The sticker glyphs offered in the toolbar
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StickerPalette {
    glyphs: Vec<String>,
}

impl StickerPalette {
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut palette = Self::default();
        for glyph in glyphs {
            palette.add(glyph.as_ref());
        }
        palette
    }

    /// Add a custom glyph. Blank and duplicate glyphs are skipped.
    pub fn add(&mut self, glyph: &str) -> bool {
        let glyph = glyph.trim();
        if glyph.is_empty() || self.glyphs.iter().any(|g| g == glyph) {
            return false;
        }
        self.glyphs.push(glyph.to_string());
        true
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }
}

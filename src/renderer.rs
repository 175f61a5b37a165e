use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape};

use crate::history::HistoryStack;
use crate::preview::Preview;

pub const INK: Color32 = Color32::BLACK;
pub const PAPER: Color32 = Color32::WHITE;
const PREVIEW_RING: Color32 = Color32::from_gray(110);

/// Anything a drawable can be rendered onto. Coordinates are canvas-local.
pub trait Surface {
    /// Wipe the whole surface back to blank paper
    fn clear(&mut self);

    /// Connected line through `points` at the given width
    fn polyline(&mut self, points: &[Pos2], thickness: f32);

    /// Draw `text` centred on `center`
    fn glyph(&mut self, center: Pos2, text: &str, size: f32);

    /// Thin circle outline, used for the brush preview
    fn ring(&mut self, center: Pos2, radius: f32);
}

/// Full redraw of the live canvas.
///
/// Committed drawables are painted oldest first so later marks sit on top.
/// The in-progress drawable is the newest entry and therefore lands last,
/// followed by the preview when no action is running.
pub fn redraw(surface: &mut dyn Surface, history: &HistoryStack, preview: Option<&Preview>) {
    surface.clear();
    for drawable in history.committed() {
        drawable.render(surface);
    }
    if !history.is_action_in_progress() {
        if let Some(preview) = preview {
            preview.render(surface);
        }
    }
}

/// Redraw used for export: finished drawables only, no live action or preview.
pub fn redraw_committed(surface: &mut dyn Surface, history: &HistoryStack) {
    surface.clear();
    for drawable in history.finished() {
        drawable.render(surface);
    }
}

/// Multiplies every coordinate and size before forwarding to the inner surface
pub struct ScaledSurface<'a> {
    inner: &'a mut dyn Surface,
    scale: f32,
}

impl<'a> ScaledSurface<'a> {
    pub fn new(inner: &'a mut dyn Surface, scale: f32) -> Self {
        Self { inner, scale }
    }

    fn map(&self, point: Pos2) -> Pos2 {
        Pos2::new(point.x * self.scale, point.y * self.scale)
    }
}

impl Surface for ScaledSurface<'_> {
    fn clear(&mut self) {
        self.inner.clear();
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32) {
        let scaled: Vec<Pos2> = points.iter().map(|p| self.map(*p)).collect();
        self.inner.polyline(&scaled, thickness * self.scale);
    }

    fn glyph(&mut self, center: Pos2, text: &str, size: f32) {
        let center = self.map(center);
        self.inner.glyph(center, text, size * self.scale);
    }

    fn ring(&mut self, center: Pos2, radius: f32) {
        let center = self.map(center);
        self.inner.ring(center, radius * self.scale);
    }
}

/// Live canvas surface backed by an egui painter
pub struct PainterSurface {
    painter: Painter,
    canvas: Rect,
}

impl PainterSurface {
    /// `canvas` is the on-screen rect the canvas occupies; drawing is clipped to it.
    pub fn new(painter: &Painter, canvas: Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(canvas),
            canvas,
        }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.canvas.min + point.to_vec2()
    }
}

impl Surface for PainterSurface {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, PAPER);
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::line(points, egui::Stroke::new(thickness, INK)));
    }

    fn glyph(&mut self, center: Pos2, text: &str, size: f32) {
        self.painter.text(
            self.to_screen(center),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            INK,
        );
    }

    fn ring(&mut self, center: Pos2, radius: f32) {
        self.painter.circle_stroke(
            self.to_screen(center),
            radius.max(1.0),
            egui::Stroke::new(1.0, PREVIEW_RING),
        );
    }
}

use std::io::Cursor;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use egui::Pos2;
use image::{ImageFormat, Rgba, RgbaImage};
use log::{info, warn};
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Transform};

use crate::error::ExportError;
use crate::history::HistoryStack;
use crate::renderer::{INK, ScaledSurface, Surface, redraw_committed};

/// Largest edge, in pixels, of an export surface
pub const MAX_EXPORT_EDGE: u32 = 16384;

/// Edge length of the square export for a canvas rendered at `scale`
pub fn export_edge(canvas_size: u32, scale: u32) -> u32 {
    canvas_size.saturating_mul(scale)
}

/// A PNG rendered from the committed history
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Offscreen raster surface.
///
/// Strokes go through tiny-skia; sticker glyphs are rasterised with ab_glyph
/// from the same proportional fonts egui uses on the live canvas.
pub struct RasterSurface {
    pixmap: Pixmap,
    fonts: Vec<FontVec>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, ExportError> {
        if width > MAX_EXPORT_EDGE || height > MAX_EXPORT_EDGE {
            return Err(ExportError::InvalidDimensions { width, height });
        }
        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::InvalidDimensions { width, height })?;
        pixmap.fill(Color::WHITE);
        Ok(Self {
            pixmap,
            fonts: load_fonts(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (src, dst) in self.pixmap.pixels().iter().zip(image.pixels_mut()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Cursor::new(Vec::new());
        self.to_image().write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

fn ink_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(INK.r(), INK.g(), INK.b(), INK.a());
    paint.anti_alias = true;
    paint
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    fn polyline(&mut self, points: &[Pos2], thickness: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for p in rest {
            builder.line_to(p.x, p.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = tiny_skia::Stroke {
            width: thickness,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &ink_paint(), &stroke, Transform::identity(), None);
    }

    fn glyph(&mut self, center: Pos2, text: &str, size: f32) {
        let Self { pixmap, fonts } = self;
        let fonts: &[FontVec] = fonts;
        let scale = PxScale::from(size);

        let glyphs: Vec<(&FontVec, GlyphId)> = text
            .chars()
            .filter_map(|c| font_for(fonts, c).map(|font| (font, font.glyph_id(c))))
            .collect();
        let Some((first_font, _)) = glyphs.first() else {
            return;
        };

        let width: f32 = glyphs
            .iter()
            .map(|(font, id)| font.as_scaled(scale).h_advance(*id))
            .sum();
        let metrics = first_font.as_scaled(scale);
        let baseline = center.y + (metrics.ascent() + metrics.descent()) / 2.0;
        let mut x = center.x - width / 2.0;

        for (font, id) in &glyphs {
            let glyph = id.with_scale_and_position(scale, point(x, baseline));
            x += font.as_scaled(scale).h_advance(*id);
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                blend_ink(
                    pixmap,
                    bounds.min.x as i32 + gx as i32,
                    bounds.min.y as i32 + gy as i32,
                    coverage,
                );
            });
        }
    }

    fn ring(&mut self, center: Pos2, radius: f32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius.max(1.0)) else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: 1.0,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &ink_paint(), &stroke, Transform::identity(), None);
    }
}

/// First font that has a real glyph for `c`, falling back to the primary font
fn font_for(fonts: &[FontVec], c: char) -> Option<&FontVec> {
    fonts
        .iter()
        .find(|font| font.glyph_id(c).0 != 0)
        .or_else(|| fonts.first())
}

/// Source-over blend of ink at the given coverage
fn blend_ink(pixmap: &mut Pixmap, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= pixmap.width() || y as u32 >= pixmap.height() {
        return;
    }
    let index = (y as u32 * pixmap.width() + x as u32) as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[index];

    let alpha = coverage.clamp(0.0, 1.0) * (INK.a() as f32 / 255.0);
    let keep = 1.0 - alpha;
    let channel = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * keep).round().min(255.0) as u8;

    let blended = PremultipliedColorU8::from_rgba(
        channel(INK.r(), dst.red()),
        channel(INK.g(), dst.green()),
        channel(INK.b(), dst.blue()),
        channel(255, dst.alpha()),
    );
    if let Some(color) = blended {
        pixels[index] = color;
    }
}

fn load_fonts() -> Vec<FontVec> {
    let definitions = egui::FontDefinitions::default();
    let Some(names) = definitions.families.get(&egui::FontFamily::Proportional) else {
        warn!("No proportional fonts available, stickers will be skipped in exports");
        return Vec::new();
    };

    names
        .iter()
        .filter_map(|name| {
            let data = definitions.font_data.get(name)?;
            match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
                Ok(font) => Some(font),
                Err(err) => {
                    warn!("Skipping font {name}: {err}");
                    None
                }
            }
        })
        .collect()
}

/// Render the finished drawables at `scale` times the canvas resolution.
pub fn render_export(history: &HistoryStack, canvas_size: u32, scale: u32) -> Result<RasterSurface, ExportError> {
    let size = export_edge(canvas_size, scale);
    let mut raster = RasterSurface::new(size, size)?;
    let mut scaled = ScaledSurface::new(&mut raster, scale as f32);
    redraw_committed(&mut scaled, history);
    Ok(raster)
}

pub fn export_png(history: &HistoryStack, canvas_size: u32, scale: u32) -> Result<ExportedImage, ExportError> {
    let raster = render_export(history, canvas_size, scale)?;
    let png = raster.encode_png()?;
    info!(
        "Exported {} drawables at {}x{} ({} bytes)",
        history.finished().len(),
        raster.width(),
        raster.height(),
        png.len()
    );
    Ok(ExportedImage {
        width: raster.width(),
        height: raster.height(),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(ExportError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_oversized_export_is_rejected() {
        assert!(matches!(
            RasterSurface::new(MAX_EXPORT_EDGE + 1, 1),
            Err(ExportError::InvalidDimensions { .. })
        ));
        let history = HistoryStack::new();
        assert!(matches!(
            render_export(&history, 100_000, 4),
            Err(ExportError::InvalidDimensions {
                width: 400_000,
                height: 400_000
            })
        ));
    }

    #[test]
    fn test_blank_surface_is_white() {
        let surface = RasterSurface::new(4, 4).unwrap();
        assert_eq!(surface.pixel(2, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_png_signature() {
        let surface = RasterSurface::new(8, 8).unwrap();
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}

//! Glyph cell rasterization with swash.
//!
//! Produces the cell bitmaps the atlas packer consumes: the shaped glyph
//! string drawn as an alpha mask into one color channel, with the configured
//! horizontal margin on both sides and the text box centered vertically.

use fontdb::Database;
use image::RgbaImage;
use lyric_atlas_core::{RasterError, Rasterizer, RenderRequest, RenderedGlyph};
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Format, Vector};

use crate::font_manager::FontManager;
use crate::text_shaper::{ShapingOptions, TextShaper};

/// Vertical metrics of a face scaled to a pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub leading: f64,
}

impl LineMetrics {
    /// Natural line height: ascent + descent + leading.
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// [`Rasterizer`] backed by system fonts.
///
/// The font chain is rebuilt whenever a request names a different family or
/// weight than the previous one.
pub struct SwashRasterizer {
    db: Database,
    manager: Option<FontManager>,
    shaper: TextShaper,
    scale_context: ScaleContext,
}

impl SwashRasterizer {
    /// Rasterizer over all installed system fonts.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.len());
        Self::with_database(db)
    }

    /// Rasterizer over an explicit font database.
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            manager: None,
            shaper: TextShaper::new(),
            scale_context: ScaleContext::new(),
        }
    }

    /// Font chain for `family` at `weight`, loading it if needed.
    pub fn font_manager(&mut self, family: &str, weight: u16) -> Result<&FontManager, RasterError> {
        let stale = self
            .manager
            .as_ref()
            .is_none_or(|manager| !manager.matches(family, weight));
        if stale {
            let manager = FontManager::from_database(&self.db, family, weight).map_err(|e| {
                RasterError::FontUnavailable {
                    family: family.to_string(),
                    weight,
                    reason: e.to_string(),
                }
            })?;
            self.shaper.clear_cache();
            self.manager = Some(manager);
        }
        self.manager.as_ref().ok_or_else(|| RasterError::FontUnavailable {
            family: family.to_string(),
            weight,
            reason: "font chain missing after load".to_string(),
        })
    }
}

impl Default for SwashRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SwashRasterizer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError> {
        self.font_manager(request.family, request.weight)?;
        let Self {
            manager,
            shaper,
            scale_context,
            ..
        } = self;
        let Some(manager) = manager.as_ref() else {
            return Err(RasterError::FontUnavailable {
                family: request.family.to_string(),
                weight: request.weight,
                reason: "font chain missing after load".to_string(),
            });
        };

        let (font_index, font) = manager.font_for_text(request.text);
        let run = shaper.shape_text(
            request.text,
            font.data.as_slice(),
            font.face_index,
            font_index,
            ShapingOptions::default(),
        );
        if run.has_missing_glyphs() {
            log::debug!("{:?} has glyphs missing from '{}'", request.text, font.family);
        }

        let font_ref = font.font_ref();
        let size = request.size_px as f32;
        let metrics = font_ref.metrics(&[]);
        let units_per_em = f64::from(metrics.units_per_em.max(1));
        let scale = f64::from(size) / units_per_em;
        let line = LineMetrics {
            ascent: f64::from(metrics.ascent) * scale,
            descent: f64::from(metrics.descent).abs() * scale,
            leading: f64::from(metrics.leading) * scale,
        };

        let margin = f64::from(request.horizontal_margin);
        let text_width = f64::from(run.total_advance) * scale;
        let text_height = line.line_height();
        let cell_width = text_width + 2.0 * margin;
        let cell_height = request.cell_height.unwrap_or_else(|| text_height.ceil());

        let pixel_width = cell_width.ceil() as u32;
        let pixel_height = cell_height.ceil() as u32;
        if pixel_width == 0 || pixel_height == 0 {
            log::warn!("{:?} produced an empty cell", request.text);
            return Ok(RenderedGlyph::without_bitmap(
                cell_width,
                cell_height,
                text_width,
                text_height,
            ));
        }

        let mut bitmap = RgbaImage::new(pixel_width, pixel_height);
        let text_top = (cell_height - text_height) / 2.0;
        let baseline = text_top + line.leading / 2.0 + line.ascent;

        let mut scaler = scale_context.builder(font_ref).size(size).hint(false).build();
        let channel = request.channel;
        let mut pen = 0.0_f64;

        for glyph in &run.glyphs {
            let x = margin + (pen + f64::from(glyph.x_offset)) * scale;
            let y = baseline - f64::from(glyph.y_offset) * scale;
            pen += f64::from(glyph.x_advance);

            let Ok(glyph_id) = u16::try_from(glyph.glyph_id) else {
                continue;
            };
            let (x_floor, y_floor) = (x.floor(), y.round());
            let Some(image) = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .offset(Vector::new((x - x_floor) as f32, 0.0))
                .render(&mut scaler, glyph_id)
            else {
                continue;
            };
            if !matches!(image.content, Content::Mask) {
                continue;
            }

            let placement = image.placement;
            let origin_x = x_floor as i64 + i64::from(placement.left);
            let origin_y = y_floor as i64 - i64::from(placement.top);
            for row in 0..placement.height {
                for col in 0..placement.width {
                    let coverage = image.data[(row * placement.width + col) as usize];
                    if coverage == 0 {
                        continue;
                    }
                    let px = origin_x + i64::from(col);
                    let py = origin_y + i64::from(row);
                    if px < 0
                        || py < 0
                        || px >= i64::from(pixel_width)
                        || py >= i64::from(pixel_height)
                    {
                        continue;
                    }
                    let target = bitmap.get_pixel_mut(px as u32, py as u32);
                    let existing = target.0[3];
                    *target = channel.pixel(existing.max(coverage));
                }
            }
        }

        Ok(RenderedGlyph {
            bitmap: Some(bitmap),
            cell_width,
            cell_height,
            text_width,
            text_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height_sums_metrics() {
        let line = LineMetrics {
            ascent: 28.0,
            descent: 7.5,
            leading: 1.5,
        };
        assert_eq!(line.line_height(), 37.0);
    }

    #[test]
    fn test_empty_database_reports_unavailable_font() {
        let mut raster = SwashRasterizer::with_database(Database::new());
        let err = raster
            .render(&RenderRequest {
                text: "a",
                family: "Segoe UI",
                weight: 700,
                size_px: 31,
                cell_height: Some(52.0),
                horizontal_margin: 8,
                channel: lyric_atlas_core::ForegroundChannel::Red,
            })
            .unwrap_err();
        assert!(matches!(err, RasterError::FontUnavailable { weight: 700, .. }));
    }
}

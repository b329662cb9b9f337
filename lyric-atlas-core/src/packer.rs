//! Row-based glyph layout for a single texture size.
//!
//! One call to [`AtlasPacker::pack`] is one full packing pass: every glyph in
//! the registry is rendered, placed left to right and wrapped into rows of a
//! fixed height. If the glyphs do not fit, the pass is thrown away and
//! [`PackOutcome::ResizeRequired`] is returned; the generator then retries
//! with the next texture size.

use image::RgbaImage;
use lyric_atlas_config::Config;

use crate::detector::{analytic_inner_rect, detect_inner_rect};
use crate::error::GenerateError;
use crate::geometry::{Rect, TextureSize};
use crate::glyph::{FontSettings, Glyph, WHITESPACE_GLYPH};
use crate::raster::{ForegroundChannel, Rasterizer, RenderRequest};
use crate::registry::GlyphRegistry;

/// Layout parameters for a packing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackerOptions {
    pub horizontal_margin: u32,
    pub spacing_adjustment: i32,
    pub accurate_inner_rects: bool,
    pub reverse_colors: bool,
    /// Height of every atlas row in pixels
    pub row_height: u32,
}

impl PackerOptions {
    pub fn channel(&self) -> ForegroundChannel {
        ForegroundChannel::for_reverse_colors(self.reverse_colors)
    }
}

impl Default for PackerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PackerOptions {
    fn from(config: &Config) -> Self {
        Self {
            horizontal_margin: config.horizontal_margin,
            spacing_adjustment: config.spacing_adjustment,
            accurate_inner_rects: config.accurate_inner_rects,
            reverse_colors: config.reverse_colors,
            row_height: config.glyph_row_height,
        }
    }
}

/// A glyph placed in the atlas.
#[derive(Debug, Clone)]
pub struct PackedGlyph {
    pub glyph: Glyph,
    /// Reserved cell, including the horizontal margin
    pub outer: Rect,
    /// Tight content box, always within `outer`
    pub inner: Rect,
    /// Where the rendered cell bitmap sits in the atlas
    pub cell_origin: (f64, f64),
    pub bitmap: Option<RgbaImage>,
}

/// Result of a successful packing pass.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    pub texture_size: TextureSize,
    pub row_height: u32,
    /// Foreground channel the cells were rendered in
    pub channel: ForegroundChannel,
    /// Glyphs in packing (ordinal) order
    pub glyphs: Vec<PackedGlyph>,
    /// Number of glyphs whose inner rect had to be clamped
    pub bounds_corrections: usize,
}

impl PackedAtlas {
    pub fn get(&self, symbol: &str) -> Option<&PackedGlyph> {
        self.glyphs.iter().find(|packed| packed.glyph.as_str() == symbol)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Outcome of one packing pass.
#[derive(Debug)]
pub(crate) enum PackOutcome {
    Packed(PackedAtlas),
    ResizeRequired,
}

pub(crate) struct AtlasPacker<'a, R: ?Sized> {
    rasterizer: &'a mut R,
    fonts: &'a FontSettings,
    options: &'a PackerOptions,
}

impl<'a, R: Rasterizer + ?Sized> AtlasPacker<'a, R> {
    pub(crate) fn new(
        rasterizer: &'a mut R,
        fonts: &'a FontSettings,
        options: &'a PackerOptions,
    ) -> Self {
        Self {
            rasterizer,
            fonts,
            options,
        }
    }

    /// Run one packing pass at `size`. Nothing is kept from earlier passes.
    pub(crate) fn pack(
        &mut self,
        registry: &GlyphRegistry,
        size: TextureSize,
    ) -> Result<PackOutcome, GenerateError> {
        let row_height = f64::from(self.options.row_height);
        let texture_width = f64::from(size.width);
        let texture_height = f64::from(size.height);
        let margin = self.options.horizontal_margin;
        let spacing = self.options.spacing_adjustment;
        let channel = self.options.channel();

        let mut placed: Vec<PackedGlyph> = Vec::with_capacity(registry.len());
        let mut corrections = 0usize;
        let (mut x, mut y) = (0.0_f64, 0.0_f64);

        for glyph in registry {
            let rendered = self.rasterizer.render(&RenderRequest {
                text: glyph.as_str(),
                family: &self.fonts.family,
                weight: self.fonts.weight,
                size_px: self.fonts.size_for(glyph),
                cell_height: Some(row_height),
                horizontal_margin: margin,
                channel,
            })?;

            if (x + rendered.cell_width).ceil() > texture_width {
                if x == 0.0 {
                    log::info!(
                        "Glyph {:?} ({:.0}px) is wider than {}",
                        glyph.as_str(),
                        rendered.cell_width,
                        size
                    );
                    return Ok(PackOutcome::ResizeRequired);
                }
                x = 0.0;
                y += row_height;
            }

            if y + row_height >= texture_height {
                return Ok(PackOutcome::ResizeRequired);
            }

            let mut outer = Rect::new(x, y, rendered.cell_width, rendered.cell_height);

            let mut inner = match &rendered.bitmap {
                Some(bitmap) if self.options.accurate_inner_rects && !glyph.is_whitespace() => {
                    let detected = detect_inner_rect(bitmap, outer, spacing).map_err(|source| {
                        GenerateError::Detector {
                            glyph: glyph.to_string(),
                            source,
                        }
                    })?;
                    // Keep the margin around the detected content constant
                    outer = Rect::new(
                        detected.x - f64::from(margin),
                        outer.y,
                        detected.width + 2.0 * f64::from(margin),
                        outer.height,
                    );
                    detected
                }
                _ => analytic_inner_rect(
                    outer,
                    rendered.text_width,
                    rendered.text_height,
                    margin,
                    spacing,
                ),
            };

            if !outer.contains_rect(&inner) {
                if corrections == 0 {
                    log::warn!(
                        "Inner rect {} of {:?} exceeds outer rect {}; clamping",
                        inner,
                        glyph.as_str(),
                        outer
                    );
                }
                corrections += 1;
                inner = inner.clamped_to(&outer);
            }

            placed.push(PackedGlyph {
                glyph: glyph.clone(),
                outer,
                inner,
                cell_origin: (x, y),
                bitmap: rendered.bitmap,
            });

            x += outer.width;
        }

        if let Some(space) = placed
            .iter_mut()
            .find(|packed| packed.glyph.as_str() == WHITESPACE_GLYPH)
        {
            space.outer = space.inner;
        }

        if corrections > 1 {
            log::warn!("{} inner rects were clamped in this pass", corrections);
        }

        Ok(PackOutcome::Packed(PackedAtlas {
            texture_size: size,
            row_height: self.options.row_height,
            channel,
            glyphs: placed,
            bounds_corrections: corrections,
        }))
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::error::RasterError;
    use crate::raster::RenderedGlyph;

    /// Draws a solid block covering the text box of every glyph.
    struct BlockRasterizer {
        text_width: f64,
        text_height: f64,
        calls: usize,
    }

    impl Rasterizer for BlockRasterizer {
        fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError> {
            self.calls += 1;
            let margin = f64::from(request.horizontal_margin);
            let cell_width = self.text_width + 2.0 * margin;
            let cell_height = request.cell_height.unwrap_or(self.text_height);
            let mut bitmap = RgbaImage::new(cell_width as u32, cell_height as u32);
            if !request.text.trim().is_empty() {
                let top = ((cell_height - self.text_height) / 2.0).max(0.0) as u32;
                let bottom = (top + self.text_height as u32).min(bitmap.height());
                for y in top..bottom {
                    for x in margin as u32..(margin + self.text_width) as u32 {
                        bitmap.put_pixel(x, y, request.channel.pixel(255));
                    }
                }
            }
            Ok(RenderedGlyph {
                bitmap: Some(bitmap),
                cell_width,
                cell_height,
                text_width: self.text_width,
                text_height: self.text_height,
            })
        }
    }

    fn fonts() -> FontSettings {
        FontSettings::new("Test", 700, 31, 31)
    }

    fn options(accurate: bool) -> PackerOptions {
        PackerOptions {
            horizontal_margin: 8,
            spacing_adjustment: 0,
            accurate_inner_rects: accurate,
            reverse_colors: false,
            row_height: 52,
        }
    }

    fn packed(outcome: PackOutcome) -> PackedAtlas {
        match outcome {
            PackOutcome::Packed(atlas) => atlas,
            PackOutcome::ResizeRequired => panic!("unexpected resize"),
        }
    }

    #[test]
    fn second_glyph_follows_first_on_same_row() {
        let mut raster = BlockRasterizer {
            text_width: 44.0,
            text_height: 30.0,
            calls: 0,
        };
        let fonts = fonts();
        let options = options(false);
        let registry: GlyphRegistry = ["a", "b"].into_iter().collect();

        let atlas = packed(
            AtlasPacker::new(&mut raster, &fonts, &options)
                .pack(&registry, TextureSize::new(512, 512))
                .unwrap(),
        );

        assert_eq!(atlas.glyphs[0].outer, Rect::new(0.0, 0.0, 60.0, 52.0));
        assert_eq!(atlas.glyphs[1].outer, Rect::new(60.0, 0.0, 60.0, 52.0));
        assert_eq!(atlas.glyphs[1].inner, Rect::new(68.0, 11.0, 44.0, 30.0));
        assert_eq!(raster.calls, 2);
    }

    #[test]
    fn accurate_detection_rebuilds_outer_around_content() {
        let mut raster = BlockRasterizer {
            text_width: 20.0,
            text_height: 30.0,
            calls: 0,
        };
        let fonts = fonts();
        let options = options(true);
        let registry: GlyphRegistry = ["a"].into_iter().collect();

        let atlas = packed(
            AtlasPacker::new(&mut raster, &fonts, &options)
                .pack(&registry, TextureSize::new(512, 512))
                .unwrap(),
        );
        let glyph = &atlas.glyphs[0];
        // Ink spans x 8..=27 and y 11..=40
        assert_eq!(glyph.inner, Rect::new(8.0, 11.0, 20.0, 31.0));
        assert_eq!(glyph.outer, Rect::new(0.0, 0.0, 36.0, 52.0));
        assert_eq!(atlas.bounds_corrections, 0);
    }

    #[test]
    fn whitespace_outer_collapses_to_inner() {
        let mut raster = BlockRasterizer {
            text_width: 10.0,
            text_height: 30.0,
            calls: 0,
        };
        let fonts = fonts();
        let options = options(true);
        let registry: GlyphRegistry = [" ", "a"].into_iter().collect();

        let atlas = packed(
            AtlasPacker::new(&mut raster, &fonts, &options)
                .pack(&registry, TextureSize::new(512, 512))
                .unwrap(),
        );
        let space = atlas.get(" ").unwrap();
        assert_eq!(space.outer, space.inner);
        assert_eq!(space.inner, Rect::new(8.0, 11.0, 10.0, 30.0));
        // The cursor advanced by the cell width before the collapse
        assert_eq!(atlas.get("a").unwrap().cell_origin, (26.0, 0.0));
    }

    #[test]
    fn overflow_requests_resize() {
        let mut raster = BlockRasterizer {
            text_width: 200.0,
            text_height: 30.0,
            calls: 0,
        };
        let fonts = fonts();
        let options = options(false);
        let registry: GlyphRegistry = ('A'..='Z')
            .chain('a'..='d')
            .map(|c| c.to_string())
            .collect();

        let outcome = AtlasPacker::new(&mut raster, &fonts, &options)
            .pack(&registry, TextureSize::new(512, 512))
            .unwrap();
        assert!(matches!(outcome, PackOutcome::ResizeRequired));
    }

    #[test]
    fn oversized_inner_rect_is_clamped() {
        let mut raster = BlockRasterizer {
            text_width: 20.0,
            text_height: 60.0,
            calls: 0,
        };
        let fonts = fonts();
        let options = options(false);
        let registry: GlyphRegistry = ["a", "b"].into_iter().collect();

        let atlas = packed(
            AtlasPacker::new(&mut raster, &fonts, &options)
                .pack(&registry, TextureSize::new(512, 512))
                .unwrap(),
        );
        assert_eq!(atlas.bounds_corrections, 2);
        for glyph in &atlas.glyphs {
            assert!(glyph.outer.contains_rect(&glyph.inner));
            assert_eq!(glyph.inner.height, 52.0);
        }
    }

    #[test]
    fn green_pixels_abort_the_pass() {
        struct GreenRasterizer;
        impl Rasterizer for GreenRasterizer {
            fn render(&mut self, _: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError> {
                let mut bitmap = RgbaImage::new(20, 52);
                bitmap.put_pixel(3, 3, Rgba([0, 255, 0, 255]));
                Ok(RenderedGlyph {
                    bitmap: Some(bitmap),
                    cell_width: 20.0,
                    cell_height: 52.0,
                    text_width: 4.0,
                    text_height: 30.0,
                })
            }
        }

        let fonts = fonts();
        let options = options(true);
        let registry: GlyphRegistry = ["a"].into_iter().collect();
        let err = AtlasPacker::new(&mut GreenRasterizer, &fonts, &options)
            .pack(&registry, TextureSize::new(512, 512))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Detector { .. }));
    }
}

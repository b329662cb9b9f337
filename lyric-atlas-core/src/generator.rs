//! Generation driver: row height probe plus the resize-and-retry loop.
//!
//! A generation run first renders a reference glyph to check that the
//! configured row height is tall enough for the selected font. If it is not,
//! the caller is asked (through [`RowHeightPrompt`]) whether to grow the row
//! height or cancel. The packer then runs once per candidate texture size
//! until every glyph fits or the largest size overflows.

use crate::detector::detect_inner_rect;
use crate::error::GenerateError;
use crate::geometry::{Rect, TEXTURE_SIZE_STEPS, TextureSize};
use crate::glyph::FontSettings;
use crate::packer::{AtlasPacker, PackOutcome, PackedAtlas, PackerOptions};
use crate::raster::{ForegroundChannel, Rasterizer, RenderRequest};
use crate::registry::GlyphRegistry;

/// Reference glyph used to measure the font's real height.
pub const PROBE_GLYPH: &str = "X";

/// Terminal outcome of a generation run.
#[derive(Debug, Clone)]
pub enum GenerationResult {
    Success(PackedAtlas),
    /// The taller row height was declined; nothing was packed.
    UserCanceled,
    /// Glyphs overflowed even the largest texture size.
    DidNotFitIntoMaxSize,
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Generation outcome plus what the run went through to get there.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub outcome: GenerationResult,
    /// Texture sizes tried, in order
    pub attempted_sizes: Vec<TextureSize>,
    /// Row height the packing passes used
    pub row_height: u32,
}

/// Decides whether a taller row height is acceptable.
pub trait RowHeightPrompt {
    /// Return true to continue with `proposed`, false to cancel.
    fn confirm_row_height(&mut self, current: u32, proposed: u32) -> bool;
}

impl<F: FnMut(u32, u32) -> bool> RowHeightPrompt for F {
    fn confirm_row_height(&mut self, current: u32, proposed: u32) -> bool {
        self(current, proposed)
    }
}

/// Accepts every proposed row height.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptRowHeight;

impl RowHeightPrompt for AcceptRowHeight {
    fn confirm_row_height(&mut self, _current: u32, _proposed: u32) -> bool {
        true
    }
}

/// Owns the rasterizer and settings for repeated generation runs.
///
/// An accepted row height increase sticks for later runs on the same
/// generator.
pub struct AtlasGenerator<R> {
    rasterizer: R,
    fonts: FontSettings,
    options: PackerOptions,
    start_size: TextureSize,
}

impl<R: Rasterizer> AtlasGenerator<R> {
    pub fn new(rasterizer: R, fonts: FontSettings, options: PackerOptions) -> Self {
        Self {
            rasterizer,
            fonts,
            options,
            start_size: TEXTURE_SIZE_STEPS[0],
        }
    }

    /// Start the resize chain at `size` instead of the smallest step.
    ///
    /// Sizes that are not one of the steps fall back to the smallest.
    pub fn with_start_size(mut self, size: TextureSize) -> Self {
        self.set_start_size(size);
        self
    }

    pub fn set_start_size(&mut self, size: TextureSize) {
        if TEXTURE_SIZE_STEPS.contains(&size) {
            self.start_size = size;
        } else {
            log::warn!(
                "{} is not a supported texture size, starting at {}",
                size,
                TEXTURE_SIZE_STEPS[0]
            );
            self.start_size = TEXTURE_SIZE_STEPS[0];
        }
    }

    /// Go back to the smallest texture size.
    pub fn reset_texture_size(&mut self) {
        self.start_size = TEXTURE_SIZE_STEPS[0];
    }

    pub fn start_size(&self) -> TextureSize {
        self.start_size
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    pub fn fonts(&self) -> &FontSettings {
        &self.fonts
    }

    pub fn options(&self) -> &PackerOptions {
        &self.options
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    /// Probe the row height, then pack at growing texture sizes.
    pub fn generate(
        &mut self,
        registry: &GlyphRegistry,
        prompt: &mut dyn RowHeightPrompt,
    ) -> Result<GenerationReport, GenerateError> {
        if registry.is_empty() {
            return Err(GenerateError::NoGlyphs);
        }

        if !self.settle_row_height(prompt)? {
            log::info!("Generation canceled at row height prompt");
            return Ok(GenerationReport {
                outcome: GenerationResult::UserCanceled,
                attempted_sizes: Vec::new(),
                row_height: self.options.row_height,
            });
        }

        let start = TEXTURE_SIZE_STEPS
            .iter()
            .position(|size| *size == self.start_size)
            .unwrap_or(0);
        let mut attempted_sizes = Vec::new();

        for &size in &TEXTURE_SIZE_STEPS[start..] {
            attempted_sizes.push(size);
            log::info!("Packing {} glyphs into {}", registry.len(), size);

            let outcome = AtlasPacker::new(&mut self.rasterizer, &self.fonts, &self.options)
                .pack(registry, size)?;

            match outcome {
                PackOutcome::Packed(atlas) => {
                    log::info!("All glyphs fit into {}", size);
                    self.start_size = size;
                    return Ok(GenerationReport {
                        outcome: GenerationResult::Success(atlas),
                        attempted_sizes,
                        row_height: self.options.row_height,
                    });
                }
                PackOutcome::ResizeRequired => {
                    log::info!("Glyphs do not fit into {}", size);
                }
            }
        }

        log::warn!(
            "Glyphs did not fit into the maximum texture size {}",
            TEXTURE_SIZE_STEPS[TEXTURE_SIZE_STEPS.len() - 1]
        );
        Ok(GenerationReport {
            outcome: GenerationResult::DidNotFitIntoMaxSize,
            attempted_sizes,
            row_height: self.options.row_height,
        })
    }

    /// Render the probe glyph and grow the row height if the caller agrees.
    ///
    /// Returns false when the caller declined.
    fn settle_row_height(
        &mut self,
        prompt: &mut dyn RowHeightPrompt,
    ) -> Result<bool, GenerateError> {
        let rendered = self.rasterizer.render(&RenderRequest {
            text: PROBE_GLYPH,
            family: &self.fonts.family,
            weight: self.fonts.weight,
            size_px: self.fonts.max_size(),
            cell_height: None,
            horizontal_margin: self.options.horizontal_margin,
            channel: ForegroundChannel::Red,
        })?;

        let Some(bitmap) = rendered.bitmap.as_ref() else {
            log::warn!(
                "Probe glyph {:?} could not be rendered; keeping row height",
                PROBE_GLYPH
            );
            return Ok(true);
        };

        let hint = Rect::new(0.0, 0.0, rendered.cell_width, rendered.cell_height);
        let inner = detect_inner_rect(bitmap, hint, self.options.spacing_adjustment)
            .map_err(|source| GenerateError::Detector {
                glyph: PROBE_GLYPH.to_string(),
                source,
            })?;

        let current = self.options.row_height;
        if inner.height <= f64::from(current) {
            log::debug!(
                "Probe height {:.1}px fits row height {}",
                inner.height,
                current
            );
            return Ok(true);
        }

        let proposed = inner.height.ceil() as u32;
        log::info!(
            "Probe glyph is {:.1}px tall, row height {} is too small",
            inner.height,
            current
        );
        if !prompt.confirm_row_height(current, proposed) {
            return Ok(false);
        }

        log::info!("Row height changed from {} to {}", current, proposed);
        self.options.row_height = proposed;
        Ok(true)
    }
}

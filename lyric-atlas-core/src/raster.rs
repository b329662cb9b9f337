//! Interface to the glyph rasterizer.
//!
//! The packing engine never touches fonts directly. It asks a [`Rasterizer`]
//! to draw one glyph into its own cell and gets back the cell bitmap plus the
//! measured metrics. The rasterizer draws foreground in a single channel
//! ([`ForegroundChannel`]) on a transparent background so the bounding-box
//! detector can tell ink from background; green is never used.

use image::{Rgba, RgbaImage};

use crate::error::RasterError;

/// Channel that carries glyph coverage in a cell bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForegroundChannel {
    #[default]
    Red,
    Blue,
}

impl ForegroundChannel {
    /// Select the channel for the configured color order.
    pub fn for_reverse_colors(reverse_colors: bool) -> Self {
        if reverse_colors { Self::Blue } else { Self::Red }
    }

    /// Premultiplied pixel for the given coverage.
    pub fn pixel(self, coverage: u8) -> Rgba<u8> {
        match self {
            Self::Red => Rgba([coverage, 0, 0, coverage]),
            Self::Blue => Rgba([0, 0, coverage, coverage]),
        }
    }

    /// Index of the channel inside an RGBA pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Blue => 2,
        }
    }
}

/// Everything the rasterizer needs to draw one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest<'a> {
    pub text: &'a str,
    pub family: &'a str,
    pub weight: u16,
    pub size_px: u32,
    /// Fixed cell height, or `None` for the font's natural line height
    pub cell_height: Option<f64>,
    /// Padding added on both sides of the text inside the cell
    pub horizontal_margin: u32,
    pub channel: ForegroundChannel,
}

/// Output of one rasterization.
#[derive(Debug, Clone)]
pub struct RenderedGlyph {
    /// Cell-sized bitmap, `None` when the glyph could not be drawn
    pub bitmap: Option<RgbaImage>,
    /// Cell size: text width plus both margins, by the row height
    pub cell_width: f64,
    pub cell_height: f64,
    /// Text box measured by the font engine
    pub text_width: f64,
    pub text_height: f64,
}

impl RenderedGlyph {
    /// A glyph with measured metrics but no bitmap.
    pub fn without_bitmap(
        cell_width: f64,
        cell_height: f64,
        text_width: f64,
        text_height: f64,
    ) -> Self {
        Self {
            bitmap: None,
            cell_width,
            cell_height,
            text_width,
            text_height,
        }
    }
}

/// Something that can draw a glyph string into a cell bitmap.
pub trait Rasterizer {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError> {
        (**self).render(request)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<RenderedGlyph, RasterError> {
        (**self).render(request)
    }
}

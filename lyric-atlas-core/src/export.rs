//! Normalized glyph rectangles for the game's font definition file.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, TextureSize};
use crate::glyph::Glyph;
use crate::packer::PackedAtlas;

/// Texture dimensions plus one normalized entry per glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlyphDefinitions {
    pub texture_width: u32,
    pub texture_height: u32,
    pub glyphs: Vec<GlyphDefinition>,
}

/// One glyph's inner and outer rectangles in `0.0..=1.0` texture space.
///
/// Field order matches the attribute order of the definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlyphDefinition {
    pub symbol: String,
    pub inner_y_min: f32,
    pub inner_y_max: f32,
    pub inner_x_min: f32,
    pub inner_x_max: f32,
    pub outer_y_min: f32,
    pub outer_y_max: f32,
    pub outer_x_min: f32,
    pub outer_x_max: f32,
}

impl GlyphDefinition {
    /// Normalize absolute pixel rects against `size`.
    pub fn new(symbol: &str, inner: &Rect, outer: &Rect, size: TextureSize) -> Self {
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        Self {
            symbol: symbol.to_string(),
            inner_y_min: (inner.top() / h) as f32,
            inner_y_max: (inner.bottom() / h) as f32,
            inner_x_min: (inner.left() / w) as f32,
            inner_x_max: (inner.right() / w) as f32,
            outer_y_min: (outer.top() / h) as f32,
            outer_y_max: (outer.bottom() / h) as f32,
            outer_x_min: (outer.left() / w) as f32,
            outer_x_max: (outer.right() / w) as f32,
        }
    }

    /// Inner rect scaled back to pixels.
    pub fn inner_rect(&self, size: TextureSize) -> Rect {
        denormalize(
            (self.inner_x_min, self.inner_y_min),
            (self.inner_x_max, self.inner_y_max),
            size,
        )
    }

    /// Outer rect scaled back to pixels.
    pub fn outer_rect(&self, size: TextureSize) -> Rect {
        denormalize(
            (self.outer_x_min, self.outer_y_min),
            (self.outer_x_max, self.outer_y_max),
            size,
        )
    }
}

fn denormalize(min: (f32, f32), max: (f32, f32), size: TextureSize) -> Rect {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    Rect::from_points(
        (f64::from(min.0) * w, f64::from(min.1) * h),
        (f64::from(max.0) * w, f64::from(max.1) * h),
    )
}

impl GlyphDefinitions {
    /// Build definitions from `(glyph, inner, outer)` triples in pixel space.
    pub fn from_rects<'a, I>(size: TextureSize, rects: I) -> Self
    where
        I: IntoIterator<Item = (&'a Glyph, &'a Rect, &'a Rect)>,
    {
        Self {
            texture_width: size.width,
            texture_height: size.height,
            glyphs: rects
                .into_iter()
                .map(|(glyph, inner, outer)| {
                    GlyphDefinition::new(glyph.as_str(), inner, outer, size)
                })
                .collect(),
        }
    }

    pub fn texture_size(&self) -> TextureSize {
        TextureSize::new(self.texture_width, self.texture_height)
    }

    pub fn get(&self, symbol: &str) -> Option<&GlyphDefinition> {
        self.glyphs.iter().find(|def| def.symbol == symbol)
    }
}

/// Export a packed atlas, keeping packing order.
pub fn export(atlas: &PackedAtlas) -> GlyphDefinitions {
    GlyphDefinitions::from_rects(
        atlas.texture_size,
        atlas
            .glyphs
            .iter()
            .map(|packed| (&packed.glyph, &packed.inner, &packed.outer)),
    )
}

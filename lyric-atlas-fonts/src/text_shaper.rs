//! Text shaping using HarfBuzz via rustybuzz.
//!
//! Each atlas glyph is a short string (a base character plus any combining
//! marks). Shaping positions the marks on their base and applies kerning, so
//! the rasterizer can draw the string the way a text layout engine would.
//! Results are cached per text and font, since the probe glyph and repeated
//! resize passes shape the same strings again.

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use lru::LruCache;
use rustybuzz::{Face, Feature, GlyphBuffer, UnicodeBuffer};

/// Default number of cached shaping results.
const DEFAULT_CACHE_SIZE: usize = 4096;

/// A single shaped glyph, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph ID from the font
    pub glyph_id: u32,
    /// Cluster index (byte offset of the input character)
    pub cluster: u32,
    /// Horizontal advance
    pub x_advance: f32,
    /// Horizontal offset from the pen position
    pub x_offset: f32,
    /// Vertical offset from the baseline (positive is up)
    pub y_offset: f32,
}

/// Options for text shaping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapingOptions {
    /// Enable kerning adjustments
    pub enable_kerning: bool,
    /// Enable standard ligatures
    pub enable_ligatures: bool,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            enable_kerning: true,
            enable_ligatures: true,
        }
    }
}

/// Result of shaping a text run
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// The input text that was shaped
    pub text: String,
    pub glyphs: Vec<ShapedGlyph>,
    /// Sum of advances, in font units
    pub total_advance: f32,
    /// Font units per em of the face used
    pub units_per_em: u16,
}

impl ShapedRun {
    /// True when any glyph fell back to `.notdef`.
    pub fn has_missing_glyphs(&self) -> bool {
        self.glyphs.iter().any(|g| g.glyph_id == 0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ShapeCacheKey {
    text: String,
    font_index: usize,
    options: ShapingOptions,
}

/// Text shaper using HarfBuzz via rustybuzz
pub struct TextShaper {
    cache: LruCache<ShapeCacheKey, Arc<ShapedRun>>,
}

impl TextShaper {
    pub fn new() -> Self {
        Self::with_cache_size(DEFAULT_CACHE_SIZE)
    }

    /// Create a shaper holding at most `max_cache_size` results (minimum 1).
    pub fn with_cache_size(max_cache_size: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(max_cache_size).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Shape `text` with the face at `face_index` in `font_data`.
    ///
    /// `font_index` only identifies the font in the cache key. Unparseable
    /// font data yields an empty run.
    pub fn shape_text(
        &mut self,
        text: &str,
        font_data: &[u8],
        face_index: u32,
        font_index: usize,
        options: ShapingOptions,
    ) -> Arc<ShapedRun> {
        let cache_key = ShapeCacheKey {
            text: text.to_string(),
            font_index,
            options,
        };

        if let Some(cached) = self.cache.get(&cache_key) {
            return Arc::clone(cached);
        }

        let Some(face) = Face::from_slice(font_data, face_index) else {
            log::warn!("Font {} could not be parsed for shaping", font_index);
            return Arc::new(ShapedRun {
                text: text.to_string(),
                glyphs: Vec::new(),
                total_advance: 0.0,
                units_per_em: 1000,
            });
        };

        let mut unicode_buffer = UnicodeBuffer::new();
        unicode_buffer.push_str(text);
        unicode_buffer.set_direction(rustybuzz::Direction::LeftToRight);

        let mut features = Vec::new();
        if options.enable_ligatures
            && let Ok(feat) = Feature::from_str("liga")
        {
            features.push(feat);
        }
        if options.enable_kerning
            && let Ok(feat) = Feature::from_str("kern")
        {
            features.push(feat);
        }
        // Mark composition and mark-to-base positioning for combining sequences
        for tag in ["ccmp", "mark", "mkmk"] {
            if let Ok(feat) = Feature::from_str(tag) {
                features.push(feat);
            }
        }

        let glyph_buffer = rustybuzz::shape(&face, &features, unicode_buffer);
        let glyphs = extract_shaped_glyphs(&glyph_buffer);
        let total_advance = glyphs.iter().map(|g| g.x_advance).sum();

        let run = Arc::new(ShapedRun {
            text: text.to_string(),
            glyphs,
            total_advance,
            units_per_em: u16::try_from(face.units_per_em()).unwrap_or(1000),
        });
        self.cache.put(cache_key, Arc::clone(&run));
        run
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_shaped_glyphs(buffer: &GlyphBuffer) -> Vec<ShapedGlyph> {
    buffer
        .glyph_infos()
        .iter()
        .zip(buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: pos.x_advance as f32,
            x_offset: pos.x_offset as f32,
            y_offset: pos.y_offset as f32,
        })
        .collect()
}

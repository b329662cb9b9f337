//! Font management, text shaping and glyph rasterization for lyric-atlas.
//!
//! This crate provides:
//! - Font loading with system font discovery and a CJK-first fallback chain
//! - HarfBuzz-based text shaping via rustybuzz, with an LRU result cache
//! - A swash-based [`SwashRasterizer`] implementing the atlas engine's
//!   `Rasterizer` contract
//!
//! # Architecture
//!
//! The `FontManager` resolves a priority-ordered chain of fonts:
//! 1. Primary font (requested family at the requested weight)
//! 2. System fallback fonts
//!
//! Each glyph string is drawn with the first font that covers all of its
//! characters.

pub mod font_manager;
pub mod rasterizer;
pub mod text_shaper;

// Re-export main types for convenience
pub use font_manager::{FALLBACK_FAMILIES, FontData, FontManager};
pub use rasterizer::{LineMetrics, SwashRasterizer};
pub use text_shaper::{ShapedGlyph, ShapedRun, ShapingOptions, TextShaper};

//! Atlas generation engine for lyric fonts.
//!
//! Turns a body of lyric text into a packed glyph texture plus normalized
//! per-glyph rectangles:
//!
//! - [`segmenter`] splits text into glyphs (base character plus combining marks)
//! - [`registry`] deduplicates glyphs and fixes the packing order
//! - [`detector`] finds tight content boxes in rendered cells
//! - [`generator`] probes the row height and packs at growing texture sizes
//! - [`export`] normalizes rectangles for the definition file
//! - [`compose`] assembles the final bitmap with its drop shadow
//!
//! Font rendering is behind the [`Rasterizer`] trait; this crate does no file
//! or process I/O.

pub mod compose;
pub mod detector;
pub mod error;
pub mod export;
pub mod generator;
pub mod geometry;
pub mod glyph;
mod packer;
pub mod raster;
pub mod registry;
pub mod segmenter;

pub use error::{DetectorError, GenerateError, RasterError, SegmentError};
pub use export::{GlyphDefinition, GlyphDefinitions, export};
pub use generator::{
    AcceptRowHeight, AtlasGenerator, GenerationReport, GenerationResult, RowHeightPrompt,
};
pub use geometry::{Rect, TEXTURE_SIZE_STEPS, TextureSize};
pub use glyph::{FontSettings, Glyph, WHITESPACE_GLYPH};
pub use packer::{PackedAtlas, PackedGlyph, PackerOptions};
pub use raster::{ForegroundChannel, Rasterizer, RenderRequest, RenderedGlyph};
pub use registry::GlyphRegistry;
pub use segmenter::{Segmentation, segment, segment_utf16};

//! Typed error types for lyric-atlas-core.
//!
//! Expected outcomes of a generation run (user cancellation, glyphs not
//! fitting into the largest texture) are not errors; see
//! [`crate::generator::GenerationResult`]. The types here cover malformed
//! input and broken collaborator contracts.

use thiserror::Error;

/// Malformed text handed to the grapheme segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// A UTF-16 surrogate without its partner. Fatal for the whole input.
    #[error("unpaired surrogate 0x{unit:04X} at code unit {offset}")]
    UnpairedSurrogate {
        /// Index of the offending code unit
        offset: usize,
        /// The surrogate code unit itself
        unit: u16,
    },

    /// A base character with so many combining marks that it exceeds the
    /// per-glyph size limit. Recoverable: the sequence is skipped.
    #[error("combining sequence {sequence:?} is {bytes} bytes long (limit {limit})")]
    CombiningSequenceTooLong {
        sequence: String,
        bytes: usize,
        limit: usize,
    },
}

/// Rasterizer output violated the foreground color convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    /// A pixel has a non-zero green channel; only red and blue may carry
    /// glyph coverage.
    #[error("green channel set at pixel ({x}, {y}); rasterizer must draw in red or blue only")]
    ChannelViolation { x: u32, y: u32 },

    /// The bitmap buffer does not match its declared dimensions.
    #[error("bitmap is {width}x{height} but holds {actual} bytes")]
    MalformedBitmap {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Failure reported by a [`crate::raster::Rasterizer`] implementation.
#[derive(Debug, Error)]
pub enum RasterError {
    /// No usable font could be loaded for the requested family.
    #[error("font '{family}' (weight {weight}) could not be loaded: {reason}")]
    FontUnavailable {
        family: String,
        weight: u16,
        reason: String,
    },

    /// The glyph string could not be shaped or rendered.
    #[error("failed to render {text:?}: {reason}")]
    Render { text: String, reason: String },
}

/// Hard failure of a generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("bounding-box detection failed for {glyph:?}: {source}")]
    Detector {
        glyph: String,
        #[source]
        source: DetectorError,
    },

    #[error(transparent)]
    Raster(#[from] RasterError),

    /// There is nothing to pack.
    #[error("glyph registry is empty")]
    NoGlyphs,
}

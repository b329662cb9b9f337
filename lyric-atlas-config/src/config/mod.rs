//! Generator configuration.
//!
//! # Sub-modules
//!
//! - [`persistence`]: `impl Config` methods for load/save and path resolution
//! - [`validation`]: `impl Config` methods for range checks and clamping

pub mod persistence;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::types::{CompressorConfig, DefinitionFormat, DropShadowConfig, FontWeightName, LogLevel};

/// Settings for one atlas generation run.
///
/// Every field has a serde default so partial YAML files stay valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Font
    // ========================================================================
    /// Primary font family name
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Font weight used for every glyph
    #[serde(default = "crate::defaults::font_weight")]
    pub font_weight: FontWeightName,

    /// Font size in pixels for non-CJK glyphs
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: u32,

    /// Font size in pixels for kana, kanji and CJK punctuation
    #[serde(default = "crate::defaults::cjk_font_size")]
    pub cjk_font_size: u32,

    // ========================================================================
    // Layout
    // ========================================================================
    /// Row height before the reference glyph probe runs
    #[serde(default = "crate::defaults::glyph_row_height")]
    pub glyph_row_height: u32,

    /// Empty space kept on both sides of each glyph's content
    #[serde(default = "crate::defaults::horizontal_margin")]
    pub horizontal_margin: u32,

    /// Signed bias folded into the right edge of every inner rect
    #[serde(default = "crate::defaults::spacing_adjustment")]
    pub spacing_adjustment: i32,

    /// Detect inner rects from rendered pixels instead of the text layout box
    #[serde(default = "crate::defaults::bool_true")]
    pub accurate_inner_rects: bool,

    /// Render foreground into the blue channel instead of red
    #[serde(default = "crate::defaults::bool_false")]
    pub reverse_colors: bool,

    // ========================================================================
    // Output
    // ========================================================================
    #[serde(default)]
    pub drop_shadow: DropShadowConfig,

    #[serde(default)]
    pub compressor: CompressorConfig,

    #[serde(default)]
    pub definition_format: DefinitionFormat,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_family: crate::defaults::font_family(),
            font_weight: crate::defaults::font_weight(),
            font_size: crate::defaults::font_size(),
            cjk_font_size: crate::defaults::cjk_font_size(),
            glyph_row_height: crate::defaults::glyph_row_height(),
            horizontal_margin: crate::defaults::horizontal_margin(),
            spacing_adjustment: crate::defaults::spacing_adjustment(),
            accurate_inner_rects: true,
            reverse_colors: false,
            drop_shadow: DropShadowConfig::default(),
            compressor: CompressorConfig::default(),
            definition_format: DefinitionFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeightName) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set both sizes; a `cjk_size` of 0 reuses `size`.
    pub fn with_font_sizes(mut self, size: u32, cjk_size: u32) -> Self {
        self.font_size = size;
        self.cjk_font_size = if cjk_size == 0 { size } else { cjk_size };
        self
    }

    pub fn with_horizontal_margin(mut self, margin: u32) -> Self {
        self.horizontal_margin = margin;
        self
    }

    pub fn with_spacing_adjustment(mut self, spacing: i32) -> Self {
        self.spacing_adjustment = spacing;
        self
    }
}

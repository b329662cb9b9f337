//! Default value functions for configuration.
//!
//! Each sub-module groups related free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod font;
mod layout;
mod misc;

// ── Font & text rendering ──────────────────────────────────────────────────
pub use font::{FONT_SIZE_MAX, FONT_SIZE_MIN, cjk_font_size, font_family, font_size, font_weight};

// ── Glyph layout ───────────────────────────────────────────────────────────
pub use layout::{glyph_row_height, horizontal_margin, spacing_adjustment};

// ── Miscellaneous ──────────────────────────────────────────────────────────
pub use misc::{
    bool_false, bool_true, compressor_program, shadow_blur_radius, shadow_depth,
    shadow_direction, shadow_opacity,
};

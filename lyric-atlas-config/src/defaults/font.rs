//! Default values for font selection.

/// Smallest font size accepted by validation
pub const FONT_SIZE_MIN: u32 = 18;

/// Largest font size accepted by validation
pub const FONT_SIZE_MAX: u32 = 60;

pub fn font_family() -> String {
    "Segoe UI".to_string()
}

pub fn font_weight() -> crate::types::FontWeightName {
    crate::types::FontWeightName::Bold
}

pub fn font_size() -> u32 {
    31
}

pub fn cjk_font_size() -> u32 {
    31
}

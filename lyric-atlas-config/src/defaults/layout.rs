//! Default values for glyph placement inside the atlas.

pub fn glyph_row_height() -> u32 {
    52
}

/// 4 in the stock Latin texture, 8 in the Japanese one. Any constant value
/// looks the same in game; only the space inside the inner rect matters.
pub fn horizontal_margin() -> u32 {
    8
}

pub fn spacing_adjustment() -> i32 {
    0
}

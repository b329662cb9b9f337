//! Tight bounding boxes for rendered glyph cells.
//!
//! The font engine's measured text box includes side bearings and line
//! spacing, which wastes atlas space and misaligns glyphs in game. Scanning the
//! rendered bitmap gives the box the ink actually covers.

use image::RgbaImage;

use crate::error::DetectorError;
use crate::geometry::Rect;

/// Extra pixel added to the right edge of a detected box.
pub const RIGHT_EDGE_ADJUST: f64 = 1.0;
/// Extra pixels added to the bottom edge of a detected box.
pub const BOTTOM_EDGE_ADJUST: f64 = 2.0;

/// Find the tight inner rectangle of the foreground in `bitmap`.
///
/// `region` is where the bitmap sits in the atlas; the result is offset by
/// its origin. A pixel counts as foreground when its red or blue channel is
/// non-zero. Any non-zero green channel is a rasterizer bug.
///
/// A bitmap without foreground (whitespace) returns `region` unchanged.
pub fn detect_inner_rect(
    bitmap: &RgbaImage,
    region: Rect,
    spacing_adjustment: i32,
) -> Result<Rect, DetectorError> {
    let (width, height) = bitmap.dimensions();
    let expected = width as usize * height as usize * 4;
    if bitmap.as_raw().len() < expected {
        return Err(DetectorError::MalformedBitmap {
            width,
            height,
            actual: bitmap.as_raw().len(),
        });
    }

    let mut low_x = u32::MAX;
    let mut low_y = u32::MAX;
    let mut high_x = 0u32;
    let mut high_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in bitmap.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        if g != 0 {
            return Err(DetectorError::ChannelViolation { x, y });
        }
        if r == 0 && b == 0 {
            continue;
        }
        found = true;
        low_x = low_x.min(x);
        low_y = low_y.min(y);
        high_x = high_x.max(x);
        high_y = high_y.max(y);
    }

    if !found {
        return Ok(region);
    }

    Ok(Rect::from_points(
        (region.x + f64::from(low_x), region.y + f64::from(low_y)),
        (
            region.x + f64::from(high_x) + f64::from(spacing_adjustment) + RIGHT_EDGE_ADJUST,
            region.y + f64::from(high_y) + BOTTOM_EDGE_ADJUST,
        ),
    ))
}

/// Inner rectangle derived from the font engine's text metrics.
///
/// Used when accurate detection is off or no bitmap is available. The text
/// box sits after the left margin and is centered vertically in the cell.
pub fn analytic_inner_rect(
    outer: Rect,
    text_width: f64,
    text_height: f64,
    horizontal_margin: u32,
    spacing_adjustment: i32,
) -> Rect {
    Rect::new(
        outer.x + f64::from(horizontal_margin),
        outer.y + (outer.height - text_height) / 2.0,
        (text_width + f64::from(spacing_adjustment)).max(0.0),
        text_height,
    )
}

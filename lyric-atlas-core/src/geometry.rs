//! Pixel-space rectangles and texture dimensions.

use std::fmt;

/// Axis-aligned rectangle with a top-left origin.
///
/// Used both for absolute atlas coordinates (pixels) and, after export,
/// for normalized `0.0..=1.0` coordinates. Width and height are never
/// negative; [`Rect::from_points`] normalizes swapped corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corner points in any order.
    pub fn from_points((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when `other` lies entirely within `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink `self` so every edge lies within `bounds`.
    ///
    /// Returns `self` unchanged when it is already contained.
    pub fn clamped_to(&self, bounds: &Rect) -> Rect {
        let left = self.left().clamp(bounds.left(), bounds.right());
        let top = self.top().clamp(bounds.top(), bounds.bottom());
        let right = self.right().clamp(left, bounds.right());
        let bottom = self.bottom().clamp(top, bounds.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Texture dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TextureSize {
    fn default() -> Self {
        TEXTURE_SIZE_STEPS[0]
    }
}

impl fmt::Display for TextureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Candidate atlas sizes, tried in order until every glyph fits.
pub const TEXTURE_SIZE_STEPS: [TextureSize; 3] = [
    TextureSize::new(512, 512),
    TextureSize::new(512, 1024),
    TextureSize::new(1024, 1024),
];

//! Glyph strings and per-glyph font selection.

use std::borrow::Borrow;
use std::fmt;

use lyric_atlas_config::Config;

/// Symbol that is always present in a loaded lyric document.
pub const WHITESPACE_GLYPH: &str = " ";

/// Atomic unit placed in the atlas.
///
/// One base character optionally followed by combining marks, stored as a
/// string because a glyph may span several code points. Ordering is ordinal
/// (UTF-8 byte order, which equals code point order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Glyph(Box<str>);

impl Glyph {
    pub fn new(symbol: impl Into<Box<str>>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn first_char(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// True for glyphs made only of whitespace (or empty).
    pub fn is_whitespace(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// True when the leading code point is kana, kanji or CJK punctuation.
    pub fn is_cjk(&self) -> bool {
        self.first_char().is_some_and(is_kana_or_kanji)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Glyph {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Glyph {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for Glyph {
    fn from(symbol: String) -> Self {
        Self::new(symbol)
    }
}

/// CJK ranges that select the CJK font size.
pub fn is_kana_or_kanji(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0x3000..=0x30FF // Symbols, Punctuation, Hiragana, Katakana
            | 0x31F0..=0x4DBF // Katakana Phonetic Extensions .. CJK Extension A
    )
}

/// Font selection for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSettings {
    pub family: String,
    /// OpenType weight class (400 normal, 700 bold)
    pub weight: u16,
    pub font_size: u32,
    pub cjk_font_size: u32,
}

impl FontSettings {
    pub fn new(family: impl Into<String>, weight: u16, font_size: u32, cjk_font_size: u32) -> Self {
        Self {
            family: family.into(),
            weight,
            font_size,
            cjk_font_size: if cjk_font_size == 0 {
                font_size
            } else {
                cjk_font_size
            },
        }
    }

    /// Font size for `glyph`, evaluated on every call.
    pub fn size_for(&self, glyph: &Glyph) -> u32 {
        if glyph.is_cjk() {
            self.cjk_font_size
        } else {
            self.font_size
        }
    }

    /// Larger of the two sizes; used for the row height probe.
    pub fn max_size(&self) -> u32 {
        self.font_size.max(self.cjk_font_size)
    }
}

impl From<&Config> for FontSettings {
    fn from(config: &Config) -> Self {
        Self::new(
            config.font_family.clone(),
            config.font_weight.numeric(),
            config.font_size,
            config.cjk_font_size,
        )
    }
}

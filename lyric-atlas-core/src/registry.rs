//! Ordered set of distinct glyphs to place in the atlas.

use std::collections::BTreeSet;

use crate::error::SegmentError;
use crate::glyph::{Glyph, WHITESPACE_GLYPH};
use crate::segmenter::{self, Segmentation};

/// Distinct glyphs, iterated in ordinal order.
///
/// The iteration order is the packing order, so two registries with the same
/// contents always produce the same atlas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphRegistry {
    glyphs: BTreeSet<Glyph>,
}

impl GlyphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment `text` and add every resulting glyph.
    ///
    /// Returns the recoverable problems found while segmenting.
    pub fn add_text(&mut self, text: &str) -> Vec<SegmentError> {
        let Segmentation { glyphs, rejected } = segmenter::segment(text);
        self.glyphs.extend(glyphs);
        rejected
    }

    /// Segment UTF-16 text and add every resulting glyph.
    ///
    /// Nothing is added when the input holds an unpaired surrogate.
    pub fn add_utf16(&mut self, units: &[u16]) -> Result<Vec<SegmentError>, SegmentError> {
        let Segmentation { glyphs, rejected } = segmenter::segment_utf16(units)?;
        self.glyphs.extend(glyphs);
        Ok(rejected)
    }

    /// Insert one glyph as-is. Returns false if it was already present.
    pub fn add_glyph(&mut self, glyph: impl Into<Glyph>) -> bool {
        self.glyphs.insert(glyph.into())
    }

    /// Make sure the whitespace glyph is present.
    pub fn ensure_whitespace(&mut self) {
        self.add_glyph(WHITESPACE_GLYPH);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.glyphs.contains(symbol)
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }
}

impl<'a> IntoIterator for &'a GlyphRegistry {
    type Item = &'a Glyph;
    type IntoIter = std::collections::btree_set::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

impl<G: Into<Glyph>> FromIterator<G> for GlyphRegistry {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let mut registry = GlyphRegistry::new();
        registry.add_text("banana");
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("a"));
        assert!(registry.contains("b"));
        assert!(registry.contains("n"));
    }

    #[test]
    fn iteration_is_ordinal_regardless_of_insert_order() {
        let mut first = GlyphRegistry::new();
        first.add_text("zあa ");
        let mut second = GlyphRegistry::new();
        second.add_text(" aあz");

        let order: Vec<&str> = first.iter().map(Glyph::as_str).collect();
        assert_eq!(order, [" ", "a", "z", "あ"]);
        assert_eq!(first, second);
    }

    #[test]
    fn combined_glyph_is_one_entry() {
        let mut registry = GlyphRegistry::new();
        registry.add_text("a\u{0301}a");
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a\u{0301}"));
        assert!(registry.contains("a"));
    }

    #[test]
    fn rejected_sequences_are_reported() {
        let mut registry = GlyphRegistry::new();
        let rejected = registry.add_text(&format!("x{}y", "\u{0301}".repeat(8)));
        assert_eq!(rejected.len(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("y"));
    }

    #[test]
    fn utf16_failure_adds_nothing() {
        let mut registry = GlyphRegistry::new();
        let units = [0x0061, 0xD800, 0x0062];
        assert!(registry.add_utf16(&units).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn ensure_whitespace_and_clear() {
        let mut registry = GlyphRegistry::new();
        registry.ensure_whitespace();
        registry.ensure_whitespace();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(WHITESPACE_GLYPH));
        registry.clear();
        assert!(registry.is_empty());
    }
}

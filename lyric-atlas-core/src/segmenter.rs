//! Grapheme segmentation for lyric text.
//!
//! Splits text into the glyph units that get their own atlas cell:
//!
//! - a code point followed by one or more combining marks (general category
//!   `Mn` or `Mc`) becomes a single glyph;
//! - format (`Cf`) and modifier symbol (`Sk`) code points are dropped;
//! - every other code point is a glyph of its own.
//!
//! This is deliberately narrower than extended grapheme clusters: it only
//! groups combining marks with their base, which is what the game's lyric
//! renderer expects. Categories come from the ICU compiled property data so
//! the result does not depend on the host platform.

use icu_properties::CodePointMapData;
use icu_properties::props::GeneralCategory;

use crate::error::SegmentError;
use crate::glyph::Glyph;

/// Longest accepted combined glyph, in UTF-8 bytes.
pub const MAX_COMBINED_UTF8_LEN: usize = 12;

/// Output of one segmentation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Glyphs in input order, duplicates included
    pub glyphs: Vec<Glyph>,
    /// Recoverable problems; each rejected sequence was skipped
    pub rejected: Vec<SegmentError>,
}

fn general_category(c: char) -> GeneralCategory {
    CodePointMapData::<GeneralCategory>::new().get(c)
}

/// Non-spacing or spacing-combining mark.
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        general_category(c),
        GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark
    )
}

/// Segment a string into glyphs.
pub fn segment(text: &str) -> Segmentation {
    let chars: Vec<char> = text.chars().collect();
    segment_chars(&chars)
}

/// Segment UTF-16 code units.
///
/// Surrogate pairs are joined into one code point before segmentation. An
/// unpaired surrogate anywhere in the input is fatal and nothing is returned.
pub fn segment_utf16(units: &[u16]) -> Result<Segmentation, SegmentError> {
    let mut chars = Vec::with_capacity(units.len());
    let mut offset = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                offset += c.len_utf16();
                chars.push(c);
            }
            Err(e) => {
                return Err(SegmentError::UnpairedSurrogate {
                    offset,
                    unit: e.unpaired_surrogate(),
                });
            }
        }
    }
    Ok(segment_chars(&chars))
}

fn segment_chars(chars: &[char]) -> Segmentation {
    let mut out = Segmentation::default();
    let mut i = 0;

    while i < chars.len() {
        let current = chars[i];

        if chars.get(i + 1).copied().is_some_and(is_combining_mark) {
            let start = i;
            i += 1;
            while chars.get(i + 1).copied().is_some_and(is_combining_mark) {
                i += 1;
            }
            let combined: String = chars[start..=i].iter().collect();
            i += 1;

            if combined.len() > MAX_COMBINED_UTF8_LEN {
                log::warn!(
                    "Skipping combining sequence {:?}: {} bytes exceeds {}",
                    combined,
                    combined.len(),
                    MAX_COMBINED_UTF8_LEN
                );
                out.rejected.push(SegmentError::CombiningSequenceTooLong {
                    bytes: combined.len(),
                    sequence: combined,
                    limit: MAX_COMBINED_UTF8_LEN,
                });
                continue;
            }

            out.glyphs.push(Glyph::from(combined));
            continue;
        }

        match general_category(current) {
            GeneralCategory::Format => {
                log::debug!("Format character U+{:04X} skipped", current as u32);
            }
            GeneralCategory::ModifierSymbol => {
                log::debug!("Modifier symbol U+{:04X} skipped", current as u32);
            }
            _ => out.glyphs.push(Glyph::new(current.to_string())),
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(seg: &Segmentation) -> Vec<&str> {
        seg.glyphs.iter().map(Glyph::as_str).collect()
    }

    #[test]
    fn empty_input() {
        let seg = segment("");
        assert!(seg.glyphs.is_empty());
        assert!(seg.rejected.is_empty());
    }

    #[test]
    fn acute_accent_joins_base() {
        let seg = segment("a\u{0301}b");
        assert_eq!(symbols(&seg), ["a\u{0301}", "b"]);
    }

    #[test]
    fn stacked_marks_form_one_glyph() {
        // e + grave + acute + circumflex: 1 + 2 + 2 + 2 = 7 bytes
        let seg = segment("e\u{0300}\u{0301}\u{0302}x");
        assert_eq!(symbols(&seg), ["e\u{0300}\u{0301}\u{0302}", "x"]);
    }

    #[test]
    fn spacing_mark_joins_base() {
        // Devanagari KA + vowel sign AA (Mc)
        let seg = segment("\u{0915}\u{093E}");
        assert_eq!(symbols(&seg), ["\u{0915}\u{093E}"]);
    }

    #[test]
    fn trailing_mark_without_successor_stands_alone() {
        let seg = segment("\u{0301}");
        assert_eq!(symbols(&seg), ["\u{0301}"]);

        let seg = segment("ab\u{0301}");
        assert_eq!(symbols(&seg), ["a", "b\u{0301}"]);
    }

    #[test]
    fn leading_mark_is_its_own_glyph() {
        let seg = segment("\u{0301}a");
        assert_eq!(symbols(&seg), ["\u{0301}", "a"]);
    }

    #[test]
    fn format_and_modifier_symbols_are_dropped() {
        // ZERO WIDTH SPACE is Cf, BOM is Cf, CIRCUMFLEX ACCENT '^' is Sk
        let seg = segment("a\u{200B}b\u{FEFF}^c");
        assert_eq!(symbols(&seg), ["a", "b", "c"]);
    }

    #[test]
    fn oversized_combination_is_skipped_and_reported() {
        // 1 + 6 * 2 = 13 bytes
        let text = format!("a{}b", "\u{0301}".repeat(6));
        let seg = segment(&text);
        assert_eq!(symbols(&seg), ["b"]);
        assert_eq!(seg.rejected.len(), 1);
        match &seg.rejected[0] {
            SegmentError::CombiningSequenceTooLong { bytes, limit, .. } => {
                assert_eq!(*bytes, 13);
                assert_eq!(*limit, MAX_COMBINED_UTF8_LEN);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn twelve_byte_combination_is_accepted() {
        // 2 + 5 * 2 = 12 bytes
        let text = format!("é{}", "\u{0301}".repeat(5));
        let seg = segment(&text);
        assert_eq!(seg.glyphs.len(), 1);
        assert!(seg.rejected.is_empty());
    }

    #[test]
    fn supplementary_code_point_is_one_glyph() {
        let seg = segment("\u{20B9F}x");
        assert_eq!(symbols(&seg), ["\u{20B9F}", "x"]);
    }

    #[test]
    fn utf16_surrogate_pair_is_joined() {
        let units: Vec<u16> = "\u{20B9F}a".encode_utf16().collect();
        assert_eq!(units.len(), 3);
        let seg = segment_utf16(&units).unwrap();
        assert_eq!(symbols(&seg), ["\u{20B9F}", "a"]);
    }

    #[test]
    fn utf16_unterminated_surrogate_is_fatal() {
        let units = [0x0061, 0xD842];
        let err = segment_utf16(&units).unwrap_err();
        assert_eq!(
            err,
            SegmentError::UnpairedSurrogate {
                offset: 1,
                unit: 0xD842
            }
        );
    }

    #[test]
    fn utf16_lone_low_surrogate_is_fatal() {
        let units = [0xDC00, 0x0061];
        assert!(matches!(
            segment_utf16(&units),
            Err(SegmentError::UnpairedSurrogate { offset: 0, .. })
        ));
    }

    #[test]
    fn resegmenting_joined_output_is_stable() {
        let inputs = [
            "a\u{0301}b",
            "\u{0301}a\u{0302}\u{0303}",
            "歌詞\u{200B}テスト",
            "e\u{0300}\u{0301}\u{0302}",
            "plain words",
        ];
        for input in inputs {
            let first = segment(input);
            let joined: String = first.glyphs.iter().map(Glyph::as_str).collect();
            let second = segment(&joined);
            assert_eq!(first.glyphs, second.glyphs, "unstable for {input:?}");

            let third = segment(&second.glyphs.iter().map(Glyph::as_str).collect::<String>());
            assert_eq!(second.glyphs, third.glyphs);
        }
    }
}

//! Input document readers.
//!
//! Two kinds of input feed the glyph registry:
//!
//! - Lyric XML: a `<vocals>` root with one `<vocal lyric="...">` per syllable.
//!   A single trailing `+` or `-` (syllable joiners) is dropped from each
//!   lyric, and the space glyph is always added.
//! - Plain text: every character except tab, CR and LF. UTF-8 with or without
//!   a byte order mark, or UTF-16 with one.

use std::path::{Path, PathBuf};

use lyric_atlas_core::{GlyphRegistry, SegmentError};
use thiserror::Error;

/// Root element of a lyric document
pub const LYRICS_ROOT: &str = "vocals";

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Characters dropped from plain-text input
const STRIPPED_CHARS: [char; 3] = ['\t', '\r', '\n'];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported input '{}': expected a .xml or .txt file", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading the xml file: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("not a valid lyric file: root element is <{root}>, expected <vocals>")]
    NotALyricFile { root: String },

    #[error("vocal #{index} has no lyric attribute")]
    MissingLyric { index: usize },

    #[error("UTF-16 input has an odd number of bytes ({len})")]
    TruncatedUtf16 { len: usize },

    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Input kind, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Lyrics,
    PlainText,
}

impl DocumentKind {
    /// `.xml` or `.txt`, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xml") => Ok(Self::Lyrics),
            Some("txt") => Ok(Self::PlainText),
            _ => Err(DocumentError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read `path` and add its glyphs to `registry`.
///
/// Returns the combining sequences that were too long to keep.
pub fn load_document(
    path: &Path,
    registry: &mut GlyphRegistry,
) -> Result<Vec<SegmentError>, DocumentError> {
    let kind = DocumentKind::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Reading {:?} as {:?} ({} bytes)", path, kind, bytes.len());

    match kind {
        DocumentKind::Lyrics => {
            let text = decode_xml_text(&bytes)?;
            read_lyrics(&text, registry)
        }
        DocumentKind::PlainText => read_plain_text(&bytes, registry),
    }
}

/// Add the glyphs of every `<vocal>` lyric in `xml` to `registry`.
pub fn read_lyrics(
    xml: &str,
    registry: &mut GlyphRegistry,
) -> Result<Vec<SegmentError>, DocumentError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != LYRICS_ROOT {
        return Err(DocumentError::NotALyricFile {
            root: root.tag_name().name().to_string(),
        });
    }

    let mut rejected = Vec::new();
    let vocals = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "vocal");
    let mut count = 0;
    for (index, vocal) in vocals.enumerate() {
        let lyric = vocal
            .attribute("lyric")
            .ok_or(DocumentError::MissingLyric { index })?;
        rejected.extend(registry.add_text(trim_lyric(lyric)));
        count += 1;
    }

    // The space glyph is part of every official lyric font
    registry.ensure_whitespace();
    log::info!("Read {} vocals, {} distinct glyphs", count, registry.len());
    Ok(rejected)
}

/// Drop one trailing syllable joiner (`+` or `-`).
pub fn trim_lyric(lyric: &str) -> &str {
    lyric
        .strip_suffix('+')
        .or_else(|| lyric.strip_suffix('-'))
        .unwrap_or(lyric)
}

/// Add the glyphs of a plain-text file's bytes to `registry`.
pub fn read_plain_text(
    bytes: &[u8],
    registry: &mut GlyphRegistry,
) -> Result<Vec<SegmentError>, DocumentError> {
    let rejected = if let Some(body) = bytes.strip_prefix(&UTF16_LE_BOM) {
        registry.add_utf16(&utf16_units(body, u16::from_le_bytes)?)?
    } else if let Some(body) = bytes.strip_prefix(&UTF16_BE_BOM) {
        registry.add_utf16(&utf16_units(body, u16::from_be_bytes)?)?
    } else {
        let text: String = decode_utf8(bytes)
            .chars()
            .filter(|c| !STRIPPED_CHARS.contains(c))
            .collect();
        registry.add_text(&text)
    };
    log::info!("Read plain text, {} distinct glyphs", registry.len());
    Ok(rejected)
}

/// UTF-16 code units with tab, CR and LF removed.
fn utf16_units(body: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<Vec<u16>, DocumentError> {
    let mut units = raw_utf16_units(body, from_bytes)?;
    units.retain(|&unit| !STRIPPED_CHARS.iter().any(|&c| u32::from(unit) == c as u32));
    Ok(units)
}

fn raw_utf16_units(body: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<Vec<u16>, DocumentError> {
    if body.len() % 2 != 0 {
        return Err(DocumentError::TruncatedUtf16 { len: body.len() });
    }
    Ok(body
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]))
        .collect())
}

/// Lyric XML text, honoring a UTF-8 or UTF-16 byte order mark.
pub fn decode_xml_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let units = if let Some(body) = bytes.strip_prefix(&UTF16_LE_BOM) {
        raw_utf16_units(body, u16::from_le_bytes)?
    } else if let Some(body) = bytes.strip_prefix(&UTF16_BE_BOM) {
        raw_utf16_units(body, u16::from_be_bytes)?
    } else {
        return Ok(decode_utf8(bytes));
    };

    let mut text = String::with_capacity(units.len());
    let mut offset = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let c = decoded.map_err(|e| SegmentError::UnpairedSurrogate {
            offset,
            unit: e.unpaired_surrogate(),
        })?;
        offset += c.len_utf16();
        text.push(c);
    }
    Ok(text)
}

/// UTF-8 text without its BOM; invalid sequences become U+FFFD.
fn decode_utf8(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(e) => {
            log::warn!("Input is not valid UTF-8 ({}); replacing bad sequences", e);
            String::from_utf8_lossy(body).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_lyric_drops_one_joiner() {
        assert_eq!(trim_lyric("ka+"), "ka");
        assert_eq!(trim_lyric("ka-"), "ka");
        assert_eq!(trim_lyric("ka--"), "ka-");
        assert_eq!(trim_lyric("ka"), "ka");
        assert_eq!(trim_lyric("+"), "");
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("song.XML")).unwrap(),
            DocumentKind::Lyrics
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("words.txt")).unwrap(),
            DocumentKind::PlainText
        );
        assert!(matches!(
            DocumentKind::from_path(Path::new("song.json")),
            Err(DocumentError::UnsupportedExtension { .. })
        ));
        assert!(DocumentKind::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_utf16_units_strip_newlines() {
        let bytes = [0x42, 0x30, 0x0A, 0x00, 0x44, 0x30];
        let units = utf16_units(&bytes, u16::from_le_bytes).unwrap();
        assert_eq!(units, vec![0x3042, 0x3044]);
    }

    #[test]
    fn test_utf16_odd_length_is_error() {
        assert!(matches!(
            utf16_units(&[0x42, 0x30, 0x0A], u16::from_le_bytes),
            Err(DocumentError::TruncatedUtf16 { len: 3 })
        ));
    }
}

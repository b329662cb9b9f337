//! Tests for lyric and plain-text input readers.

use std::fs;

use lyric_atlas::document::{
    DocumentError, decode_xml_text, load_document, read_lyrics, read_plain_text,
};
use lyric_atlas_core::{GlyphRegistry, SegmentError};
use tempfile::TempDir;

fn symbols(registry: &GlyphRegistry) -> Vec<String> {
    registry.iter().map(|g| g.as_str().to_string()).collect()
}

#[test]
fn test_lyrics_strip_joiners_and_add_space() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<vocals count="3">
  <vocal time="1.0" note="60" length="0.5" lyric="か+"/>
  <vocal time="1.5" note="60" length="0.5" lyric="ba-"/>
  <vocal time="2.0" note="60" length="0.5" lyric="c"/>
</vocals>"#;
    let mut registry = GlyphRegistry::new();
    let rejected = read_lyrics(xml, &mut registry).unwrap();

    assert!(rejected.is_empty());
    assert_eq!(symbols(&registry), vec![" ", "a", "b", "c", "か"]);
    assert!(!registry.contains("+"));
    assert!(!registry.contains("-"));
}

#[test]
fn test_lyrics_keep_inner_joiners() {
    let xml = r#"<vocals><vocal lyric="a-b+"/></vocals>"#;
    let mut registry = GlyphRegistry::new();
    read_lyrics(xml, &mut registry).unwrap();
    assert!(registry.contains("-"));
    assert!(!registry.contains("+"));
}

#[test]
fn test_lyrics_wrong_root_is_rejected() {
    let xml = r#"<song><vocal lyric="a"/></song>"#;
    let mut registry = GlyphRegistry::new();
    let err = read_lyrics(xml, &mut registry).unwrap_err();
    assert!(matches!(err, DocumentError::NotALyricFile { ref root } if root == "song"));
    assert!(registry.is_empty());
}

#[test]
fn test_lyrics_missing_attribute() {
    let xml = r#"<vocals><vocal lyric="a"/><vocal time="1"/></vocals>"#;
    let mut registry = GlyphRegistry::new();
    let err = read_lyrics(xml, &mut registry).unwrap_err();
    assert!(matches!(err, DocumentError::MissingLyric { index: 1 }));
}

#[test]
fn test_lyrics_malformed_xml() {
    let mut registry = GlyphRegistry::new();
    let err = read_lyrics("<vocals><vocal lyric=\"a\">", &mut registry).unwrap_err();
    assert!(matches!(err, DocumentError::Xml(_)));
}

#[test]
fn test_lyrics_combining_sequences_stay_whole() {
    let xml = "<vocals><vocal lyric=\"e\u{301}\"/></vocals>";
    let mut registry = GlyphRegistry::new();
    read_lyrics(xml, &mut registry).unwrap();
    assert!(registry.contains("e\u{301}"));
    assert!(!registry.contains("e"));
}

#[test]
fn test_plain_text_strips_control_chars() {
    let mut registry = GlyphRegistry::new();
    read_plain_text("ab\tc\r\nd\n".as_bytes(), &mut registry).unwrap();
    assert_eq!(symbols(&registry), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_plain_text_does_not_force_space() {
    let mut registry = GlyphRegistry::new();
    read_plain_text(b"xy", &mut registry).unwrap();
    assert!(!registry.contains(" "));

    read_plain_text(b"x y", &mut registry).unwrap();
    assert!(registry.contains(" "));
}

#[test]
fn test_plain_text_utf8_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("あい".as_bytes());
    let mut registry = GlyphRegistry::new();
    read_plain_text(&bytes, &mut registry).unwrap();
    assert_eq!(symbols(&registry), vec!["あ", "い"]);
}

#[test]
fn test_plain_text_utf16_le_and_be() {
    let text = "あ\r\nb";
    let mut le = vec![0xFF, 0xFE];
    let mut be = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        le.extend_from_slice(&unit.to_le_bytes());
        be.extend_from_slice(&unit.to_be_bytes());
    }

    let mut from_le = GlyphRegistry::new();
    read_plain_text(&le, &mut from_le).unwrap();
    let mut from_be = GlyphRegistry::new();
    read_plain_text(&be, &mut from_be).unwrap();

    assert_eq!(symbols(&from_le), vec!["b", "あ"]);
    assert_eq!(from_le, from_be);
}

#[test]
fn test_plain_text_utf16_unpaired_surrogate_is_fatal() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in [0x0061u16, 0xD800, 0x0062] {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let mut registry = GlyphRegistry::new();
    let err = read_plain_text(&bytes, &mut registry).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::Segment(SegmentError::UnpairedSurrogate { .. })
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_load_document_by_extension() {
    let dir = TempDir::new().unwrap();
    let xml_path = dir.path().join("song.xml");
    fs::write(&xml_path, r#"<vocals><vocal lyric="ab+"/></vocals>"#).unwrap();
    let txt_path = dir.path().join("glyphs.TXT");
    fs::write(&txt_path, "z\n").unwrap();

    let mut registry = GlyphRegistry::new();
    load_document(&xml_path, &mut registry).unwrap();
    load_document(&txt_path, &mut registry).unwrap();
    assert_eq!(symbols(&registry), vec![" ", "a", "b", "z"]);
}

#[test]
fn test_load_document_utf16_lyrics() {
    let xml = "<?xml version=\"1.0\" encoding=\"utf-16\"?>\r\n\
               <vocals>\r\n  <vocal time=\"1.0\" lyric=\"かな+\"/>\r\n</vocals>";
    let dir = TempDir::new().unwrap();
    let le_path = dir.path().join("le.xml");
    let be_path = dir.path().join("be.xml");
    let mut le = vec![0xFF, 0xFE];
    let mut be = vec![0xFE, 0xFF];
    for unit in xml.encode_utf16() {
        le.extend_from_slice(&unit.to_le_bytes());
        be.extend_from_slice(&unit.to_be_bytes());
    }
    fs::write(&le_path, &le).unwrap();
    fs::write(&be_path, &be).unwrap();

    let mut from_le = GlyphRegistry::new();
    load_document(&le_path, &mut from_le).unwrap();
    let mut from_be = GlyphRegistry::new();
    load_document(&be_path, &mut from_be).unwrap();

    assert_eq!(symbols(&from_le), vec![" ", "か", "な"]);
    assert_eq!(from_le, from_be);
}

#[test]
fn test_decode_xml_text() {
    let mut utf8 = vec![0xEF, 0xBB, 0xBF];
    utf8.extend_from_slice("<vocals/>".as_bytes());
    assert_eq!(decode_xml_text(&utf8).unwrap(), "<vocals/>");

    assert!(matches!(
        decode_xml_text(&[0xFF, 0xFE, 0x3C]),
        Err(DocumentError::TruncatedUtf16 { len: 1 })
    ));

    let mut unpaired = vec![0xFE, 0xFF];
    unpaired.extend_from_slice(&0xDC00u16.to_be_bytes());
    assert!(matches!(
        decode_xml_text(&unpaired),
        Err(DocumentError::Segment(SegmentError::UnpairedSurrogate {
            offset: 0,
            unit: 0xDC00
        }))
    ));
}

#[test]
fn test_load_document_errors() {
    let dir = TempDir::new().unwrap();
    let mut registry = GlyphRegistry::new();

    let json_path = dir.path().join("song.json");
    fs::write(&json_path, "{}").unwrap();
    assert!(matches!(
        load_document(&json_path, &mut registry),
        Err(DocumentError::UnsupportedExtension { .. })
    ));

    let missing = dir.path().join("missing.xml");
    assert!(matches!(
        load_document(&missing, &mut registry),
        Err(DocumentError::Io { .. })
    ));
}

//! Glyph definition XML.
//!
//! Layout read by the game:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <GlyphDefinitions TextureWidth="512" TextureHeight="512">
//!   <GlyphDefinition Symbol="a" InnerYMin="..." ... OuterXMax="..." />
//! </GlyphDefinitions>
//! ```
//!
//! Attribute order is fixed: `Symbol, InnerYMin, InnerYMax, InnerXMin,
//! InnerXMax, OuterYMin, OuterYMax, OuterXMin, OuterXMax`.

use std::fmt::Write as _;

use lyric_atlas_core::{GlyphDefinition, GlyphDefinitions};

use super::OutputError;

const ROOT: &str = "GlyphDefinitions";
const ENTRY: &str = "GlyphDefinition";

/// Serialize `definitions` as indented XML.
pub fn to_glyph_xml(definitions: &GlyphDefinitions) -> String {
    let mut xml = String::with_capacity(64 + definitions.glyphs.len() * 240);
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    let _ = write!(
        xml,
        "<{ROOT} TextureWidth=\"{}\" TextureHeight=\"{}\"",
        definitions.texture_width, definitions.texture_height
    );
    if definitions.glyphs.is_empty() {
        xml.push_str(" />\n");
        return xml;
    }
    xml.push_str(">\n");

    for def in &definitions.glyphs {
        let _ = write!(
            xml,
            "  <{ENTRY} Symbol=\"{}\"",
            escape_attribute(&def.symbol)
        );
        for (name, value) in numeric_attributes(def) {
            let _ = write!(xml, " {name}=\"{value}\"");
        }
        xml.push_str(" />\n");
    }

    let _ = writeln!(xml, "</{ROOT}>");
    xml
}

fn numeric_attributes(def: &GlyphDefinition) -> [(&'static str, f32); 8] {
    [
        ("InnerYMin", def.inner_y_min),
        ("InnerYMax", def.inner_y_max),
        ("InnerXMin", def.inner_x_min),
        ("InnerXMax", def.inner_x_max),
        ("OuterYMin", def.outer_y_min),
        ("OuterYMax", def.outer_y_max),
        ("OuterXMin", def.outer_x_min),
        ("OuterXMax", def.outer_x_max),
    ]
}

/// Escape a string for a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}

/// Parse definitions written by [`to_glyph_xml`] (or by the game's tools).
pub fn parse_glyph_xml(xml: &str) -> Result<GlyphDefinitions, OutputError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT {
        return Err(OutputError::InvalidDefinitions(format!(
            "root element is <{}>, expected <{ROOT}>",
            root.tag_name().name()
        )));
    }

    let texture_width = parse_attr::<u32>(root, "TextureWidth")?;
    let texture_height = parse_attr::<u32>(root, "TextureHeight")?;

    let glyphs = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == ENTRY)
        .map(|node| -> Result<GlyphDefinition, OutputError> {
            let symbol = node.attribute("Symbol").ok_or_else(|| {
                OutputError::InvalidDefinitions("GlyphDefinition without Symbol".into())
            })?;
            Ok(GlyphDefinition {
                symbol: symbol.to_string(),
                inner_y_min: parse_attr(node, "InnerYMin")?,
                inner_y_max: parse_attr(node, "InnerYMax")?,
                inner_x_min: parse_attr(node, "InnerXMin")?,
                inner_x_max: parse_attr(node, "InnerXMax")?,
                outer_y_min: parse_attr(node, "OuterYMin")?,
                outer_y_max: parse_attr(node, "OuterYMax")?,
                outer_x_min: parse_attr(node, "OuterXMin")?,
                outer_x_max: parse_attr(node, "OuterXMax")?,
            })
        })
        .collect::<Result<Vec<_>, OutputError>>()?;

    Ok(GlyphDefinitions {
        texture_width,
        texture_height,
        glyphs,
    })
}

fn parse_attr<T: std::str::FromStr>(
    node: roxmltree::Node<'_, '_>,
    name: &str,
) -> Result<T, OutputError> {
    let raw = node.attribute(name).ok_or_else(|| {
        OutputError::InvalidDefinitions(format!("<{}> is missing {name}", node.tag_name().name()))
    })?;
    raw.trim().parse().map_err(|_| {
        OutputError::InvalidDefinitions(format!("{name}=\"{raw}\" is not a valid number"))
    })
}

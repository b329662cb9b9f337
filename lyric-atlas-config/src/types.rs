//! Configuration value types shared by the generator crates.

use serde::{Deserialize, Serialize};

// ============================================================================
// Font Types
// ============================================================================

/// Named font weight, serialized in snake_case (`semi_bold`, `bold`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeightName {
    Thin,
    ExtraLight,
    Light,
    Normal,
    Medium,
    SemiBold,
    #[default]
    Bold,
    ExtraBold,
    Black,
}

impl FontWeightName {
    /// OpenType `usWeightClass` value for this weight.
    pub fn numeric(self) -> u16 {
        match self {
            FontWeightName::Thin => 100,
            FontWeightName::ExtraLight => 200,
            FontWeightName::Light => 300,
            FontWeightName::Normal => 400,
            FontWeightName::Medium => 500,
            FontWeightName::SemiBold => 600,
            FontWeightName::Bold => 700,
            FontWeightName::ExtraBold => 800,
            FontWeightName::Black => 900,
        }
    }

    /// Display name for help output
    pub fn display_name(&self) -> &'static str {
        match self {
            FontWeightName::Thin => "Thin",
            FontWeightName::ExtraLight => "Extra Light",
            FontWeightName::Light => "Light",
            FontWeightName::Normal => "Normal",
            FontWeightName::Medium => "Medium",
            FontWeightName::SemiBold => "Semi Bold",
            FontWeightName::Bold => "Bold",
            FontWeightName::ExtraBold => "Extra Bold",
            FontWeightName::Black => "Black",
        }
    }

    /// All weights, lightest first
    pub fn all() -> &'static [FontWeightName] {
        &[
            FontWeightName::Thin,
            FontWeightName::ExtraLight,
            FontWeightName::Light,
            FontWeightName::Normal,
            FontWeightName::Medium,
            FontWeightName::SemiBold,
            FontWeightName::Bold,
            FontWeightName::ExtraBold,
            FontWeightName::Black,
        ]
    }

    /// Parse a weight name, accepting snake_case, spaced, or numeric forms.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        if let Ok(value) = normalized.parse::<u16>() {
            return Self::all().iter().copied().find(|w| w.numeric() == value);
        }

        match normalized.as_str() {
            "thin" => Some(FontWeightName::Thin),
            "extralight" | "ultralight" => Some(FontWeightName::ExtraLight),
            "light" => Some(FontWeightName::Light),
            "normal" | "regular" => Some(FontWeightName::Normal),
            "medium" => Some(FontWeightName::Medium),
            "semibold" | "demibold" => Some(FontWeightName::SemiBold),
            "bold" => Some(FontWeightName::Bold),
            "extrabold" | "ultrabold" => Some(FontWeightName::ExtraBold),
            "black" | "heavy" => Some(FontWeightName::Black),
            _ => None,
        }
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Drop shadow applied beneath the composed atlas glyphs.
///
/// Mirrors the canvas effect used by the reference lyric textures: a blue
/// shadow offset along `direction` (degrees, counter-clockwise from +x) by
/// `depth` pixels and blurred by `blur_radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropShadowConfig {
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    #[serde(default = "crate::defaults::shadow_blur_radius")]
    pub blur_radius: f64,

    #[serde(default = "crate::defaults::shadow_direction")]
    pub direction: f64,

    #[serde(default = "crate::defaults::shadow_depth")]
    pub depth: f64,

    #[serde(default = "crate::defaults::shadow_opacity")]
    pub opacity: f64,
}

impl Default for DropShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_radius: crate::defaults::shadow_blur_radius(),
            direction: crate::defaults::shadow_direction(),
            depth: crate::defaults::shadow_depth(),
            opacity: crate::defaults::shadow_opacity(),
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// External DDS compressor invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// When false only the PNG texture and the definition file are written
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// Executable name or path
    #[serde(default = "crate::defaults::compressor_program")]
    pub program: String,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: crate::defaults::compressor_program(),
        }
    }
}

/// File format of the glyph definition side-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionFormat {
    /// `<stem>.glyphs.xml`, the format read by the game
    #[default]
    Xml,
    /// `<stem>.glyphs.json`
    Json,
}

impl DefinitionFormat {
    /// Extension appended to the output stem (without the leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            DefinitionFormat::Xml => "glyphs.xml",
            DefinitionFormat::Json => "glyphs.json",
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for the diagnostic log bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Display name for help output
    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// All available levels
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Parse a level name as used by `RUST_LOG` (`warn`, `info`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|level| level.display_name().eq_ignore_ascii_case(&name))
    }

    /// Convert to a `log` crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_weight_parse_variants() {
        assert_eq!(FontWeightName::parse("bold"), Some(FontWeightName::Bold));
        assert_eq!(
            FontWeightName::parse("Semi Bold"),
            Some(FontWeightName::SemiBold)
        );
        assert_eq!(
            FontWeightName::parse("extra_bold"),
            Some(FontWeightName::ExtraBold)
        );
        assert_eq!(FontWeightName::parse("400"), Some(FontWeightName::Normal));
        assert_eq!(FontWeightName::parse("450"), None);
        assert_eq!(FontWeightName::parse("wide"), None);
    }

    #[test]
    fn test_font_weight_numeric_is_ascending() {
        let values: Vec<u16> = FontWeightName::all().iter().map(|w| w.numeric()).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_definition_format_extension() {
        assert_eq!(DefinitionFormat::Xml.extension(), "glyphs.xml");
        assert_eq!(DefinitionFormat::Json.extension(), "glyphs.json");
    }
}

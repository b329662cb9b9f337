//! Command-line interface for lyric-atlas.
//!
//! Parses the input document path plus per-run overrides for the config file.

use std::path::PathBuf;

use clap::Parser;
use lyric_atlas_config::{Config, DefinitionFormat, FontWeightName, LogLevel};

/// Default output texture name
pub const DEFAULT_OUTPUT: &str = "lyrics.dds";

/// lyric-atlas - Build a lyric font texture atlas and its glyph definitions
#[derive(Parser, Debug)]
#[command(name = "lyric-atlas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lyric document (.xml with a <vocals> root) or plain text (.txt)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output texture (.dds keeps only the DDS; any other name also keeps the PNG)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font family
    #[arg(long, value_name = "FAMILY")]
    pub font: Option<String>,

    /// Font weight (thin, light, normal, medium, semi_bold, bold, black or 100-900)
    #[arg(long, value_name = "NAME", value_parser = parse_weight)]
    pub weight: Option<FontWeightName>,

    /// Glyph size in pixels
    #[arg(long, value_name = "N")]
    pub font_size: Option<u32>,

    /// Glyph size in pixels for kana and kanji
    #[arg(long, value_name = "N")]
    pub cjk_font_size: Option<u32>,

    /// Horizontal margin on each side of a glyph
    #[arg(long, value_name = "N")]
    pub margin: Option<u32>,

    /// Signed adjustment applied to each glyph's right edge
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub spacing: Option<i32>,

    /// Use layout metrics instead of pixel scanning for inner rectangles
    #[arg(long)]
    pub no_accurate_rects: bool,

    /// Render glyphs in the blue channel instead of red
    #[arg(long)]
    pub reverse_colors: bool,

    /// Skip the DDS compressor and keep only the PNG
    #[arg(long)]
    pub no_compress: bool,

    /// Glyph definition format
    #[arg(long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<DefinitionFormat>,

    /// Accept a taller row height without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    /// Write every override given on the command line into `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref family) = self.font {
            config.font_family = family.clone();
        }
        if let Some(weight) = self.weight {
            config.font_weight = weight;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(size) = self.cjk_font_size {
            config.cjk_font_size = size;
        }
        if let Some(margin) = self.margin {
            config.horizontal_margin = margin;
        }
        if let Some(spacing) = self.spacing {
            config.spacing_adjustment = spacing;
        }
        if self.no_accurate_rects {
            config.accurate_inner_rects = false;
        }
        if self.reverse_colors {
            config.reverse_colors = true;
        }
        if self.no_compress {
            config.compressor.enabled = false;
        }
        if let Some(format) = self.format {
            config.definition_format = format;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

fn parse_weight(value: &str) -> Result<FontWeightName, String> {
    FontWeightName::parse(value).ok_or_else(|| format!("unknown font weight '{value}'"))
}

fn parse_format(value: &str) -> Result<DefinitionFormat, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "xml" => Ok(DefinitionFormat::Xml),
        "json" => Ok(DefinitionFormat::Json),
        _ => Err(format!("unknown definition format '{value}' (expected xml or json)")),
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{value}'"))
}

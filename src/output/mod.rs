//! Writing the generated texture and its glyph definitions.
//!
//! For an output name ending in `.dds` only the compressed texture is kept;
//! for any other name the PNG is kept next to the DDS. The definition file is
//! always `<stem>.glyphs.xml` (or `.glyphs.json`). The PNG is first written to
//! the temp directory and the compressor's result is moved into place.

pub mod compressor;
pub mod glyph_xml;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use image::RgbaImage;
use lyric_atlas_config::{CompressorConfig, Config, DefinitionFormat};
use lyric_atlas_core::GlyphDefinitions;
use lyric_atlas_core::compose::unpremultiply;
use thiserror::Error;

pub use glyph_xml::{parse_glyph_xml, to_glyph_xml};

/// Scratch file names in the temp directory
pub const TEMP_PNG: &str = "temptexture.png";
pub const TEMP_DDS: &str = "temptexture.dds";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode texture '{}'", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to serialize glyph definitions: {0}")]
    Json(#[from] serde_json::Error),

    #[error("glyph definition XML is malformed: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid glyph definitions: {0}")]
    InvalidDefinitions(String),

    #[error("could not start texture compressor '{program}'")]
    CompressorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("texture compressor '{program}' exited with {status}")]
    CompressorFailed { program: String, status: ExitStatus },

    #[error("texture compressor did not produce '{}'", path.display())]
    CompressorNoOutput { path: PathBuf },
}

/// Final file locations for one output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dds: PathBuf,
    pub png: PathBuf,
    /// False when the PNG is only an intermediate for the compressor
    pub keep_png: bool,
    pub definitions: PathBuf,
}

impl OutputPaths {
    pub fn resolve(output: &Path, format: DefinitionFormat) -> Self {
        let is_dds = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dds"));
        let (dds, png, keep_png) = if is_dds {
            (output.to_path_buf(), output.with_extension("png"), false)
        } else {
            (output.with_extension("dds"), output.with_extension("png"), true)
        };
        Self {
            dds,
            png,
            keep_png,
            definitions: output.with_extension(format.extension()),
        }
    }
}

/// Writes texture and definitions for one generation run.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    paths: OutputPaths,
    format: DefinitionFormat,
    compressor: CompressorConfig,
    temp_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output: &Path, config: &Config) -> Self {
        Self {
            paths: OutputPaths::resolve(output, config.definition_format),
            format: config.definition_format,
            compressor: config.compressor.clone(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Use `dir` for the intermediate PNG and DDS.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Write everything and return the files produced.
    ///
    /// `texture` holds premultiplied pixels, as the compositor produces them.
    pub fn write(
        &self,
        mut texture: RgbaImage,
        definitions: &GlyphDefinitions,
    ) -> Result<Vec<PathBuf>, OutputError> {
        let mut written = Vec::new();

        write_definitions(&self.paths.definitions, definitions, self.format)?;
        written.push(self.paths.definitions.clone());

        let temp_png = self.temp_dir.join(TEMP_PNG);
        unpremultiply(&mut texture);
        texture.save(&temp_png).map_err(|source| OutputError::Image {
            path: temp_png.clone(),
            source,
        })?;
        log::debug!(
            "Wrote {}x{} texture to {:?}",
            texture.width(),
            texture.height(),
            temp_png
        );

        if !self.compressor.enabled {
            log::info!("Compressor disabled, keeping PNG only");
            move_file(&temp_png, &self.paths.png)?;
            written.push(self.paths.png.clone());
            return Ok(written);
        }

        let temp_dds = self.temp_dir.join(TEMP_DDS);
        let compressed = compressor::compress(&self.compressor.program, &temp_png, &temp_dds)
            .and_then(|()| move_file(&temp_dds, &self.paths.dds));
        if let Err(e) = compressed {
            remove_if_exists(&temp_png);
            return Err(e);
        }
        written.push(self.paths.dds.clone());

        if self.paths.keep_png {
            move_file(&temp_png, &self.paths.png)?;
            written.push(self.paths.png.clone());
        } else {
            remove_if_exists(&temp_png);
        }
        Ok(written)
    }
}

/// Serialize `definitions` to `path` in `format`.
pub fn write_definitions(
    path: &Path,
    definitions: &GlyphDefinitions,
    format: DefinitionFormat,
) -> Result<(), OutputError> {
    let contents = match format {
        DefinitionFormat::Xml => to_glyph_xml(definitions),
        DefinitionFormat::Json => serde_json::to_string_pretty(definitions)?,
    };
    std::fs::write(path, contents).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Wrote {} glyph definitions to {:?}",
        definitions.glyphs.len(),
        path
    );
    Ok(())
}

/// Read definitions back from `path`, choosing the format by extension.
pub fn read_definitions(path: &Path) -> Result<GlyphDefinitions, OutputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&contents)?)
    } else {
        parse_glyph_xml(&contents)
    }
}

/// Replace `to` with `from`, copying when a rename cannot cross filesystems.
fn move_file(from: &Path, to: &Path) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: to.to_path_buf(),
        source,
    };
    if to.exists() {
        std::fs::remove_file(to).map_err(io_err)?;
    }
    if std::fs::rename(from, to).is_err() {
        std::fs::copy(from, to).map_err(io_err)?;
        remove_if_exists(from);
    }
    Ok(())
}

fn remove_if_exists(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        log::warn!("Failed to remove {:?}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dds_output_drops_png() {
        let paths = OutputPaths::resolve(Path::new("out/lyrics.dds"), DefinitionFormat::Xml);
        assert_eq!(paths.dds, Path::new("out/lyrics.dds"));
        assert_eq!(paths.png, Path::new("out/lyrics.png"));
        assert!(!paths.keep_png);
        assert_eq!(paths.definitions, Path::new("out/lyrics.glyphs.xml"));
    }

    #[test]
    fn test_png_output_keeps_png() {
        let paths = OutputPaths::resolve(Path::new("lyrics.png"), DefinitionFormat::Json);
        assert_eq!(paths.dds, Path::new("lyrics.dds"));
        assert_eq!(paths.png, Path::new("lyrics.png"));
        assert!(paths.keep_png);
        assert_eq!(paths.definitions, Path::new("lyrics.glyphs.json"));
    }

    #[test]
    fn test_extensionless_output() {
        let paths = OutputPaths::resolve(Path::new("lyrics"), DefinitionFormat::Xml);
        assert_eq!(paths.dds, Path::new("lyrics.dds"));
        assert_eq!(paths.png, Path::new("lyrics.png"));
        assert!(paths.keep_png);
        assert_eq!(paths.definitions, Path::new("lyrics.glyphs.xml"));
    }
}

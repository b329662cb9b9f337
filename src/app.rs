//! End-to-end pipeline: config, input document, generation, output files.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use lyric_atlas_config::Config;
use lyric_atlas_core::compose::render_atlas;
use lyric_atlas_core::{
    AcceptRowHeight, AtlasGenerator, FontSettings, GenerationResult, GlyphRegistry, PackerOptions,
    Rasterizer, RowHeightPrompt, SegmentError, export,
};
use lyric_atlas_fonts::SwashRasterizer;

use crate::cli::Cli;
use crate::debug;
use crate::document;
use crate::output::OutputWriter;

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Files written, in the order they were produced
    Saved {
        files: Vec<PathBuf>,
        /// Inner rects that had to be clamped into their outer rect
        clamped_rects: usize,
    },
    /// The taller row height was declined; nothing was written
    Canceled,
    /// The glyphs overflowed the largest texture; nothing was written
    DidNotFit,
}

/// Glyphs read from the input document.
#[derive(Debug, Default)]
pub struct LoadedGlyphs {
    pub registry: GlyphRegistry,
    /// Combining sequences that were too long and left out
    pub skipped: Vec<SegmentError>,
}

/// Result of [`run`]: how it ended plus the warnings the user must see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub warnings: Vec<String>,
}

/// Non-fatal problems of a run, one line each.
///
/// These are shown regardless of the log level.
pub fn run_warnings(skipped: &[SegmentError], clamped_rects: usize) -> Vec<String> {
    let mut warnings = Vec::new();
    if !skipped.is_empty() {
        warnings.push(format!(
            "{} glyph sequence(s) were skipped because they are too long:",
            skipped.len()
        ));
        warnings.extend(skipped.iter().map(|problem| format!("  {problem}")));
    }
    if clamped_rects > 0 {
        warnings.push(format!(
            "{clamped_rects} glyph(s) extend past their cell and were clipped; \
             try a smaller font size or a larger row height"
        ));
    }
    warnings
}

/// Asks on the terminal whether a taller row height is acceptable.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl RowHeightPrompt for StdinPrompt {
    fn confirm_row_height(&mut self, current: u32, proposed: u32) -> bool {
        print!(
            "The selected font needs a row height of {proposed}px (currently {current}px). \
             Continue with {proposed}px? [y/N] "
        );
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut response = String::new();
        if io::stdin().lock().read_line(&mut response).is_err() {
            return false;
        }
        is_yes(&response)
    }
}

/// `y` or `yes`, any case.
pub fn is_yes(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Load the config the CLI points at and apply its overrides.
pub fn load_config(cli: &Cli, explicit_log_level: bool) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    debug::apply_config_level(config.log_level.to_level_filter(), explicit_log_level);

    cli.apply_to(&mut config);
    config.validate().context("invalid settings")?;
    Ok(config)
}

/// Read the input document into a fresh registry.
pub fn load_glyphs(cli: &Cli) -> Result<LoadedGlyphs> {
    let mut registry = GlyphRegistry::new();
    let skipped = document::load_document(&cli.input, &mut registry)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    if !skipped.is_empty() {
        log::warn!("{} glyph sequences were skipped", skipped.len());
        for problem in &skipped {
            log::debug!("  {}", problem);
        }
    }
    Ok(LoadedGlyphs { registry, skipped })
}

/// Generate the atlas for `registry` and write it through `writer`.
pub fn generate_and_save<R: Rasterizer>(
    config: &Config,
    registry: &GlyphRegistry,
    rasterizer: R,
    prompt: &mut dyn RowHeightPrompt,
    writer: &OutputWriter,
) -> Result<RunOutcome> {
    let mut generator = AtlasGenerator::new(
        rasterizer,
        FontSettings::from(config),
        PackerOptions::from(config),
    );

    let report = generator
        .generate(registry, prompt)
        .context("atlas generation failed")?;
    log::info!(
        "Generation finished after {} size(s), row height {}",
        report.attempted_sizes.len(),
        report.row_height
    );

    match report.outcome {
        GenerationResult::Success(atlas) => {
            let clamped_rects = atlas.bounds_corrections;
            let texture = render_atlas(&atlas, &config.drop_shadow);
            let definitions = export(&atlas);
            let files = writer
                .write(texture, &definitions)
                .context("failed to save the texture")?;
            Ok(RunOutcome::Saved {
                files,
                clamped_rects,
            })
        }
        GenerationResult::UserCanceled => Ok(RunOutcome::Canceled),
        GenerationResult::DidNotFitIntoMaxSize => Ok(RunOutcome::DidNotFit),
    }
}

/// Run the whole pipeline for parsed command-line arguments.
pub fn run(cli: &Cli, explicit_log_level: bool) -> Result<RunReport> {
    let config = load_config(cli, explicit_log_level)?;
    let LoadedGlyphs { registry, skipped } = load_glyphs(cli)?;
    log::info!(
        "Generating {} glyphs with {} {} at {}px",
        registry.len(),
        config.font_family,
        config.font_weight.display_name(),
        config.font_size
    );

    let writer = OutputWriter::new(&cli.output, &config);
    let rasterizer = SwashRasterizer::new();
    let outcome = if cli.yes {
        generate_and_save(&config, &registry, rasterizer, &mut AcceptRowHeight, &writer)?
    } else {
        generate_and_save(&config, &registry, rasterizer, &mut StdinPrompt, &writer)?
    };

    let clamped_rects = match outcome {
        RunOutcome::Saved { clamped_rects, .. } => clamped_rects,
        _ => 0,
    };
    Ok(RunReport {
        warnings: run_warnings(&skipped, clamped_rects),
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_run_warnings_empty_when_clean() {
        assert!(run_warnings(&[], 0).is_empty());
    }

    #[test]
    fn test_run_warnings_lists_skipped_and_clamped() {
        let skipped = vec![SegmentError::CombiningSequenceTooLong {
            sequence: "a\u{301}\u{301}\u{301}\u{301}\u{301}\u{301}".to_string(),
            bytes: 13,
            limit: 12,
        }];
        let warnings = run_warnings(&skipped, 3);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("1 glyph sequence(s) were skipped"));
        assert!(warnings[1].contains("13 bytes"));
        assert!(warnings[2].starts_with("3 glyph(s) extend past their cell"));
    }
}

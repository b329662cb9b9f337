//! Font management with a fallback chain for lyric text.
//!
//! The manager resolves the configured family at the configured weight and
//! collects the installed fallback families behind it. A glyph string is
//! rendered with the first font that maps every one of its characters, so a
//! base character and its combining marks always come from the same face.

mod fallbacks;
mod loader;
mod types;

use std::collections::HashSet;

use anyhow::{Result, bail};
use fontdb::Database;

pub use fallbacks::FALLBACK_FAMILIES;
pub use loader::{load_any_font, load_font_from_db};
pub use types::FontData;

/// Primary font plus fallbacks, in lookup order.
///
/// Font indices are assigned as follows:
/// - 0: Primary font (the requested family, or the first installed fallback)
/// - 1..: Remaining fallback fonts
pub struct FontManager {
    fonts: Vec<FontData>,
    family: String,
    weight: u16,
    /// False when the requested family was not installed
    primary_is_requested: bool,
}

impl FontManager {
    /// Load system fonts and build the chain for `family` at `weight`.
    pub fn new(family: &str, weight: u16) -> Result<Self> {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.len());
        Self::from_database(&db, family, weight)
    }

    /// Build the chain from an already populated database.
    pub fn from_database(db: &Database, family: &str, weight: u16) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut fonts = Vec::new();

        log::info!("Attempting to load primary font: {} ({})", family, weight);
        let primary_is_requested = match loader::load_font_from_db(db, family, weight) {
            Some((id, data)) => {
                log::info!("Successfully loaded primary font: {}", data.family);
                seen.insert(id);
                fonts.push(data);
                true
            }
            None => {
                log::warn!("Primary font '{}' not found, using fallback chain", family);
                false
            }
        };

        for fallback in FALLBACK_FAMILIES {
            if let Some((id, data)) = loader::load_font_from_db(db, fallback, weight)
                && seen.insert(id)
            {
                log::debug!("Added fallback font: {}", data.family);
                fonts.push(data);
            }
        }

        if fonts.is_empty() {
            if let Some((_, data)) = loader::load_any_font(db) {
                log::warn!("No preferred font installed, using '{}'", data.family);
                fonts.push(data);
            } else {
                bail!(
                    "no usable font found for '{}' and the font database is empty",
                    family
                );
            }
        }
        log::info!("Font chain has {} fonts", fonts.len());

        Ok(Self {
            fonts,
            family: family.to_string(),
            weight,
            primary_is_requested,
        })
    }

    /// Family this manager was built for.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// True when built for the given family and weight.
    pub fn matches(&self, family: &str, weight: u16) -> bool {
        self.family == family && self.weight == weight
    }

    /// False when the requested family was missing and a fallback stands in.
    pub fn has_requested_family(&self) -> bool {
        self.primary_is_requested
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn get_font(&self, font_index: usize) -> Option<&FontData> {
        self.fonts.get(font_index)
    }

    pub fn primary(&self) -> &FontData {
        &self.fonts[0]
    }

    /// First font that maps every character of `text`.
    ///
    /// Falls back to the primary font (index 0) when none covers the whole
    /// string; missing characters then render as the font's `.notdef`.
    pub fn font_for_text(&self, text: &str) -> (usize, &FontData) {
        if let Some((index, font)) = self
            .fonts
            .iter()
            .enumerate()
            .find(|(_, font)| font.covers(text))
        {
            if index > 0 {
                log::debug!("{:?} rendered with fallback font '{}'", text, font.family);
            }
            return (index, font);
        }

        log::warn!(
            "No font covers {:?} ({} fonts searched); using '{}'",
            text,
            self.fonts.len(),
            self.fonts[0].family
        );
        (0, &self.fonts[0])
    }
}

//! Range checks for `Config` values.

use super::Config;
use crate::defaults::{FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::error::ConfigError;

impl Config {
    /// Clamp a font size into the supported range.
    pub fn valid_font_size(font_size: u32) -> u32 {
        font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
    }

    /// Validate the configuration in place.
    ///
    /// Out-of-range font sizes are clamped with a warning; values that cannot
    /// produce an atlas at all are rejected.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.font_family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_family must not be empty".to_string(),
            ));
        }

        if self.glyph_row_height == 0 {
            return Err(ConfigError::Validation(
                "glyph_row_height must be greater than zero".to_string(),
            ));
        }

        if self.glyph_row_height >= 512 {
            return Err(ConfigError::Validation(format!(
                "glyph_row_height {} does not fit a single row into a 512 pixel texture",
                self.glyph_row_height
            )));
        }

        for (name, size) in [
            ("font_size", &mut self.font_size),
            ("cjk_font_size", &mut self.cjk_font_size),
        ] {
            let clamped = Self::valid_font_size(*size);
            if clamped != *size {
                log::warn!(
                    "{} {} is outside {}..={}, using {}",
                    name,
                    size,
                    FONT_SIZE_MIN,
                    FONT_SIZE_MAX,
                    clamped
                );
                *size = clamped;
            }
        }

        let shadow = &self.drop_shadow;
        if !(0.0..=1.0).contains(&shadow.opacity) {
            return Err(ConfigError::Validation(format!(
                "drop_shadow.opacity {} must be within 0.0..=1.0",
                shadow.opacity
            )));
        }
        if shadow.blur_radius < 0.0 || shadow.depth < 0.0 {
            return Err(ConfigError::Validation(
                "drop_shadow.blur_radius and drop_shadow.depth must not be negative".to_string(),
            ));
        }

        if self.compressor.enabled && self.compressor.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "compressor.program must be set when the compressor is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

//! Font data types for font management.

use std::sync::Arc;

use swash::{CacheKey, FontRef};

/// Owned font bytes plus the location of one face inside them.
///
/// A `FontRef` borrowing the bytes is produced on demand by
/// [`FontData::font_ref`], so the data can be cloned and shared freely.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within the data (non-zero only for collections)
    pub face_index: u32,
    /// Family name as reported by the font database
    pub family: String,
    offset: u32,
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("family", &self.family)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontData {
    /// Parse face 0 of `data`. Returns `None` for invalid font data.
    pub fn new(data: Vec<u8>, family: impl Into<String>) -> Option<Self> {
        Self::new_with_index(data, 0, family)
    }

    /// Parse face `face_index` of `data`.
    ///
    /// Needed for TrueType Collection (.ttc) files where several faces share
    /// the same bytes.
    pub fn new_with_index(
        data: Vec<u8>,
        face_index: u32,
        family: impl Into<String>,
    ) -> Option<Self> {
        let font_ref = FontRef::from_index(&data, face_index as usize)?;
        let (offset, key) = (font_ref.offset, font_ref.key);
        Some(Self {
            data: Arc::new(data),
            face_index,
            family: family.into(),
            offset,
            key,
        })
    }

    /// Swash reference for metrics, charmap and scaling.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }

    /// True when the charmap maps every character of `text`.
    pub fn covers(&self, text: &str) -> bool {
        let charmap = self.font_ref().charmap();
        text.chars().all(|c| charmap.map(c) != 0)
    }
}

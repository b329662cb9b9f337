//! Font loading from the system font database.

use fontdb::{Database, Family, Query};

use super::types::FontData;

/// Load the face that best matches `family_name` at `weight`.
///
/// fontdb picks the closest available weight when the exact one is missing.
/// Returns the face id alongside the data so callers can skip duplicates.
pub fn load_font_from_db(
    db: &Database,
    family_name: &str,
    weight: u16,
) -> Option<(fontdb::ID, FontData)> {
    let query = Query {
        families: &[Family::Name(family_name)],
        weight: fontdb::Weight(weight),
        style: fontdb::Style::Normal,
        ..Query::default()
    };

    let id = db.query(&query)?;
    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| family_name.to_string());

    let font_data = db.with_face_data(id, |bytes, face_index| {
        FontData::new_with_index(bytes.to_vec(), face_index, family)
    })??;

    Some((id, font_data))
}

/// Load the first face in the database, whatever it is.
pub fn load_any_font(db: &Database) -> Option<(fontdb::ID, FontData)> {
    db.faces().find_map(|face| {
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        db.with_face_data(face.id, |bytes, face_index| {
            FontData::new_with_index(bytes.to_vec(), face_index, family)
        })
        .flatten()
        .map(|data| (face.id, data))
    })
}

//! Moderator-created cat records.

use crate::domain::non_blank;
use serde::{Deserialize, Serialize};
use shared_types::{Cat, CatId, NamingError, Timestamp, VotingStatus};

/// Body of a moderator create request. Every field is optional on the wire so
/// that all missing required fields can be reported at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCat {
    pub name: Option<String>,
    pub photos: Option<Vec<String>>,
    pub primary_photo: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub location_name: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age: Option<String>,
    pub is_stray: Option<bool>,
    pub background_story: Option<String>,
    pub approved: Option<bool>,
}

impl NewCat {
    /// Validate and build the row. New cats always start outside any naming
    /// round.
    pub fn into_cat(self, created_at: Timestamp) -> Result<Cat, NamingError> {
        let primary_photo = non_blank(self.primary_photo.as_deref());
        let location_name = non_blank(self.location_name.as_deref());
        let color = non_blank(self.color.as_deref());

        let missing: Vec<&str> = [
            ("primary_photo", primary_photo.is_none()),
            ("location_lat", self.location_lat.is_none()),
            ("location_lng", self.location_lng.is_none()),
            ("location_name", location_name.is_none()),
            ("color", color.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (Some(primary_photo), Some(lat), Some(lng), Some(location_name), Some(color)) = (
            primary_photo,
            self.location_lat,
            self.location_lng,
            location_name,
            color,
        ) else {
            return Err(NamingError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };
        check_coordinates(lat, lng)?;

        Ok(Cat {
            id: CatId::new(),
            name: non_blank(self.name.as_deref()),
            photos: self.photos.unwrap_or_default(),
            primary_photo,
            location_lat: lat,
            location_lng: lng,
            location_name,
            breed: non_blank(self.breed.as_deref()),
            color,
            age: non_blank(self.age.as_deref()),
            is_stray: self.is_stray.unwrap_or(true),
            background_story: non_blank(self.background_story.as_deref()),
            voting_status: VotingStatus::None,
            approved: self.approved.unwrap_or(false),
            created_at,
        })
    }
}

pub(crate) fn check_coordinates(lat: f64, lng: f64) -> Result<(), NamingError> {
    let valid = lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng);
    if !valid {
        return Err(NamingError::validation(
            "location_lat and location_lng must be valid coordinates",
        ));
    }
    Ok(())
}

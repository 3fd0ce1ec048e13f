//! # Sightings
//!
//! A member of the public reporting a cat. The photo itself is stored by the
//! upload layer; the registry only sees its metadata and URL.
//!
//! Submitted cats are never approved and never in a naming round. Missing or
//! unusable coordinates fall back to the centre of Malta.

use crate::domain::new_cat::check_coordinates;
use crate::domain::non_blank;
use serde::{Deserialize, Serialize};
use shared_types::{
    Cat, CatId, NamingError, Timestamp, VotingStatus, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
};

pub const ALLOWED_PHOTO_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// 10 MiB.
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMeta {
    /// Public URL the upload layer assigned, e.g. `/uploads/<file>.jpg`.
    pub url: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SightingSubmission {
    pub photo: Option<PhotoMeta>,
    pub location_name: Option<String>,
    pub color: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    #[serde(default)]
    pub is_stray: bool,
    pub background_story: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

impl SightingSubmission {
    pub fn into_cat(self, created_at: Timestamp) -> Result<Cat, NamingError> {
        let location_name = non_blank(self.location_name.as_deref());
        let color = non_blank(self.color.as_deref());
        let photo = self.photo.filter(|p| !p.url.trim().is_empty());

        let (Some(photo), Some(location_name), Some(color)) = (photo, location_name, color) else {
            return Err(NamingError::validation(
                "Photo, location, and color are required",
            ));
        };

        if !ALLOWED_PHOTO_TYPES.contains(&photo.content_type.as_str()) {
            return Err(NamingError::validation(
                "Only JPG, PNG, and WebP images are allowed",
            ));
        }
        if photo.size_bytes > MAX_PHOTO_BYTES {
            return Err(NamingError::validation("File must be under 10MB"));
        }

        let (location_lat, location_lng) =
            coordinates_or_default(self.location_lat, self.location_lng);
        let url = photo.url.trim().to_string();

        Ok(Cat {
            id: CatId::new(),
            name: None,
            photos: vec![url.clone()],
            primary_photo: url,
            location_lat,
            location_lng,
            location_name,
            breed: non_blank(self.breed.as_deref()),
            color,
            age: non_blank(self.age.as_deref()),
            is_stray: self.is_stray,
            background_story: non_blank(self.background_story.as_deref()),
            voting_status: VotingStatus::None,
            approved: false,
            created_at,
        })
    }
}

// Each axis falls back independently.
fn coordinates_or_default(lat: Option<f64>, lng: Option<f64>) -> (f64, f64) {
    let lat = lat
        .filter(|v| check_coordinates(*v, 0.0).is_ok())
        .unwrap_or(DEFAULT_LATITUDE);
    let lng = lng
        .filter(|v| check_coordinates(0.0, *v).is_ok())
        .unwrap_or(DEFAULT_LONGITUDE);
    (lat, lng)
}

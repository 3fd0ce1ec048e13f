//! Partial moderator edits.
//!
//! Nullable columns use `Option<Option<T>>`: an absent key leaves the column
//! alone, an explicit `null` clears it.

use crate::domain::new_cat::check_coordinates;
use crate::domain::non_blank;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use shared_types::{Cat, NamingError, VotingStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatUpdate {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    pub photos: Option<Vec<String>>,
    pub primary_photo: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub breed: Option<Option<String>>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub age: Option<Option<String>>,
    pub is_stray: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub background_story: Option<Option<String>>,
    pub approved: Option<bool>,

    /// Accepted so a client can send back a full record; never applied.
    pub id: Option<IgnoredAny>,
    pub created_at: Option<IgnoredAny>,
    /// Must equal the current status when present.
    pub voting_status: Option<VotingStatus>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CatUpdate {
    /// Apply the edit to `cat` in place.
    ///
    /// A `voting_status` equal to the current one is tolerated (round-tripped
    /// records); any other value is rejected because status only moves
    /// through the naming workflow.
    pub fn apply(self, cat: &mut Cat) -> Result<(), NamingError> {
        if let Some(status) = self.voting_status {
            if status != cat.voting_status {
                return Err(NamingError::validation(
                    "voting_status can only be changed through the voting workflow",
                ));
            }
        }

        let mut next = cat.clone();

        if let Some(name) = self.name {
            next.name = non_blank(name.as_deref());
        }
        if let Some(photos) = self.photos {
            next.photos = photos;
        }
        if let Some(photo) = self.primary_photo {
            next.primary_photo = required("primary_photo", &photo)?;
        }
        if let Some(lat) = self.location_lat {
            next.location_lat = lat;
        }
        if let Some(lng) = self.location_lng {
            next.location_lng = lng;
        }
        check_coordinates(next.location_lat, next.location_lng)?;
        if let Some(location) = self.location_name {
            next.location_name = required("location_name", &location)?;
        }
        if let Some(breed) = self.breed {
            next.breed = non_blank(breed.as_deref());
        }
        if let Some(color) = self.color {
            next.color = required("color", &color)?;
        }
        if let Some(age) = self.age {
            next.age = non_blank(age.as_deref());
        }
        if let Some(is_stray) = self.is_stray {
            next.is_stray = is_stray;
        }
        if let Some(story) = self.background_story {
            next.background_story = non_blank(story.as_deref());
        }
        if let Some(approved) = self.approved {
            next.approved = approved;
        }

        if next.voting_status == VotingStatus::Complete && next.name.is_none() {
            return Err(NamingError::precondition(
                "A cat with a completed vote must keep its name; reset the vote first",
            ));
        }

        if next.voting_status == VotingStatus::Suggesting && (next.name.is_some() || !next.approved)
        {
            return Err(NamingError::precondition(
                "A cat taking name suggestions must stay approved and unnamed; reset the vote first",
            ));
        }

        *cat = next;
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String, NamingError> {
    non_blank(Some(value))
        .ok_or_else(|| NamingError::validation(format!("{} cannot be empty", field)))
}

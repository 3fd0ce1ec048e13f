//! Driving Ports (API - Inbound)

use crate::domain::cat_update::CatUpdate;
use crate::domain::new_cat::NewCat;
use crate::domain::sighting::SightingSubmission;
use shared_types::{Cat, CatId, CatWithSuggestions, NamingError};

/// Cat registry API.
///
/// Moderator operations assume the caller already passed the admin gate.
pub trait CatRegistryApi: Send + Sync {
    fn create_cat(&self, new_cat: NewCat) -> Result<Cat, NamingError>;

    fn get_cat(&self, id: CatId) -> Result<Cat, NamingError>;

    /// Every cat, newest first.
    fn list_cats(&self) -> Result<Vec<Cat>, NamingError>;

    fn update_cat(&self, id: CatId, update: CatUpdate) -> Result<Cat, NamingError>;

    /// Remove a cat with its suggestions and votes.
    fn delete_cat(&self, id: CatId) -> Result<(), NamingError>;

    /// Approved cats with an open naming round, newest first, each with its
    /// ranked suggestions.
    fn list_voting_cats(&self) -> Result<Vec<CatWithSuggestions>, NamingError>;

    /// Approved cats, newest first.
    fn list_gallery(&self) -> Result<Vec<Cat>, NamingError>;

    /// Record a public sighting as an unapproved cat and notify moderators.
    /// A notification failure never fails the submission.
    fn submit_sighting(&self, submission: SightingSubmission) -> Result<Cat, NamingError>;
}

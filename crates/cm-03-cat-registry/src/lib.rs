//! # Cat Registry (cm-03)
//!
//! Everything that creates, curates or lists cat records outside the naming
//! workflow.
//!
//! ## Operations
//!
//! | Operation | Caller | Notes |
//! |-----------|--------|-------|
//! | `create_cat` | moderator | required fields reported together |
//! | `get_cat` / `list_cats` | moderator | all cats, newest first |
//! | `update_cat` | moderator | partial; never touches id, created_at, voting_status |
//! | `delete_cat` | moderator | cascades suggestions and votes |
//! | `list_voting_cats` | public | approved cats in an open round, with ranked suggestions |
//! | `list_gallery` | public | approved cats, newest first |
//! | `submit_sighting` | public | unapproved cat, then a best-effort notification |
//!
//! Errors use the shared `NamingError` kinds.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - request shapes and their validation
//! - `ports/` - `CatRegistryApi` (inbound), `SubmissionNotifier` (outbound)
//! - `adapters/` - notifiers
//! - `service.rs` - `CatRegistryService`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::notifier::{LogNotifier, NoopNotifier};
pub use domain::cat_update::CatUpdate;
pub use domain::new_cat::NewCat;
pub use domain::sighting::{
    PhotoMeta, SightingSubmission, ALLOWED_PHOTO_TYPES, MAX_PHOTO_BYTES,
};
pub use ports::inbound::CatRegistryApi;
pub use ports::outbound::{NotifyError, SubmissionNotice, SubmissionNotifier};
pub use service::CatRegistryService;

//! # Shared Types Crate
//!
//! Record types and the error taxonomy used across the Meowncil crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Cat`, `NameSuggestion` and `Vote` are defined
//!   here and nowhere else.
//! - **Typed Identifiers**: every record id is its own newtype, so a
//!   `SuggestionId` can never be passed where a `CatId` is expected.
//! - **Closed Error Taxonomy**: every fallible naming operation returns one of
//!   the five [`NamingError`] kinds.

pub mod entities;
pub mod errors;
pub mod ids;

pub use entities::*;
pub use errors::*;
pub use ids::*;

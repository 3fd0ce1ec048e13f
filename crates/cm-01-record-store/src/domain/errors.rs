//! # Store Errors

use shared_types::NamingError;
use std::fmt;
use thiserror::Error;

/// The unique constraints enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueIndex {
    /// Primary key of any table.
    PrimaryKey,
    /// `name_suggestions(cat_id, suggested_name)`
    SuggestionName,
    /// `votes(cat_id, voter_identity)`
    VoterPerCat,
}

impl fmt::Display for UniqueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey => f.write_str("primary_key"),
            Self::SuggestionName => f.write_str("name_suggestions_cat_id_suggested_name_key"),
            Self::VoterPerCat => f.write_str("votes_cat_id_voter_identity_key"),
        }
    }
}

/// Errors raised by a [`crate::RecordStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {index}")]
    UniqueViolation { index: UniqueIndex },

    #[error("Foreign key violated: {table} references missing {id}")]
    ForeignKeyViolation { table: &'static str, id: String },

    #[error("Row not found in {table}: {id}")]
    MissingRow { table: &'static str, id: String },

    #[error("Data directory already locked: {path}")]
    Locked { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot corrupt: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

/// Anything the caller did not anticipate as a business outcome is a storage
/// failure. Services translate unique violations themselves before this
/// conversion is reached, because the user-facing message depends on context.
impl From<StoreError> for NamingError {
    fn from(err: StoreError) -> Self {
        NamingError::Storage(err.to_string())
    }
}

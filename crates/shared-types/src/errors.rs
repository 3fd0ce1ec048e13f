//! # Error Types
//!
//! The error taxonomy every naming operation reports through.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by suggestion intake, vote intake, the workflow engine and
/// the cat registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Malformed input: bad name, unknown action, missing field.
    #[error("{0}")]
    Validation(String),

    /// The referenced cat or suggestion does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The workflow state does not permit the operation.
    #[error("{0}")]
    PreconditionFailed(String),

    /// A uniqueness rule was violated (duplicate name, duplicate vote).
    #[error("{0}")]
    Conflict(String),

    /// The persistence layer failed. Never retried by the core.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl NamingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Serializable error kind, used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    PreconditionFailed,
    Conflict,
    Storage,
}

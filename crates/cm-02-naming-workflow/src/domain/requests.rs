//! # Request Parsing
//!
//! Wire shapes for the naming operations and their one-time conversion into
//! typed commands. Transports deserialize a `*Request`, call `validate()`,
//! and hand the command to the service; nothing downstream sees raw strings
//! except the suggested name, which the service parses itself.

use crate::domain::workflow::WorkflowAction;
use serde::{Deserialize, Serialize};
use shared_types::{CatId, NamingError, SuggestionId};
use std::str::FromStr;

/// Body of a moderator workflow request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowRequest {
    pub cat_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowCommand {
    pub cat_id: CatId,
    pub action: WorkflowAction,
}

impl WorkflowRequest {
    pub fn validate(&self) -> Result<WorkflowCommand, NamingError> {
        let (Some(cat_id), Some(action)) = (present(&self.cat_id), present(&self.action)) else {
            return Err(NamingError::validation("cat_id and action are required"));
        };
        Ok(WorkflowCommand {
            action: action.parse()?,
            cat_id: parse_id("cat_id", cat_id)?,
        })
    }
}

/// Body of a public suggestion request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestionRequest {
    pub cat_id: Option<String>,
    pub suggested_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCommand {
    pub cat_id: CatId,
    /// Untrimmed; validated by the suggestion intake.
    pub suggested_name: String,
}

impl SuggestionRequest {
    pub fn validate(&self) -> Result<SuggestionCommand, NamingError> {
        let (Some(cat_id), Some(name)) = (present(&self.cat_id), present(&self.suggested_name))
        else {
            return Err(NamingError::validation(
                "cat_id and suggested_name are required",
            ));
        };
        Ok(SuggestionCommand {
            cat_id: parse_id("cat_id", cat_id)?,
            suggested_name: name.to_string(),
        })
    }
}

/// Body of a public vote request. The voter's origin comes from the
/// transport, never from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoteRequest {
    pub suggestion_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteCommand {
    pub suggestion_id: SuggestionId,
}

impl VoteRequest {
    pub fn validate(&self) -> Result<VoteCommand, NamingError> {
        let Some(id) = present(&self.suggestion_id) else {
            return Err(NamingError::validation("suggestion_id is required"));
        };
        Ok(VoteCommand {
            suggestion_id: parse_id("suggestion_id", id)?,
        })
    }
}

/// Query string of the suggestion listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionsQuery {
    pub cat_id: Option<String>,
}

impl SuggestionsQuery {
    pub fn validate(&self) -> Result<CatId, NamingError> {
        let Some(cat_id) = present(&self.cat_id) else {
            return Err(NamingError::validation(
                "cat_id query parameter is required",
            ));
        };
        parse_id("cat_id", cat_id)
    }
}

// Empty strings count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Parse an id field, reporting a malformed value as a validation error.
pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, NamingError> {
    raw.parse()
        .map_err(|_| NamingError::validation(format!("{} is not a valid id", field)))
}

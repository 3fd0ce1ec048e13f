//! # Workflow Transitions
//!
//! The four moderator actions and the rules that gate them. These functions
//! only decide; the service applies their result inside a transaction.

use serde::{Deserialize, Serialize};
use shared_types::{Cat, NameSuggestion, NamingError, VotingStatus};
use std::fmt;
use std::str::FromStr;

/// Minimum suggestions before voting may open.
pub const MIN_SUGGESTIONS_FOR_VOTING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    StartSuggesting,
    StartVoting,
    Complete,
    Reset,
}

impl WorkflowAction {
    pub const ALL: [WorkflowAction; 4] = [
        WorkflowAction::StartSuggesting,
        WorkflowAction::StartVoting,
        WorkflowAction::Complete,
        WorkflowAction::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartSuggesting => "start_suggesting",
            Self::StartVoting => "start_voting",
            Self::Complete => "complete",
            Self::Reset => "reset",
        }
    }

    /// Status the cat holds after the action succeeds.
    pub fn target_status(&self) -> VotingStatus {
        match self {
            Self::StartSuggesting => VotingStatus::Suggesting,
            Self::StartVoting => VotingStatus::Voting,
            Self::Complete => VotingStatus::Complete,
            Self::Reset => VotingStatus::None,
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowAction {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.as_str()).collect();
                NamingError::validation(format!(
                    "Invalid action. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

// =============================================================================
// Preconditions
// =============================================================================

/// `start_suggesting` requires an approved, unnamed cat.
pub fn check_start_suggesting(cat: &Cat) -> Result<(), NamingError> {
    if !cat.approved {
        return Err(NamingError::precondition(
            "Cat must be approved before starting suggestions",
        ));
    }
    if cat.is_named() {
        return Err(NamingError::precondition("Cat already has a name"));
    }
    Ok(())
}

pub fn check_start_voting(suggestion_count: usize) -> Result<(), NamingError> {
    if suggestion_count < MIN_SUGGESTIONS_FOR_VOTING {
        return Err(NamingError::precondition(format!(
            "At least {} name suggestions are required before voting can start",
            MIN_SUGGESTIONS_FOR_VOTING
        )));
    }
    Ok(())
}

/// Pick the winning suggestion.
///
/// Highest `vote_count` wins. Ties go to the earliest `created_at`, then to
/// the smallest id. Ids are UUIDv7 so the last rule also favours the older
/// row when two suggestions share a timestamp.
pub fn select_winner(suggestions: &[NameSuggestion]) -> Result<&NameSuggestion, NamingError> {
    suggestions
        .iter()
        .min_by(|a, b| {
            b.vote_count
                .cmp(&a.vote_count)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        })
        .ok_or_else(|| NamingError::precondition("No suggestions found for this cat"))
}

/// Status an intake needs before it may write.
pub fn require_status(cat: &Cat, expected: VotingStatus) -> Result<(), NamingError> {
    if cat.voting_status == expected {
        return Ok(());
    }
    let message = match expected {
        VotingStatus::Suggesting => "This cat is not currently accepting name suggestions",
        VotingStatus::Voting => "Voting is not currently open for this cat",
        _ => "Cat is not in the required naming state",
    };
    Err(NamingError::precondition(message))
}

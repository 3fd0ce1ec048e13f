//! Driving Ports (API - Inbound)

use crate::domain::workflow::WorkflowAction;
use shared_types::{Cat, CatId, NameSuggestion, NamingError, SuggestionId};

/// Primary Naming API
///
/// This is the driving port for the naming subsystem. Moderators drive the
/// workflow; the public drives the two intakes.
///
/// Every call is synchronous and runs one store transaction. Async callers
/// should move calls onto a blocking pool.
pub trait NamingWorkflowApi: Send + Sync {
    /// Apply one moderator action to a cat and return the updated cat.
    ///
    /// # Errors
    /// * `NotFound` - no such cat
    /// * `PreconditionFailed` - the action's precondition does not hold
    fn apply_workflow_action(
        &self,
        cat_id: CatId,
        action: WorkflowAction,
    ) -> Result<Cat, NamingError>;

    /// Record a proposed name for a cat that is collecting suggestions.
    ///
    /// # Errors
    /// * `Validation` - the name fails the naming rules
    /// * `NotFound` - no such cat
    /// * `PreconditionFailed` - the cat is not in `suggesting`
    /// * `Conflict` - the cat already has this name suggested
    fn submit_suggestion(&self, cat_id: CatId, raw_name: &str)
        -> Result<NameSuggestion, NamingError>;

    /// Record a vote for a suggestion.
    ///
    /// `origin_candidates` are the requester's origin hints in priority
    /// order; they are hashed, never stored.
    ///
    /// # Errors
    /// * `NotFound` - no such suggestion or cat
    /// * `PreconditionFailed` - the cat is not in `voting`
    /// * `Conflict` - this voter already voted for this cat
    fn submit_vote(
        &self,
        suggestion_id: SuggestionId,
        origin_candidates: &[String],
    ) -> Result<(), NamingError>;

    /// Suggestions for a cat, most votes first. Unknown cats have none.
    fn list_suggestions(&self, cat_id: CatId) -> Result<Vec<NameSuggestion>, NamingError>;
}

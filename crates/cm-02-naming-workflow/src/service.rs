//! Naming Service - the workflow engine and both intakes
//!
//! Each public method opens one store transaction, reads what it needs,
//! checks the rules in `domain`, writes, and commits. A rule failure drops
//! the transaction, which rolls back anything already written.

use crate::adapters::clock::SystemClock;
use crate::domain::identity::derive_voter_identity;
use crate::domain::suggested_name::SuggestedName;
use crate::domain::workflow::{
    check_start_suggesting, check_start_voting, require_status, select_winner, WorkflowAction,
};
use crate::ports::inbound::NamingWorkflowApi;
use crate::ports::outbound::Clock;
use cm_01_record_store::{RecordStore, StoreError, StoreTransaction, UniqueIndex};
use shared_types::{
    Cat, CatId, NameSuggestion, NamingError, SuggestionId, Vote, VotingStatus,
};
use std::sync::Arc;
use tracing::{debug, info};

const DUPLICATE_SUGGESTION: &str = "This name has already been suggested for this cat";
const DUPLICATE_VOTE: &str = "You have already voted for this cat";

pub struct NamingService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl NamingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn transition(
        &self,
        cat_id: CatId,
        action: WorkflowAction,
    ) -> Result<(Cat, VotingStatus), NamingError> {
        let mut tx = self.store.begin()?;
        let mut cat = load_cat(&*tx, cat_id)?;
        let from = cat.voting_status;

        match action {
            WorkflowAction::StartSuggesting => check_start_suggesting(&cat)?,
            WorkflowAction::StartVoting => check_start_voting(tx.count_suggestions(cat_id)?)?,
            WorkflowAction::Complete => {
                let suggestions = tx.list_suggestions(cat_id)?;
                let winner = select_winner(&suggestions)?;
                cat.name = Some(winner.suggested_name.clone());
            }
            WorkflowAction::Reset => {
                // Votes first: suggestions cannot go while votes reference them.
                let votes = tx.delete_votes_for_cat(cat_id)?;
                let suggestions = tx.delete_suggestions_for_cat(cat_id)?;
                debug!(%cat_id, votes, suggestions, "cleared naming round");
            }
        }

        cat.voting_status = action.target_status();
        tx.update_cat(cat.clone())?;
        tx.commit()?;
        Ok((cat, from))
    }
}

impl NamingWorkflowApi for NamingService {
    fn apply_workflow_action(
        &self,
        cat_id: CatId,
        action: WorkflowAction,
    ) -> Result<Cat, NamingError> {
        match self.transition(cat_id, action) {
            Ok((cat, from)) => {
                info!(
                    %cat_id,
                    %action,
                    %from,
                    to = %cat.voting_status,
                    name = cat.name.as_deref().unwrap_or(""),
                    "naming workflow transition"
                );
                Ok(cat)
            }
            Err(e) => {
                debug!(%cat_id, %action, error = %e, "workflow action rejected");
                Err(e)
            }
        }
    }

    fn submit_suggestion(
        &self,
        cat_id: CatId,
        raw_name: &str,
    ) -> Result<NameSuggestion, NamingError> {
        let name = SuggestedName::parse(raw_name).inspect_err(|e| {
            debug!(%cat_id, error = %e, "suggestion rejected");
        })?;

        let mut tx = self.store.begin()?;
        let cat = load_cat(&*tx, cat_id)?;
        require_status(&cat, VotingStatus::Suggesting).inspect_err(|e| {
            debug!(%cat_id, status = %cat.voting_status, error = %e, "suggestion rejected");
        })?;

        let suggestion = NameSuggestion::new(cat_id, name.into_inner(), self.clock.now());
        tx.insert_suggestion(suggestion.clone())
            .map_err(|e| on_unique(e, UniqueIndex::SuggestionName, DUPLICATE_SUGGESTION))?;
        tx.commit()?;

        info!(
            %cat_id,
            suggestion_id = %suggestion.id,
            name = %suggestion.suggested_name,
            "name suggested"
        );
        Ok(suggestion)
    }

    fn submit_vote(
        &self,
        suggestion_id: SuggestionId,
        origin_candidates: &[String],
    ) -> Result<(), NamingError> {
        let voter = derive_voter_identity(origin_candidates);

        let mut tx = self.store.begin()?;
        let suggestion = tx
            .get_suggestion(suggestion_id)?
            .ok_or_else(|| NamingError::not_found("Suggestion", suggestion_id))?;
        let cat = load_cat(&*tx, suggestion.cat_id)?;
        require_status(&cat, VotingStatus::Voting).inspect_err(|e| {
            debug!(cat_id = %cat.id, status = %cat.voting_status, error = %e, "vote rejected");
        })?;

        tx.insert_vote(Vote::new(&suggestion, voter, self.clock.now()))
            .map_err(|e| on_unique(e, UniqueIndex::VoterPerCat, DUPLICATE_VOTE))?;
        let tally = tx.increment_vote_count(suggestion_id)?;
        tx.commit()?;

        info!(cat_id = %cat.id, %suggestion_id, tally, "vote recorded");
        Ok(())
    }

    fn list_suggestions(&self, cat_id: CatId) -> Result<Vec<NameSuggestion>, NamingError> {
        let tx = self.store.begin()?;
        Ok(tx.list_suggestions(cat_id)?)
    }
}

fn load_cat(tx: &dyn StoreTransaction, cat_id: CatId) -> Result<Cat, NamingError> {
    tx.get_cat(cat_id)?
        .ok_or_else(|| NamingError::not_found("Cat", cat_id))
}

/// Map a violation of `index` to a conflict; anything else is a storage fault.
fn on_unique(err: StoreError, index: UniqueIndex, message: &str) -> NamingError {
    match err {
        StoreError::UniqueViolation { index: hit } if hit == index => {
            debug!(%index, "unique constraint rejected write");
            NamingError::conflict(message)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cm_01_record_store::InMemoryRecordStore;

    fn service_with_cat(status: VotingStatus) -> (NamingService, CatId) {
        let store = Arc::new(InMemoryRecordStore::new());
        let cat = Cat {
            id: CatId::new(),
            name: None,
            photos: vec![],
            primary_photo: "/uploads/kitty.webp".into(),
            location_lat: 35.9,
            location_lng: 14.5,
            location_name: "Marsaxlokk".into(),
            breed: None,
            color: "calico".into(),
            age: None,
            is_stray: true,
            background_story: None,
            voting_status: status,
            approved: true,
            created_at: Utc::now(),
        };
        let id = cat.id;
        let mut tx = store.begin().unwrap();
        tx.insert_cat(cat).unwrap();
        tx.commit().unwrap();
        (NamingService::new(store), id)
    }

    #[test]
    fn test_unknown_cat_is_not_found() {
        let (svc, _) = service_with_cat(VotingStatus::None);
        for action in WorkflowAction::ALL {
            let err = svc.apply_workflow_action(CatId::new(), action).unwrap_err();
            assert!(matches!(err, NamingError::NotFound { entity: "Cat", .. }));
        }
    }

    #[test]
    fn test_suggestion_outside_round_rejected() {
        let (svc, cat_id) = service_with_cat(VotingStatus::Voting);
        assert_eq!(
            svc.submit_suggestion(cat_id, "Luna").unwrap_err(),
            NamingError::PreconditionFailed(
                "This cat is not currently accepting name suggestions".into()
            )
        );
    }

    #[test]
    fn test_invalid_name_checked_before_cat_lookup() {
        let (svc, _) = service_with_cat(VotingStatus::Suggesting);
        assert!(matches!(
            svc.submit_suggestion(CatId::new(), "R2-D2"),
            Err(NamingError::Validation(_))
        ));
    }

    #[test]
    fn test_vote_for_unknown_suggestion() {
        let (svc, _) = service_with_cat(VotingStatus::Voting);
        let err = svc
            .submit_vote(SuggestionId::new(), &["10.1.1.1".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            NamingError::NotFound {
                entity: "Suggestion",
                ..
            }
        ));
    }

    #[test]
    fn test_on_unique_passes_other_errors_through() {
        let err = on_unique(
            StoreError::UniqueViolation {
                index: UniqueIndex::PrimaryKey,
            },
            UniqueIndex::SuggestionName,
            DUPLICATE_SUGGESTION,
        );
        assert!(matches!(err, NamingError::Storage(_)));
    }
}

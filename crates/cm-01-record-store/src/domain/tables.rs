//! # Tables
//!
//! Row storage plus the two secondary unique indexes. Every mutation keeps the
//! indexes in step with the rows; constraint checks happen one layer up, in
//! the transaction, while the store lock is held.

use crate::domain::errors::{StoreError, UniqueIndex};
use serde::{Deserialize, Serialize};
use shared_types::{
    rank_suggestions, Cat, CatId, NameSuggestion, SuggestionId, Vote, VoteId, VoterIdentity,
};
use std::collections::{BTreeMap, HashMap};

/// In-memory image of the three tables.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    cats: BTreeMap<CatId, Cat>,
    suggestions: BTreeMap<SuggestionId, NameSuggestion>,
    votes: BTreeMap<VoteId, Vote>,
    suggestion_names: HashMap<(CatId, String), SuggestionId>,
    voters: HashMap<(CatId, VoterIdentity), VoteId>,
}

/// Inverse of one row mutation. Replaying a transaction's undo log in reverse
/// restores the tables to their state at `begin`.
#[derive(Debug)]
pub(crate) enum Undo {
    Cat {
        id: CatId,
        prev: Option<Cat>,
    },
    Suggestion {
        id: SuggestionId,
        prev: Option<NameSuggestion>,
    },
    Vote {
        id: VoteId,
        prev: Option<Vote>,
    },
}

/// Serializable form of [`Tables`]. Indexes are derived, never persisted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub cats: Vec<Cat>,
    pub name_suggestions: Vec<NameSuggestion>,
    pub votes: Vec<Vote>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn cat(&self, id: &CatId) -> Option<&Cat> {
        self.cats.get(id)
    }

    pub fn cats(&self) -> impl Iterator<Item = &Cat> {
        self.cats.values()
    }

    pub fn suggestion(&self, id: &SuggestionId) -> Option<&NameSuggestion> {
        self.suggestions.get(id)
    }

    pub fn suggestion_named(&self, cat_id: CatId, name: &str) -> Option<&NameSuggestion> {
        self.suggestion_names
            .get(&(cat_id, name.to_string()))
            .and_then(|id| self.suggestions.get(id))
    }

    /// Suggestions for one cat, ranked (see [`rank_suggestions`]).
    pub fn suggestions_for_cat(&self, cat_id: CatId) -> Vec<NameSuggestion> {
        let mut list: Vec<_> = self
            .suggestions
            .values()
            .filter(|s| s.cat_id == cat_id)
            .cloned()
            .collect();
        rank_suggestions(&mut list);
        list
    }

    pub fn vote(&self, id: &VoteId) -> Option<&Vote> {
        self.votes.get(id)
    }

    pub fn votes_for_cat(&self, cat_id: CatId) -> impl Iterator<Item = &Vote> {
        self.votes.values().filter(move |v| v.cat_id == cat_id)
    }

    pub fn vote_by_voter(&self, cat_id: CatId, voter: &VoterIdentity) -> Option<&Vote> {
        self.voters
            .get(&(cat_id, voter.clone()))
            .and_then(|id| self.votes.get(id))
    }

    pub fn cat_count(&self) -> usize {
        self.cats.len()
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    // -------------------------------------------------------------------------
    // Row mutations (index-maintaining, unchecked)
    // -------------------------------------------------------------------------

    pub(crate) fn put_cat(&mut self, cat: Cat) -> Option<Cat> {
        self.cats.insert(cat.id, cat)
    }

    pub(crate) fn remove_cat(&mut self, id: &CatId) -> Option<Cat> {
        self.cats.remove(id)
    }

    pub(crate) fn put_suggestion(&mut self, suggestion: NameSuggestion) -> Option<NameSuggestion> {
        let key = (suggestion.cat_id, suggestion.suggested_name.clone());
        let id = suggestion.id;
        let prev = self.suggestions.insert(id, suggestion);
        if let Some(old) = &prev {
            let old_key = (old.cat_id, old.suggested_name.clone());
            if old_key != key {
                self.suggestion_names.remove(&old_key);
            }
        }
        self.suggestion_names.insert(key, id);
        prev
    }

    pub(crate) fn remove_suggestion(&mut self, id: &SuggestionId) -> Option<NameSuggestion> {
        let removed = self.suggestions.remove(id)?;
        self.suggestion_names
            .remove(&(removed.cat_id, removed.suggested_name.clone()));
        Some(removed)
    }

    pub(crate) fn put_vote(&mut self, vote: Vote) -> Option<Vote> {
        let key = (vote.cat_id, vote.voter_identity.clone());
        let id = vote.id;
        let prev = self.votes.insert(id, vote);
        if let Some(old) = &prev {
            let old_key = (old.cat_id, old.voter_identity.clone());
            if old_key != key {
                self.voters.remove(&old_key);
            }
        }
        self.voters.insert(key, id);
        prev
    }

    pub(crate) fn remove_vote(&mut self, id: &VoteId) -> Option<Vote> {
        let removed = self.votes.remove(id)?;
        self.voters
            .remove(&(removed.cat_id, removed.voter_identity.clone()));
        Some(removed)
    }

    pub(crate) fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Cat { id, prev } => match prev {
                Some(cat) => {
                    self.put_cat(cat);
                }
                None => {
                    self.remove_cat(&id);
                }
            },
            Undo::Suggestion { id, prev } => match prev {
                Some(suggestion) => {
                    self.put_suggestion(suggestion);
                }
                None => {
                    self.remove_suggestion(&id);
                }
            },
            Undo::Vote { id, prev } => match prev {
                Some(vote) => {
                    self.put_vote(vote);
                }
                None => {
                    self.remove_vote(&id);
                }
            },
        }
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cats: self.cats.values().cloned().collect(),
            name_suggestions: self.suggestions.values().cloned().collect(),
            votes: self.votes.values().cloned().collect(),
        }
    }

    /// Rebuild tables and indexes from a snapshot, re-checking every
    /// constraint. A snapshot that violates one is reported as corrupt.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut tables = Tables::new();

        for cat in snapshot.cats {
            if tables.cats.contains_key(&cat.id) {
                return Err(corrupt(UniqueIndex::PrimaryKey, &cat.id));
            }
            tables.put_cat(cat);
        }

        for suggestion in snapshot.name_suggestions {
            if !tables.cats.contains_key(&suggestion.cat_id) {
                return Err(StoreError::Corrupt(format!(
                    "suggestion {} references missing cat {}",
                    suggestion.id, suggestion.cat_id
                )));
            }
            if tables.suggestions.contains_key(&suggestion.id) {
                return Err(corrupt(UniqueIndex::PrimaryKey, &suggestion.id));
            }
            if tables
                .suggestion_named(suggestion.cat_id, &suggestion.suggested_name)
                .is_some()
            {
                return Err(corrupt(UniqueIndex::SuggestionName, &suggestion.id));
            }
            tables.put_suggestion(suggestion);
        }

        for vote in snapshot.votes {
            match tables.suggestions.get(&vote.suggestion_id) {
                Some(s) if s.cat_id == vote.cat_id => {}
                _ => {
                    return Err(StoreError::Corrupt(format!(
                        "vote {} references missing suggestion {}",
                        vote.id, vote.suggestion_id
                    )))
                }
            }
            if tables.votes.contains_key(&vote.id) {
                return Err(corrupt(UniqueIndex::PrimaryKey, &vote.id));
            }
            if tables
                .vote_by_voter(vote.cat_id, &vote.voter_identity)
                .is_some()
            {
                return Err(corrupt(UniqueIndex::VoterPerCat, &vote.id));
            }
            tables.put_vote(vote);
        }

        Ok(tables)
    }
}

fn corrupt(index: UniqueIndex, id: &impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(format!("duplicate key in {} at row {}", index, id))
}

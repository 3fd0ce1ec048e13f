//! Lock-holding transaction shared by the memory and file stores.

use crate::domain::errors::{StoreError, UniqueIndex};
use crate::domain::tables::{Tables, Undo};
use crate::ports::store::StoreTransaction;
use parking_lot::MutexGuard;
use shared_types::{Cat, CatId, NameSuggestion, SuggestionId, Vote};

/// Called with the post-transaction tables before the lock is released.
/// An error aborts the commit and the transaction rolls back.
pub(crate) trait CommitSink: Send + Sync {
    fn persist(&self, tables: &Tables) -> Result<(), StoreError>;
}

pub(crate) struct TableTransaction<'a> {
    tables: MutexGuard<'a, Tables>,
    undo: Vec<Undo>,
    sink: Option<&'a dyn CommitSink>,
}

impl<'a> TableTransaction<'a> {
    pub(crate) fn new(tables: MutexGuard<'a, Tables>, sink: Option<&'a dyn CommitSink>) -> Self {
        Self {
            tables,
            undo: Vec::new(),
            sink,
        }
    }

    fn rollback(&mut self) {
        while let Some(entry) = self.undo.pop() {
            self.tables.revert(entry);
        }
    }
}

impl Drop for TableTransaction<'_> {
    fn drop(&mut self) {
        if !self.undo.is_empty() {
            tracing::debug!(changes = self.undo.len(), "rolling back uncommitted transaction");
            self.rollback();
        }
    }
}

impl StoreTransaction for TableTransaction<'_> {
    fn get_cat(&self, id: CatId) -> Result<Option<Cat>, StoreError> {
        Ok(self.tables.cat(&id).cloned())
    }

    fn list_cats(&self) -> Result<Vec<Cat>, StoreError> {
        let mut cats: Vec<Cat> = self.tables.cats().cloned().collect();
        cats.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(cats)
    }

    fn insert_cat(&mut self, cat: Cat) -> Result<(), StoreError> {
        if self.tables.cat(&cat.id).is_some() {
            return Err(StoreError::UniqueViolation {
                index: UniqueIndex::PrimaryKey,
            });
        }
        let id = cat.id;
        let prev = self.tables.put_cat(cat);
        self.undo.push(Undo::Cat { id, prev });
        Ok(())
    }

    fn update_cat(&mut self, cat: Cat) -> Result<(), StoreError> {
        if self.tables.cat(&cat.id).is_none() {
            return Err(StoreError::MissingRow {
                table: "cats",
                id: cat.id.to_string(),
            });
        }
        let id = cat.id;
        let prev = self.tables.put_cat(cat);
        self.undo.push(Undo::Cat { id, prev });
        Ok(())
    }

    fn delete_cat(&mut self, id: CatId) -> Result<bool, StoreError> {
        if self.tables.cat(&id).is_none() {
            return Ok(false);
        }
        self.delete_votes_for_cat(id)?;
        self.delete_suggestions_for_cat(id)?;
        let prev = self.tables.remove_cat(&id);
        self.undo.push(Undo::Cat { id, prev });
        Ok(true)
    }

    fn get_suggestion(&self, id: SuggestionId) -> Result<Option<NameSuggestion>, StoreError> {
        Ok(self.tables.suggestion(&id).cloned())
    }

    fn list_suggestions(&self, cat_id: CatId) -> Result<Vec<NameSuggestion>, StoreError> {
        Ok(self.tables.suggestions_for_cat(cat_id))
    }

    fn count_suggestions(&self, cat_id: CatId) -> Result<usize, StoreError> {
        Ok(self.tables.suggestions_for_cat(cat_id).len())
    }

    fn insert_suggestion(&mut self, suggestion: NameSuggestion) -> Result<(), StoreError> {
        if self.tables.cat(&suggestion.cat_id).is_none() {
            return Err(StoreError::ForeignKeyViolation {
                table: "name_suggestions",
                id: suggestion.cat_id.to_string(),
            });
        }
        if self.tables.suggestion(&suggestion.id).is_some() {
            return Err(StoreError::UniqueViolation {
                index: UniqueIndex::PrimaryKey,
            });
        }
        if self
            .tables
            .suggestion_named(suggestion.cat_id, &suggestion.suggested_name)
            .is_some()
        {
            return Err(StoreError::UniqueViolation {
                index: UniqueIndex::SuggestionName,
            });
        }
        let id = suggestion.id;
        let prev = self.tables.put_suggestion(suggestion);
        self.undo.push(Undo::Suggestion { id, prev });
        Ok(())
    }

    fn increment_vote_count(&mut self, id: SuggestionId) -> Result<u64, StoreError> {
        let mut suggestion = self
            .tables
            .suggestion(&id)
            .cloned()
            .ok_or_else(|| StoreError::MissingRow {
                table: "name_suggestions",
                id: id.to_string(),
            })?;
        suggestion.vote_count = suggestion.vote_count.saturating_add(1);
        let count = suggestion.vote_count;
        let prev = self.tables.put_suggestion(suggestion);
        self.undo.push(Undo::Suggestion { id, prev });
        Ok(count)
    }

    fn delete_suggestions_for_cat(&mut self, cat_id: CatId) -> Result<usize, StoreError> {
        if self.tables.votes_for_cat(cat_id).next().is_some() {
            return Err(StoreError::ForeignKeyViolation {
                table: "votes",
                id: cat_id.to_string(),
            });
        }
        let ids: Vec<SuggestionId> = self
            .tables
            .suggestions_for_cat(cat_id)
            .into_iter()
            .map(|s| s.id)
            .collect();
        for id in &ids {
            let prev = self.tables.remove_suggestion(id);
            self.undo.push(Undo::Suggestion { id: *id, prev });
        }
        Ok(ids.len())
    }

    fn insert_vote(&mut self, vote: Vote) -> Result<(), StoreError> {
        match self.tables.suggestion(&vote.suggestion_id) {
            Some(s) if s.cat_id == vote.cat_id => {}
            _ => {
                return Err(StoreError::ForeignKeyViolation {
                    table: "votes",
                    id: vote.suggestion_id.to_string(),
                })
            }
        }
        if self.tables.vote(&vote.id).is_some() {
            return Err(StoreError::UniqueViolation {
                index: UniqueIndex::PrimaryKey,
            });
        }
        if self.tables.vote_by_voter(vote.cat_id, &vote.voter_identity).is_some() {
            return Err(StoreError::UniqueViolation {
                index: UniqueIndex::VoterPerCat,
            });
        }
        let id = vote.id;
        let prev = self.tables.put_vote(vote);
        self.undo.push(Undo::Vote { id, prev });
        Ok(())
    }

    fn count_votes(&self, cat_id: CatId) -> Result<usize, StoreError> {
        Ok(self.tables.votes_for_cat(cat_id).count())
    }

    fn delete_votes_for_cat(&mut self, cat_id: CatId) -> Result<usize, StoreError> {
        let ids: Vec<_> = self.tables.votes_for_cat(cat_id).map(|v| v.id).collect();
        for id in &ids {
            let prev = self.tables.remove_vote(id);
            self.undo.push(Undo::Vote { id: *id, prev });
        }
        Ok(ids.len())
    }

    fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        if self.undo.is_empty() {
            return Ok(());
        }
        if let Some(sink) = self.sink {
            // On failure `self` drops with the undo log intact and rolls back.
            sink.persist(&self.tables)?;
        }
        self.undo.clear();
        Ok(())
    }
}

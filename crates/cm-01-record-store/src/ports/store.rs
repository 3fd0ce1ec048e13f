//! # Store Ports (Driven Ports)
//!
//! The contract a persistence backend must satisfy.
//!
//! Production: `FileRecordStore` (JSON snapshot, directory lock)
//! Testing: `InMemoryRecordStore`

use crate::domain::errors::StoreError;
use shared_types::{Cat, CatId, NameSuggestion, SuggestionId, Vote};

/// A handle to the persisted cats, suggestions and votes.
pub trait RecordStore: Send + Sync {
    /// Open a transaction.
    ///
    /// The returned handle holds the store's write lock until it is committed
    /// or dropped, so transactions are serializable. Never open a second
    /// transaction on the same store from the thread that holds one.
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, StoreError>;

    /// Short name of the backend, for logs.
    fn backend_name(&self) -> &'static str;
}

/// One unit of work against the store.
///
/// ## Atomicity
///
/// Either every mutation made through the handle becomes visible on
/// [`commit`](StoreTransaction::commit), or none does. Dropping the handle
/// without committing rolls back.
///
/// ## Constraints
///
/// - `insert_suggestion` enforces UNIQUE(cat_id, suggested_name)
/// - `insert_vote` enforces UNIQUE(cat_id, voter_identity)
/// - both enforce their foreign keys
/// - `delete_suggestions_for_cat` refuses while votes still reference them
pub trait StoreTransaction {
    // --- cats ---------------------------------------------------------------

    fn get_cat(&self, id: CatId) -> Result<Option<Cat>, StoreError>;

    /// All cats, newest first.
    fn list_cats(&self) -> Result<Vec<Cat>, StoreError>;

    fn insert_cat(&mut self, cat: Cat) -> Result<(), StoreError>;

    /// Replace an existing cat row.
    fn update_cat(&mut self, cat: Cat) -> Result<(), StoreError>;

    /// Delete a cat and cascade its votes and suggestions. Returns `false`
    /// when the cat did not exist.
    fn delete_cat(&mut self, id: CatId) -> Result<bool, StoreError>;

    // --- name_suggestions ---------------------------------------------------

    fn get_suggestion(&self, id: SuggestionId) -> Result<Option<NameSuggestion>, StoreError>;

    /// Suggestions for a cat, most votes first, then oldest, then smallest id.
    fn list_suggestions(&self, cat_id: CatId) -> Result<Vec<NameSuggestion>, StoreError>;

    fn count_suggestions(&self, cat_id: CatId) -> Result<usize, StoreError>;

    fn insert_suggestion(&mut self, suggestion: NameSuggestion) -> Result<(), StoreError>;

    /// Add one to a suggestion's tally and return the new value.
    fn increment_vote_count(&mut self, id: SuggestionId) -> Result<u64, StoreError>;

    fn delete_suggestions_for_cat(&mut self, cat_id: CatId) -> Result<usize, StoreError>;

    // --- votes --------------------------------------------------------------

    fn insert_vote(&mut self, vote: Vote) -> Result<(), StoreError>;

    fn count_votes(&self, cat_id: CatId) -> Result<usize, StoreError>;

    fn delete_votes_for_cat(&mut self, cat_id: CatId) -> Result<usize, StoreError>;

    // --- lifecycle ----------------------------------------------------------

    /// Make every mutation durable and visible.
    fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

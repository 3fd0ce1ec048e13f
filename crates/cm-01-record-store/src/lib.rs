//! # Record Store (cm-01)
//!
//! The persistence layer for the naming feature. It owns three tables:
//!
//! | Table | Key | Unique index |
//! |-------|-----|--------------|
//! | `cats` | `CatId` | - |
//! | `name_suggestions` | `SuggestionId` | `(cat_id, suggested_name)` |
//! | `votes` | `VoteId` | `(cat_id, voter_identity)` |
//!
//! ## Transactions
//!
//! All access goes through [`RecordStore::begin`], which hands out a
//! [`StoreTransaction`] holding the store's write lock. Unique indexes are
//! checked inside that critical section, so two racing inserts for the same
//! key can never both succeed. Mutations are recorded in an undo log; a
//! transaction that is dropped without [`StoreTransaction::commit`] rolls
//! every change back.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Tables, indexes, undo log and store errors
//! - `ports/` - The `RecordStore` / `StoreTransaction` traits
//! - `adapters/` - In-memory store and JSON snapshot file store
//!
//! ## Usage
//!
//! ```ignore
//! use cm_01_record_store::{InMemoryRecordStore, RecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! let mut tx = store.begin()?;
//! tx.insert_cat(cat)?;
//! tx.commit()?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::memory::InMemoryRecordStore;
#[cfg(feature = "file")]
pub use adapters::file::{FileRecordStore, FileStoreConfig};
pub use domain::errors::{StoreError, UniqueIndex};
pub use domain::tables::Tables;
pub use ports::store::{RecordStore, StoreTransaction};

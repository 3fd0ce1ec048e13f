//! # Adapters
//!
//! - `memory` - process-local store, used by tests and the `memory` backend
//! - `file` - JSON snapshot store guarded by an exclusive directory lock

#[cfg(feature = "file")]
pub mod file;
pub mod memory;
pub(crate) mod transaction;

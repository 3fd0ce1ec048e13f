//! # Domain Layer
//!
//! Pure naming rules. No I/O; the service feeds these functions rows read
//! from the record store.

pub mod identity;
pub mod requests;
pub mod suggested_name;
pub mod workflow;

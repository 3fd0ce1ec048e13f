//! # Domain Layer
//!
//! Table layout, index maintenance and the undo log. No I/O.

pub mod errors;
pub mod tables;

//! # Meowncil Test Suite
//!
//! Unified test crate for flows that cross crate boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks (identity, names, votes)
//! └── src/
//!     ├── fixtures.rs   # full in-process stack: store, services, router
//!     └── integration/  # end-to-end naming rounds and moderation flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cm-tests
//!
//! # By category
//! cargo test -p cm-tests integration::naming_round
//! cargo test -p cm-tests integration::moderation
//!
//! # Benchmarks
//! cargo bench -p cm-tests
//! ```

pub mod fixtures;
pub mod integration;

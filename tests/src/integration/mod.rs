//! # Integration Flows
//!
//! End-to-end scenarios that run through several crates at once:
//!
//! - `naming_round`: sighting → approval → suggestions → votes → winner
//! - `moderation`: registry edits interleaved with an open round

pub mod moderation;
pub mod naming_round;

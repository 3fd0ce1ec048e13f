//! # Ports
//!
//! The storage contract consumed by the naming workflow and the cat registry.

pub mod store;

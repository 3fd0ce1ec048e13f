//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The record store port lives in `cm-01-record-store`; this crate adds only
//! a time source so tests can pin `created_at`.

use shared_types::Timestamp;

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

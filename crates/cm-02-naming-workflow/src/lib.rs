//! # Naming Workflow (cm-02)
//!
//! The per-cat naming lifecycle and the two public intakes that feed it.
//!
//! ```text
//!                 ┌──────────── reset ◄──────────── (any state) ────────┐
//!                 ▼                                                      │
//!              [none] ──start_suggesting──► [suggesting] ──start_voting──► [voting] ──complete──► [complete]
//!                                               ▲                           ▲
//!                               Suggestion Intake                   Vote Intake
//! ```
//!
//! ## Rules
//!
//! | Operation | Requires | Rejects with |
//! |-----------|----------|--------------|
//! | `start_suggesting` | approved, unnamed | `PreconditionFailed` |
//! | `start_voting` | ≥ 2 suggestions | `PreconditionFailed` |
//! | `complete` | ≥ 1 suggestion | `PreconditionFailed` |
//! | `reset` | cat exists | `NotFound` |
//! | suggestion | status `suggesting`, valid name, unique per cat | `Validation` / `PreconditionFailed` / `Conflict` |
//! | vote | status `voting`, one per voter per cat | `PreconditionFailed` / `Conflict` |
//!
//! Each operation runs in exactly one record-store transaction, so checks and
//! writes land together or not at all.
//!
//! ## Voter Identity
//!
//! Votes are deduplicated by a SHA-256 of the requester's origin. Requests
//! with no discernible origin all hash the sentinel `"unknown"` and therefore
//! share one identity: only the first of them can vote for a given cat.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - name validation, identity hashing, transitions, request parsing
//! - `ports/` - `NamingWorkflowApi` (inbound), `Clock` (outbound)
//! - `adapters/` - system clock and a fixed clock for tests
//! - `service.rs` - `NamingService`, the API implementation

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::clock::{FixedClock, SystemClock};
pub use domain::identity::{derive_voter_identity, UNKNOWN_ORIGIN};
pub use domain::requests::{
    parse_id, SuggestionCommand, SuggestionRequest, SuggestionsQuery, VoteCommand, VoteRequest,
    WorkflowCommand, WorkflowRequest,
};
pub use domain::suggested_name::{SuggestedName, MAX_NAME_LEN};
pub use domain::workflow::{select_winner, WorkflowAction};
pub use ports::inbound::NamingWorkflowApi;
pub use ports::outbound::Clock;
pub use service::NamingService;

//! # API Gateway (cm-04)
//!
//! HTTP interface for the naming workflow and the cat registry.
//!
//! ```text
//!   client ──► TraceLayer ──► body limit ──► router
//!                                              │
//!               ┌──────────────────────────────┼───────────────────────────┐
//!               ▼                              ▼                           ▼
//!        public routes                  admin routes (gate)            /health
//!   suggestions, votes, gallery,     workflow actions, cat CRUD
//!   voting cats, sightings
//!               │                              │
//!               └─────────► spawn_blocking ◄───┘
//!                                │
//!                   NamingService / CatRegistryService
//! ```
//!
//! ## Errors
//!
//! Every failure is a JSON body `{"error": <message>, "kind": <kind>}`.
//!
//! | Kind | Status |
//! |------|--------|
//! | `validation` | 400 |
//! | `precondition_failed` | 400 |
//! | `unauthorized` | 401 |
//! | `not_found` | 404 |
//! | `conflict` | 409 |
//! | `storage` / `internal` | 500 |
//!
//! ## Voter Origin
//!
//! Vote requests are attributed to the first entry of `X-Forwarded-For`,
//! then `X-Real-IP`, then the peer address when the server was started with
//! connect info. Deploy behind a proxy that overwrites these headers.

pub mod domain;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;

pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, GatewayError};
pub use middleware::auth::{constant_time_compare, AdminGate, ApiKeyGate, DenyAllGate};
pub use middleware::origin::origin_candidates;
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;

//! # Service Container
//!
//! Holds the configured store and the service instances built on it, with
//! the wiring done once at startup.
//!
//! ## Dependency Order
//!
//! - Level 0: record store (memory or file)
//! - Level 1: naming workflow, cat registry (share the store)
//! - Level 2: admin gate + HTTP gateway state

pub mod config;
pub mod services;

pub use config::{
    AdminConfig, ConfigError, NodeConfig, NotificationConfig, StorageBackend, StorageConfig,
    CONFIG_PATH_ENV,
};
pub use services::ServiceContainer;

//! # Node Configuration
//!
//! Unified configuration for the gateway, the record store, the admin gate
//! and submission notifications.
//!
//! ## Load Order
//!
//! 1. Built-in defaults
//! 2. JSON file named by `CM_CONFIG` (optional, missing keys keep defaults)
//! 3. `CM_*` environment overrides
//!
//! ## Security Requirements
//!
//! - `admin.api_key` MUST be set in production; without it every admin
//!   route answers 401

use cm_04_api_gateway::domain::config::ConfigError as HttpConfigError;
use cm_04_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "CM_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP gateway.
    pub http: GatewayConfig,
    /// Record store backend.
    pub storage: StorageConfig,
    /// Admin gate.
    pub admin: AdminConfig,
    /// Sighting notifications.
    pub notifications: NotificationConfig,
}

/// Which record store to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::File => write!(f, "file"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for `records.json` (file backend only).
    pub data_dir: PathBuf,
    /// fsync every snapshot before the rename.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
            sync_writes: true,
        }
    }
}

/// Admin gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared moderator key. MUST be set in production.
    pub api_key: Option<String>,
}

/// Where new sightings are announced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub admin_email: Option<String>,
    /// Public base URL, used to build the review link.
    pub site_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            admin_email: None,
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unknown storage backend '{0}' (expected memory or file)")]
    UnknownBackend(String),

    #[error(transparent)]
    Http(#[from] HttpConfigError),

    #[error("admin API key is not set. Set CM_ADMIN_API_KEY or admin.api_key in the config file.")]
    MissingAdminKey,
}

impl NodeConfig {
    /// Defaults, then `CM_CONFIG`, then `CM_*` overrides from the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let config = Self::from_file(Path::new(&path))?;
                info!(path = %path, "Loaded configuration file");
                config
            }
            _ => Self::default(),
        };
        Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Read a JSON config file. Absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CM_*` overrides looked up through `lookup`.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        override_parsed(&lookup, "CM_HTTP_HOST", &mut self.http.host);
        override_parsed(&lookup, "CM_HTTP_PORT", &mut self.http.port);
        override_parsed(&lookup, "CM_STORAGE_BACKEND", &mut self.storage.backend);

        if let Some(dir) = non_empty(&lookup, "CM_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = non_empty(&lookup, "CM_ADMIN_API_KEY") {
            self.admin.api_key = Some(key);
        }
        if let Some(email) = non_empty(&lookup, "CM_ADMIN_EMAIL") {
            self.notifications.admin_email = Some(email);
        }
        if let Some(url) = non_empty(&lookup, "CM_SITE_URL") {
            self.notifications.site_url = url;
        }
        self
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the HTTP section is invalid
    /// - the admin API key is missing or blank
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.http.validate()?;
        match self.admin.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::MissingAdminKey),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn override_parsed<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = non_empty(lookup, key) else {
        return;
    };
    match raw.parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "Ignoring unparseable override"),
    }
}

//! # Meowncil Node Runtime
//!
//! The main entry point for the Cats of Malta naming backend.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `CM_CONFIG` file, `CM_*` environment)
//! 2. Warn if the admin key is missing (admin routes stay locked)
//! 3. Open the record store and build the services
//! 4. Bind the HTTP gateway
//! 5. Serve until Ctrl+C, then drain in-flight requests
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and service wiring

pub mod container;

pub use container::{ConfigError, NodeConfig, ServiceContainer, StorageBackend};

use anyhow::{Context, Result};
use cm_04_api_gateway::ApiGatewayService;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// The node runtime: services plus the gateway that exposes them.
pub struct NodeRuntime {
    container: ServiceContainer,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Create a new node runtime with configuration.
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating Meowncil node runtime");
        let http = config.http.clone();
        let container = ServiceContainer::new(config).context("Failed to open record store")?;
        let gateway = ApiGatewayService::new(http, container.app_state())
            .context("Invalid HTTP configuration")?;
        Ok(Self { container, gateway })
    }

    /// Get a reference to the service container.
    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Serve on the configured address until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.log_banner();
        self.gateway
            .serve(shutdown)
            .await
            .context("HTTP gateway failed")
    }

    /// Serve on an already bound listener (tests, socket activation).
    pub async fn run_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.log_banner();
        self.gateway
            .serve_on(listener, shutdown)
            .await
            .context("HTTP gateway failed")
    }

    fn log_banner(&self) {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Meowncil Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("HTTP: {}", config.http.http_addr());
        info!("Storage: {}", config.storage.backend);
        if config.storage.backend == StorageBackend::File {
            info!("Data Dir: {:?}", config.storage.data_dir);
        }
    }
}

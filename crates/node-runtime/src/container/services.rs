//! Service construction.

use crate::container::config::{NodeConfig, StorageBackend};
use cm_01_record_store::{
    FileRecordStore, FileStoreConfig, InMemoryRecordStore, RecordStore, StoreError,
};
use cm_02_naming_workflow::NamingService;
use cm_03_cat_registry::{CatRegistryService, LogNotifier};
use cm_04_api_gateway::{AdminGate, ApiKeyGate, AppState, DenyAllGate};
use std::sync::Arc;
use tracing::{info, warn};

/// All services of a running node.
pub struct ServiceContainer {
    pub config: NodeConfig,
    pub store: Arc<dyn RecordStore>,
    pub naming: Arc<NamingService>,
    pub registry: Arc<CatRegistryService>,
    pub gate: Arc<dyn AdminGate>,
}

impl ServiceContainer {
    /// Open the store and build every service on top of it.
    pub fn new(config: NodeConfig) -> Result<Self, StoreError> {
        let store = open_store(&config)?;
        info!(backend = store.backend_name(), "Record store ready");

        let notifier = Arc::new(LogNotifier::new(
            config.notifications.admin_email.clone(),
            config.notifications.site_url.clone(),
        ));
        let naming = Arc::new(NamingService::new(Arc::clone(&store)));
        let registry = Arc::new(CatRegistryService::new(Arc::clone(&store), notifier));

        let gate: Arc<dyn AdminGate> = match config.admin.api_key.clone().and_then(ApiKeyGate::new) {
            Some(gate) => Arc::new(gate),
            None => {
                warn!("No admin API key configured, admin routes are locked");
                Arc::new(DenyAllGate)
            }
        };

        Ok(Self {
            config,
            store,
            naming,
            registry,
            gate,
        })
    }

    /// Handler state for the HTTP gateway.
    pub fn app_state(&self) -> AppState {
        AppState {
            naming: self.naming.clone(),
            registry: self.registry.clone(),
            gate: Arc::clone(&self.gate),
        }
    }
}

fn open_store(config: &NodeConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage, nothing survives a restart");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
        StorageBackend::File => {
            let store = FileRecordStore::open(FileStoreConfig {
                data_dir: config.storage.data_dir.clone(),
                sync_writes: config.storage.sync_writes,
            })?;
            Ok(Arc::new(store))
        }
    }
}

// src/application/state.rs

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::VaultConfig;
use crate::domain::ViewState;
use crate::events::{create_event_bus, EventBus};
use crate::repositories::{SqliteVaultStore, VaultStore};
use crate::services::VaultService;

/// Application state shared by every command.
/// View state lives here instead of in globals; commands change it through
/// its methods only.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub vault_store: Arc<SqliteVaultStore>,
    pub vault_service: Arc<VaultService>,
    pub view: RwLock<ViewState>,
}

impl AppState {
    /// Wire bus, store and service. The store opens lazily.
    pub fn new(config: VaultConfig) -> Self {
        Self::with_store(Arc::new(SqliteVaultStore::new(config)))
    }

    pub fn with_store(vault_store: Arc<SqliteVaultStore>) -> Self {
        let event_bus = Arc::new(create_event_bus());
        let store: Arc<dyn VaultStore> = vault_store.clone();
        let vault_service = Arc::new(VaultService::new(store, event_bus.clone()));

        Self {
            event_bus,
            vault_store,
            vault_service,
            view: RwLock::new(ViewState::new()),
        }
    }
}

//! Application State
//!
//! Everything the HTTP handlers share: the shopper's [`ShopState`], the
//! catalog client and the queue the UI polls for notifications.

use crate::catalog::CatalogClient;
use crate::config::ShopConfig;
use crate::error::{ApiError, StorageError};
use crate::shop::notify::{Fanout, NotificationQueue, TracingNotifier};
use crate::shop::{ShopState, ShopStorage};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// The single shopper's cart and wishlist. Handlers hold the lock only
    /// for the synchronous shop operation, never across an await.
    shop: Mutex<ShopState>,

    pub catalog: CatalogClient,

    /// Notifications waiting to be picked up by the UI.
    pub notifications: Arc<NotificationQueue>,
}

impl AppState {
    /// Builds the state described by `config`: a file store when a data
    /// directory is configured, otherwise an in-memory store.
    pub fn from_config(config: &ShopConfig) -> Result<Self, StorageError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => {
                tracing::warn!("no data directory configured, cart and wishlist are kept in memory");
                Arc::new(MemoryStore::new())
            }
        };
        let catalog = CatalogClient::new(config.api_url.clone(), config.http_timeout);
        Ok(Self::new(store, catalog))
    }

    pub fn new(store: Arc<dyn KeyValueStore>, catalog: CatalogClient) -> Self {
        let notifications = Arc::new(NotificationQueue::default());
        let notifier = Fanout::new()
            .with(Arc::new(TracingNotifier))
            .with(notifications.clone());
        let shop = ShopState::new(ShopStorage::new(store), Arc::new(notifier));

        Self {
            shop: Mutex::new(shop),
            catalog,
            notifications,
        }
    }

    /// Locks the shop state for one operation.
    pub fn shop(&self) -> Result<MutexGuard<'_, ShopState>, ApiError> {
        self.shop.lock().map_err(|_| ApiError::StatePoisoned)
    }
}

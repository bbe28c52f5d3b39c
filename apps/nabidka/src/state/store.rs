//! # Store State
//!
//! Shares the `EntityStore` between commands.
//!
//! ## Thread Safety
//! Reads take a shared lock and clone out `Arc` snapshots, so a listing
//! never blocks on a concurrent save for longer than the swap. Writes take
//! the exclusive lock for the whole save-and-persist step, which keeps
//! "replace the collection, then write it" in order.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use nabidka_store::EntityStore;

/// Shared handle to the entity store.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<RwLock<EntityStore>>,
}

impl StoreState {
    pub fn new(store: EntityStore) -> Self {
        StoreState {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, EntityStore> {
        self.store.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, EntityStore> {
        self.store.write().await
    }
}

//! # Address Book Commands

use std::sync::Arc;

use tracing::info;

use nabidka_core::validation::validate_client_address;
use nabidka_core::{ClientAddress, EntityId, Persisted, Record};

use crate::error::ApiResult;
use crate::state::StoreState;

pub async fn list_addresses(store: &StoreState) -> Arc<Vec<Persisted<ClientAddress>>> {
    store.read().await.addresses()
}

/// Validates and saves an address-book entry.
pub async fn save_address(store: &StoreState, record: Record<ClientAddress>) -> ApiResult<EntityId> {
    validate_client_address(record.fields())?;
    let id = store.write().await.save(record).await?;
    info!(id = %id, "Client address saved");
    Ok(id)
}

pub async fn delete_address(store: &StoreState, id: &EntityId) -> ApiResult<bool> {
    Ok(store.write().await.delete::<ClientAddress>(id).await?)
}

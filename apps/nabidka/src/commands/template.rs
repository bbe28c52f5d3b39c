//! # Item Template Commands

use std::sync::Arc;

use tracing::info;

use nabidka_core::validation::validate_item_template;
use nabidka_core::{EntityId, Persisted, QuoteItemTemplate, Record};

use crate::error::ApiResult;
use crate::state::StoreState;

pub async fn list_templates(store: &StoreState) -> Arc<Vec<Persisted<QuoteItemTemplate>>> {
    store.read().await.templates()
}

pub async fn save_template(
    store: &StoreState,
    record: Record<QuoteItemTemplate>,
) -> ApiResult<EntityId> {
    validate_item_template(record.fields())?;
    let id = store.write().await.save(record).await?;
    info!(id = %id, "Item template saved");
    Ok(id)
}

pub async fn delete_template(store: &StoreState, id: &EntityId) -> ApiResult<bool> {
    Ok(store.write().await.delete::<QuoteItemTemplate>(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use nabidka_store::{EntityStore, MemorySlots};

    #[tokio::test]
    async fn test_template_validation() {
        let store = StoreState::new(EntityStore::init(Arc::new(MemorySlots::new())).await);

        let err = save_template(
            &store,
            Record::Draft(QuoteItemTemplate {
                description: "Hosting".into(),
                unit_price: f64::NAN,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let id = save_template(
            &store,
            Record::Draft(QuoteItemTemplate {
                description: "Hosting".into(),
                unit_price: 0.0,
            }),
        )
        .await
        .unwrap();
        assert_eq!(list_templates(&store).await[0].id, id);
        assert!(delete_template(&store, &id).await.unwrap());
    }
}

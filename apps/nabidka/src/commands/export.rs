//! # Export Commands
//!
//! ```text
//! export_quote(id)
//!   │
//!   ├── store lookup ── missing ──► NOT_FOUND
//!   ├── pipeline.export_quote ── fail ──► EXPORT_ERROR (distinct message)
//!   └── artifact.save_to(dir) ──► path of Nabidka-<number>.pdf
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use nabidka_core::{EntityId, Quote};
use nabidka_export::ExportPipeline;

use crate::error::{ApiError, ApiResult};
use crate::state::StoreState;

/// Exports a stored quote as PDF into `output_dir`.
pub async fn export_quote(
    store: &StoreState,
    pipeline: &ExportPipeline,
    id: &EntityId,
    output_dir: &Path,
) -> ApiResult<PathBuf> {
    // The read guard is released before the pipeline awaits.
    let quote = store
        .read()
        .await
        .get::<Quote>(id)
        .ok_or_else(|| ApiError::not_found("Quote", id.as_str()))?;

    let artifact = pipeline.export_quote(&quote.fields).await?;
    let path = artifact.save_to(output_dir).await?;
    info!(id = %id, path = %path.display(), "Quote exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use nabidka_core::Record;
    use nabidka_store::{EntityStore, MemorySlots};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let store = StoreState::new(EntityStore::init(Arc::new(MemorySlots::new())).await);
        let id = store
            .write()
            .await
            .save(Record::Draft(Quote {
                quote_number: "0005".into(),
                ..Quote::default()
            }))
            .await
            .unwrap();

        let pipeline = ExportPipeline::new().with_settle_delay(Duration::ZERO);
        let path = export_quote(&store, &pipeline, &id, dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("Nabidka-0005.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_failures_map_to_codes() {
        let dir = tempfile::tempdir().unwrap();
        let store = StoreState::new(EntityStore::init(Arc::new(MemorySlots::new())).await);
        let pipeline = ExportPipeline::new().with_converter(None);

        let err = export_quote(&store, &pipeline, &EntityId::from("nope"), dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let id = store
            .write()
            .await
            .save(Record::Draft(Quote::default()))
            .await
            .unwrap();
        let err = export_quote(&store, &pipeline, &id, dir.path()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert_eq!(
            err.message,
            "Chyba při generování PDF. Knihovna pro generování není načtena."
        );
    }
}

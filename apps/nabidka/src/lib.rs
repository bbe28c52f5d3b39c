//! # Nabídka Application Library
//!
//! Wires configuration, logging, the entity store, the export pipeline and
//! the AI suggester together. The CLI in `main.rs` is a thin front end over
//! this library.
//!
//! ## Module Organization
//! ```text
//! nabidka_app/
//! ├── lib.rs          ◄─── You are here (startup, App bundle)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + env overrides)
//! │   ├── store.rs    ◄─── Shared EntityStore handle
//! │   └── session.rs  ◄─── Navigation: view + selected quote
//! ├── commands/
//! │   ├── quote.rs    ◄─── Listing, numbering, save/delete
//! │   ├── address.rs  ◄─── Address book
//! │   ├── template.rs ◄─── Item templates
//! │   ├── export.rs   ◄─── PDF export
//! │   └── assist.rs   ◄─── AI suggestions
//! └── error.rs        ◄─── ApiError for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use nabidka_assist::{GeminiSuggester, Suggester};
use nabidka_export::ExportPipeline;
use nabidka_store::{DbConfig, EntityStore};

use error::{ApiError, ApiResult};
use state::{AppConfig, StoreState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,nabidka=debug,sqlx=warn";

/// Everything a command might need, built once at startup.
#[derive(Clone)]
pub struct App {
    config: AppConfig,
    store: StoreState,
    export: ExportPipeline,
    assist: Arc<dyn Suggester>,
}

impl App {
    /// Opens the database named by `config` and builds the services.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Resolve database path, create its directory
    /// 2. Open SQLite, run migrations, load collections
    /// 3. Build export pipeline with the configured export timings
    /// 4. Build AI suggester (unconfigured key is fine)
    /// ```
    pub async fn open(config: AppConfig) -> ApiResult<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::internal(format!("Cannot create data directory {}: {}", parent.display(), e))
            })?;
        }
        info!(?db_path, "Database path determined");

        let store = EntityStore::open(DbConfig::new(db_path)).await?;
        let suggester = GeminiSuggester::new(config.assist_config())
            .map_err(|e| ApiError::internal(e.to_string()))?;

        Ok(Self::from_parts(config, store, Arc::new(suggester)))
    }

    /// Assembles an app from already-built parts.
    pub fn from_parts(config: AppConfig, store: EntityStore, assist: Arc<dyn Suggester>) -> Self {
        let export = ExportPipeline::new()
            .with_settle_delay(config.settle_delay())
            .with_render_timeout(config.render_timeout());
        App {
            config,
            store: StoreState::new(store),
            export,
            assist,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn export(&self) -> &ExportPipeline {
        &self.export
    }

    pub fn assist(&self) -> &dyn Suggester {
        self.assist.as_ref()
    }
}

/// Installs the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=nabidka_export=trace` - One crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

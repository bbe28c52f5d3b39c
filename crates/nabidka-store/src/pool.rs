//! # SQLite Connection
//!
//! Opens the database file that backs the slot table.
//!
//! ```text
//! DbConfig::new(path)            DbConfig::in_memory()
//!        │                              │
//!        └──────────────┬───────────────┘
//!                       ▼
//!            Database::new(config)
//!              ├── open / create the file (WAL, NORMAL sync)
//!              ├── apply embedded migrations
//!              └── db.slots() ──► SlotRepository
//! ```
//!
//! One user touches three slots, so the pool stays small. An in-memory
//! database lives only as long as its single connection, which therefore
//! never idles out.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::slot::SlotRepository;

/// Connections for a file-backed database.
const FILE_POOL_SIZE: u32 = 2;

/// How long a slot read or write waits for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the slot table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    File(PathBuf),
    Memory,
}

impl DbConfig {
    /// A database file, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig::File(path.into())
    }

    /// A private in-memory database, gone when the handle is dropped.
    pub fn in_memory() -> Self {
        DbConfig::Memory
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        match self {
            DbConfig::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            DbConfig::Memory => SqliteConnectOptions::new().in_memory(true),
        }
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
        match self {
            DbConfig::File(_) => options.max_connections(FILE_POOL_SIZE),
            DbConfig::Memory => options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>),
        }
    }
}

/// An open, migrated database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database and brings its schema up to date.
    pub async fn new(config: DbConfig) -> StoreResult<Self> {
        info!(?config, "Opening slot database");

        let pool = config
            .pool_options()
            .connect_with(config.connect_options())
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;
        Ok(Database { pool })
    }

    /// Slot storage over this database.
    pub fn slots(&self) -> SlotRepository {
        SlotRepository::new(self.pool.clone())
    }
}

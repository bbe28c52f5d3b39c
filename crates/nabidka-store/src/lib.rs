//! # nabidka-store: Entity Store for Nabídka
//!
//! This crate owns every persisted entity: quotes, client addresses and
//! line-item templates. Each collection lives in memory as an immutable
//! snapshot and is written as a whole to a named slot after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nabídka Data Flow                                │
//! │                                                                         │
//! │  Command (save_quote)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  nabidka-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  EntityStore  │    │  SlotStorage  │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │───►│  SlotRepo     │    │  (embedded)  │  │   │
//! │  │   │  save/delete  │    │  MemorySlots  │    │  001_slots   │  │   │
//! │  │   │  list/get     │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  └────────────────────────────────┼───────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │       SQLite: storage_slots(key, payload, updated_at)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The Entity Store and its create-or-update protocol
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Slot storage implementations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nabidka_store::{DbConfig, EntityStore};
//! use nabidka_core::{Quote, Record};
//!
//! let mut store = EntityStore::open(DbConfig::new("nabidka.db")).await?;
//! let id = store.save(Record::Draft(Quote::default())).await?;
//! assert!(store.get::<Quote>(&id).is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::memory::MemorySlots;
pub use repository::slot::SlotRepository;
pub use repository::SlotStorage;
pub use store::{Collection, Entity, EntityStore};

//! # Repository Module
//!
//! Durable storage of named slots.
//!
//! ## Slot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Slot Storage                                         │
//! │                                                                         │
//! │  EntityStore                                                           │
//! │       │                                                                 │
//! │       │  write_slot("quotes", "[{...}, {...}]")                        │
//! │       ▼                                                                 │
//! │  SlotStorage (trait)                                                   │
//! │  ├── read_slot(&self, key)                                             │
//! │  └── write_slot(&self, key, payload)                                   │
//! │       │                                                                 │
//! │       ├──► SlotRepository  (SQLite storage_slots table)                │
//! │       └──► MemorySlots     (HashMap, tests / throwaway sessions)       │
//! │                                                                         │
//! │  A slot holds one whole collection. Writes replace it entirely         │
//! │  (last write wins); there is no partial update.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Implementations
//!
//! - [`SlotRepository`](slot::SlotRepository) - SQLite-backed slots
//! - [`MemorySlots`](memory::MemorySlots) - In-process slots

use async_trait::async_trait;

use crate::error::StoreResult;

pub mod memory;
pub mod slot;

/// Key-value storage of serialized collections.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// Reads the payload stored under `key`, if any.
    async fn read_slot(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the payload stored under `key`.
    async fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()>;
}

//! In-process [`SlotStorage`] backed by a `HashMap`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::SlotStorage;
use crate::error::StoreResult;

/// Slots held in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, as if a previous session had written it.
    pub fn with_slot(self, key: impl Into<String>, payload: impl Into<String>) -> Self {
        self.slots.lock().insert(key.into(), payload.into());
        self
    }

    /// Returns the raw payload of a slot.
    pub fn slot(&self, key: &str) -> Option<String> {
        self.slots.lock().get(key).cloned()
    }

    /// Number of writes performed since creation (seeding excluded).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SlotStorage for MemorySlots {
    async fn read_slot(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slot(key))
    }

    async fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()> {
        self.slots.lock().insert(key.to_string(), payload.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

//! # Entity Store
//!
//! Owns the three entity collections and keeps them in sync with their
//! slots.
//!
//! ## Mutation Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     save / delete                                       │
//! │                                                                         │
//! │  1. Build the next collection value from the current snapshot          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Replace the in-memory value (readers see the new Arc)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Write the whole serialized collection to its slot                  │
//! │       │                                                                 │
//! │       ├── Ok  → done                                                   │
//! │       └── Err → restore the previous value, return StoreError          │
//! │                                                                         │
//! │  No partial collection is ever written.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load-on-Start
//! ```text
//! slot missing        ──► empty collection
//! slot unreadable     ──► empty collection + warn!
//! payload not parsable──► empty collection + warn!
//! ```
//! Startup never fails because of stored data.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use nabidka_core::{
    ClientAddress, EntityId, IdGenerator, Persisted, Quote, QuoteItemTemplate, Record,
    CLIENT_ADDRESSES_SLOT, QUOTES_SLOT, QUOTE_ITEM_TEMPLATES_SLOT,
};

use crate::error::{StoreError, StoreResult};
use crate::pool::{Database, DbConfig};
use crate::repository::SlotStorage;

// =============================================================================
// Entity Binding
// =============================================================================

/// Binds an entity type to its slot and its collection inside the store.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Slot the collection is persisted under.
    const SLOT: &'static str;

    /// Human-readable kind, used in errors and logs.
    const KIND: &'static str;

    fn collection(store: &EntityStore) -> &Collection<Self>;

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self>;
}

impl Entity for Quote {
    const SLOT: &'static str = QUOTES_SLOT;
    const KIND: &'static str = "Quote";

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.quotes
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self> {
        &mut store.quotes
    }
}

impl Entity for ClientAddress {
    const SLOT: &'static str = CLIENT_ADDRESSES_SLOT;
    const KIND: &'static str = "ClientAddress";

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.addresses
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self> {
        &mut store.addresses
    }
}

impl Entity for QuoteItemTemplate {
    const SLOT: &'static str = QUOTE_ITEM_TEMPLATES_SLOT;
    const KIND: &'static str = "QuoteItemTemplate";

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.templates
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self> {
        &mut store.templates
    }
}

// =============================================================================
// Collection
// =============================================================================

/// An ordered collection of persisted entities.
///
/// The value is an `Arc` snapshot: handing it out never copies, and a
/// snapshot taken before a mutation keeps its old contents.
#[derive(Debug)]
pub struct Collection<T> {
    items: Arc<Vec<Persisted<T>>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Arc::new(Vec::new()),
        }
    }
}

impl<T> Collection<T> {
    /// Current value, in insertion order.
    pub fn snapshot(&self) -> Arc<Vec<Persisted<T>>> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.items.iter().position(|entry| &entry.id == id)
    }
}

// =============================================================================
// Entity Store
// =============================================================================

/// The single owner of quotes, client addresses and item templates.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = EntityStore::open(DbConfig::new("nabidka.db")).await?;
/// let id = store.save(Record::Draft(quote)).await?;
/// let quotes = store.list::<Quote>();
/// ```
pub struct EntityStore {
    storage: Arc<dyn SlotStorage>,
    ids: IdGenerator,
    quotes: Collection<Quote>,
    addresses: Collection<ClientAddress>,
    templates: Collection<QuoteItemTemplate>,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("quotes", &self.quotes.len())
            .field("addresses", &self.addresses.len())
            .field("templates", &self.templates.len())
            .finish()
    }
}

impl EntityStore {
    /// Loads every collection from `storage`.
    pub async fn init(storage: Arc<dyn SlotStorage>) -> Self {
        let quotes = load_collection::<Quote>(storage.as_ref()).await;
        let addresses = load_collection::<ClientAddress>(storage.as_ref()).await;
        let templates = load_collection::<QuoteItemTemplate>(storage.as_ref()).await;

        info!(
            quotes = quotes.len(),
            addresses = addresses.len(),
            templates = templates.len(),
            "Entity store loaded"
        );

        EntityStore {
            storage,
            ids: IdGenerator::new(),
            quotes,
            addresses,
            templates,
        }
    }

    /// Opens the SQLite database described by `config` and loads from it.
    pub async fn open(config: DbConfig) -> StoreResult<Self> {
        let db = Database::new(config).await?;
        Ok(Self::init(Arc::new(db.slots())).await)
    }

    /// The generator used for entity ids, shared with line-item creation.
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Current collection of `T`, in insertion order.
    pub fn list<T: Entity>(&self) -> Arc<Vec<Persisted<T>>> {
        T::collection(self).snapshot()
    }

    /// Looks up an entity by id.
    pub fn get<T: Entity>(&self, id: &EntityId) -> Option<Persisted<T>> {
        let collection = T::collection(self);
        collection
            .position(id)
            .map(|index| collection.items[index].clone())
    }

    /// Creates or updates an entity.
    ///
    /// ## Behavior
    /// - `Draft` gets a fresh id and is appended; the collection grows by one
    /// - `Persisted` replaces the entry with the same id in place
    /// - `Persisted` with an unknown id fails with `NotFound`, nothing changes
    ///
    /// Returns the id of the saved entity.
    pub async fn save<T: Entity>(&mut self, record: Record<T>) -> StoreResult<EntityId> {
        let current = T::collection(self).snapshot();

        let (id, next) = match record {
            Record::Draft(fields) => {
                let id = self.ids.next_id();
                let mut next = Vec::with_capacity(current.len() + 1);
                next.extend(current.iter().cloned());
                next.push(Persisted::new(id.clone(), fields));
                debug!(kind = T::KIND, id = %id, "Creating entity");
                (id, next)
            }
            Record::Persisted(entry) => {
                let index = T::collection(self)
                    .position(&entry.id)
                    .ok_or_else(|| StoreError::not_found(T::KIND, entry.id.as_str()))?;
                let id = entry.id.clone();
                let mut next = current.as_ref().clone();
                next[index] = entry;
                debug!(kind = T::KIND, id = %id, "Updating entity");
                (id, next)
            }
        };

        self.commit(next).await?;
        Ok(id)
    }

    /// Removes an entity.
    ///
    /// Returns `false` (and writes nothing) when no entry has that id.
    pub async fn delete<T: Entity>(&mut self, id: &EntityId) -> StoreResult<bool> {
        let current = T::collection(self).snapshot();
        if T::collection(self).position(id).is_none() {
            debug!(kind = T::KIND, id = %id, "Delete of unknown id ignored");
            return Ok(false);
        }

        let next: Vec<Persisted<T>> = current
            .iter()
            .filter(|entry| &entry.id != id)
            .cloned()
            .collect();

        self.commit(next).await?;
        debug!(kind = T::KIND, id = %id, "Deleted entity");
        Ok(true)
    }

    /// Swaps in `next` and persists it, restoring the previous value on failure.
    async fn commit<T: Entity>(&mut self, next: Vec<Persisted<T>>) -> StoreResult<()> {
        let payload = serde_json::to_string(&next)?;
        let previous = std::mem::replace(&mut T::collection_mut(self).items, Arc::new(next));

        if let Err(err) = self.storage.write_slot(T::SLOT, &payload).await {
            error!(slot = T::SLOT, error = %err, "Slot write failed, restoring previous state");
            T::collection_mut(self).items = previous;
            return Err(err);
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Typed shorthands
    // -------------------------------------------------------------------------

    pub fn quotes(&self) -> Arc<Vec<Persisted<Quote>>> {
        self.list::<Quote>()
    }

    pub fn addresses(&self) -> Arc<Vec<Persisted<ClientAddress>>> {
        self.list::<ClientAddress>()
    }

    pub fn templates(&self) -> Arc<Vec<Persisted<QuoteItemTemplate>>> {
        self.list::<QuoteItemTemplate>()
    }
}

async fn load_collection<T: Entity>(storage: &dyn SlotStorage) -> Collection<T> {
    let payload = match storage.read_slot(T::SLOT).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return Collection::default(),
        Err(err) => {
            warn!(slot = T::SLOT, error = %err, "Slot unreadable, starting empty");
            return Collection::default();
        }
    };

    let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&payload) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(slot = T::SLOT, error = %err, "Slot payload corrupt, starting empty");
            return Collection::default();
        }
    };

    // One unreadable entry costs only that entry
    let total = entries.len();
    let items: Vec<Persisted<T>> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(slot = T::SLOT, index, error = %err, "Skipping unreadable entry");
                None
            }
        })
        .collect();

    debug!(slot = T::SLOT, loaded = items.len(), total, "Collection loaded");
    Collection {
        items: Arc::new(items),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Session State
//!
//! Which view is open and which quote is selected.
//!
//! ```text
//!              new_quote() / select_quote(id)
//!   ┌──────┐ ─────────────────────────────────► ┌────────┐
//!   │ Home │                                     │ Editor │
//!   └──────┘ ◄───────────────────────────────── └────────┘
//!     │  ▲            back() / quote_saved()
//!     │  │
//!     │  └──── back() ────┐
//!     ▼                   │
//!   manage_addresses() ──► AddressBook
//!   manage_quote_items() ─► QuoteItems
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use nabidka_core::{new_quote_draft, EntityId, Quote, QuoteDefaults, Record};
use nabidka_store::EntityStore;

/// The open view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Home,
    Editor,
    AddressBook,
    QuoteItems,
}

/// Navigation state of one user session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    view: View,
    selected_quote: Option<EntityId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_quote(&self) -> Option<&EntityId> {
        self.selected_quote.as_ref()
    }

    /// Opens the editor on a fresh quote.
    pub fn new_quote(&mut self) {
        self.selected_quote = None;
        self.go(View::Editor);
    }

    /// Opens the editor on an existing quote.
    pub fn select_quote(&mut self, id: EntityId) {
        self.selected_quote = Some(id);
        self.go(View::Editor);
    }

    pub fn manage_addresses(&mut self) {
        self.go(View::AddressBook);
    }

    pub fn manage_quote_items(&mut self) {
        self.go(View::QuoteItems);
    }

    pub fn back(&mut self) {
        self.go(View::Home);
    }

    /// Called after the editor saved its quote.
    pub fn quote_saved(&mut self) {
        self.go(View::Home);
    }

    /// The record the editor works on: the selected quote when it still
    /// exists, otherwise a new draft.
    pub fn editor_record(
        &self,
        store: &EntityStore,
        defaults: &QuoteDefaults,
        today: NaiveDate,
    ) -> Record<Quote> {
        if let Some(found) = self.selected_quote.as_ref().and_then(|id| store.get::<Quote>(id)) {
            return Record::Persisted(found);
        }

        let quotes = store.quotes();
        new_quote_draft(
            quotes.iter().map(|q| q.fields.quote_number.as_str()),
            today,
            defaults,
            store.ids(),
        )
    }

    fn go(&mut self, view: View) {
        debug!(from = ?self.view, to = ?view, "Navigating");
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabidka_store::MemorySlots;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    async fn store_with_quote(number: &str) -> (EntityStore, EntityId) {
        let mut store = EntityStore::init(Arc::new(MemorySlots::new())).await;
        let id = store
            .save(Record::Draft(Quote {
                quote_number: number.to_string(),
                ..Quote::default()
            }))
            .await
            .unwrap();
        (store, id)
    }

    #[test]
    fn test_navigation() {
        let mut session = Session::new();
        assert_eq!(session.view(), View::Home);

        session.select_quote(EntityId::from("q1"));
        assert_eq!(session.view(), View::Editor);
        assert_eq!(session.selected_quote(), Some(&EntityId::from("q1")));

        session.new_quote();
        assert_eq!(session.view(), View::Editor);
        assert_eq!(session.selected_quote(), None);

        session.manage_addresses();
        assert_eq!(session.view(), View::AddressBook);
        session.manage_quote_items();
        assert_eq!(session.view(), View::QuoteItems);
        session.back();
        assert_eq!(session.view(), View::Home);
    }

    #[tokio::test]
    async fn test_editor_record_for_selection() {
        let (store, id) = store_with_quote("0012").await;
        let mut session = Session::new();
        session.select_quote(id.clone());

        let record = session.editor_record(&store, &QuoteDefaults::default(), today());
        assert!(!record.is_draft());
        assert_eq!(record.id(), Some(&id));
    }

    #[tokio::test]
    async fn test_editor_record_falls_back_to_draft() {
        let (store, _) = store_with_quote("0012").await;
        let mut session = Session::new();
        session.select_quote(EntityId::from("deleted"));

        let record = session.editor_record(&store, &QuoteDefaults::default(), today());
        assert!(record.is_draft());
        assert_eq!(record.fields().quote_number, "0013");
        assert_eq!(record.fields().date, Some(today()));
        assert_eq!(record.fields().line_items.len(), 1);
    }

    #[test]
    fn test_saving_returns_home() {
        let mut session = Session::new();
        session.new_quote();
        session.quote_saved();
        assert_eq!(session.view(), View::Home);
    }
}

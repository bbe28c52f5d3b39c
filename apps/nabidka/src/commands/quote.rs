//! # Quote Commands
//!
//! Home listing, editor record, and the quote save boundary.
//!
//! ## Editing Without The Editor
//! A [`QuoteEdit`] carries the changes a shell user asks for. It is applied
//! to the editor record in a fixed order, then saved like any other edit:
//! ```text
//! address ──► to_name / to_address overrides ──► templates ──► items
//!         ──► tax rate, notes, terms, date ──► save_quote
//! ```
//! The untouched blank row a new quote starts with is replaced by the first
//! added item instead of being kept as an empty line.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use nabidka_core::validation::validate_quote;
use nabidka_core::{
    next_quote_number as propose_number, summarize, ClientAddress, EntityId, LineItem, Persisted,
    Quote, QuoteDefaults, QuoteFilter, QuoteItemTemplate, QuoteSummary, Record, Totals,
};
use nabidka_export::QuoteDocument;

use crate::error::{ApiError, ApiResult};
use crate::state::{Session, StoreState};

/// A quote with its computed totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub id: EntityId,
    #[serde(flatten)]
    pub quote: Quote,
    pub totals: Totals,
}

impl From<Persisted<Quote>> for QuoteDto {
    fn from(p: Persisted<Quote>) -> Self {
        let totals = p.fields.totals();
        QuoteDto {
            id: p.id,
            quote: p.fields,
            totals,
        }
    }
}

/// Home listing: filtered, newest date first.
pub async fn list_quotes(store: &StoreState, filter: &QuoteFilter) -> Vec<QuoteSummary> {
    let quotes = store.read().await.quotes();
    summarize(&quotes, filter)
}

pub async fn get_quote(store: &StoreState, id: &EntityId) -> ApiResult<QuoteDto> {
    store
        .read()
        .await
        .get::<Quote>(id)
        .map(QuoteDto::from)
        .ok_or_else(|| ApiError::not_found("Quote", id.as_str()))
}

/// Number the next new quote would get.
pub async fn next_quote_number(store: &StoreState) -> String {
    let quotes = store.read().await.quotes();
    propose_number(quotes.iter().map(|q| q.fields.quote_number.as_str()))
}

/// The record the editor should show for the current session.
pub async fn editor_quote(
    store: &StoreState,
    session: &Session,
    defaults: &QuoteDefaults,
    today: NaiveDate,
) -> Record<Quote> {
    let store = store.read().await;
    session.editor_record(&store, defaults, today)
}

/// Validates and saves a quote, then returns the session to Home.
pub async fn save_quote(
    store: &StoreState,
    session: &mut Session,
    record: Record<Quote>,
) -> ApiResult<EntityId> {
    validate_quote(record.fields())?;

    let created = record.is_draft();
    let id = store.write().await.save(record).await?;
    info!(id = %id, created, "Quote saved");

    session.quote_saved();
    Ok(id)
}

/// Returns `false` when no quote had that id.
pub async fn delete_quote(store: &StoreState, id: &EntityId) -> ApiResult<bool> {
    let removed = store.write().await.delete::<Quote>(id).await?;
    if removed {
        info!(id = %id, "Quote deleted");
    }
    Ok(removed)
}

/// One line item given as `description;quantity;unit price`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ';');
        let (Some(price), Some(quantity), Some(description)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected 'description;quantity;price', got '{s}'"));
        };

        let number = |field: &str, text: &str| {
            text.trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| format!("{field} is not a number: '{text}'"))
        };

        Ok(ItemSpec {
            description: description.trim().to_string(),
            quantity: number("quantity", quantity)?,
            unit_price: number("price", price)?,
        })
    }
}

/// Field changes for a quote; `None` and empty lists leave a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteEdit {
    pub date: Option<NaiveDate>,
    /// Saved address copied into the recipient fields.
    pub address: Option<EntityId>,
    pub to_name: Option<String>,
    pub to_address: Option<String>,
    /// Saved templates appended as line items, in order.
    pub templates: Vec<EntityId>,
    pub items: Vec<ItemSpec>,
    /// Drop every existing line item first.
    pub clear_items: bool,
    pub tax_rate: Option<f64>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

/// Applies `edit` to `record`, resolving saved addresses and templates.
///
/// Nothing is written; an unknown address or template id leaves the record
/// untouched and fails with `NOT_FOUND`.
pub async fn apply_edit(
    store: &StoreState,
    record: &mut Record<Quote>,
    edit: &QuoteEdit,
) -> ApiResult<()> {
    let store = store.read().await;

    let address = edit
        .address
        .as_ref()
        .map(|id| {
            store
                .get::<ClientAddress>(id)
                .ok_or_else(|| ApiError::not_found("Client address", id.as_str()))
        })
        .transpose()?;
    let templates = edit
        .templates
        .iter()
        .map(|id| {
            store
                .get::<QuoteItemTemplate>(id)
                .ok_or_else(|| ApiError::not_found("Item template", id.as_str()))
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let quote = record.fields_mut();

    if let Some(address) = address {
        quote.apply_client_address(&address.fields);
    }
    if let Some(name) = &edit.to_name {
        quote.to_name = name.clone();
    }
    if let Some(to_address) = &edit.to_address {
        quote.to_address = to_address.clone();
    }

    if edit.clear_items {
        quote.line_items.clear();
    }
    if !templates.is_empty() || !edit.items.is_empty() {
        quote.line_items.retain(|item| !is_untouched(item));
    }
    for template in &templates {
        quote.add_line_item_from_template(store.ids().next_id(), &template.fields);
    }
    for item in &edit.items {
        quote.line_items.push(LineItem::new(
            store.ids().next_id(),
            item.description.clone(),
            item.quantity,
            item.unit_price,
        ));
    }

    if let Some(rate) = edit.tax_rate {
        quote.tax_rate = rate;
    }
    if let Some(notes) = &edit.notes {
        quote.notes = notes.clone();
    }
    if let Some(terms) = &edit.terms {
        quote.terms = terms.clone();
    }
    if edit.date.is_some() {
        quote.date = edit.date;
    }

    Ok(())
}

fn is_untouched(item: &LineItem) -> bool {
    item.description.trim().is_empty() && item.unit_price == 0.0
}

/// The printable document of a stored quote.
pub async fn quote_document(store: &StoreState, id: &EntityId) -> ApiResult<QuoteDocument> {
    let quote = get_quote(store, id).await?;
    Ok(QuoteDocument::build(&quote.quote, &quote.totals))
}

//! # Domain Types
//!
//! Core domain types used throughout Nabídka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     Quote       │   │  ClientAddress  │   │  QuoteItemTemplate  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  quote_number   │   │  name           │   │  description        │   │
//! │  │  date           │   │  street         │   │  unit_price         │   │
//! │  │  from / to      │   │  house_number   │   └─────────────────────┘   │
//! │  │  line_items ──┐ │   │  city, postal   │                             │
//! │  │  tax_rate     │ │   │  country        │                             │
//! │  │  notes, terms │ │   └─────────────────┘                             │
//! │  │  logo_image   │ │                                                    │
//! │  └───────────────┼─┘                                                    │
//! │                  ▼                                                      │
//! │        ┌─────────────────┐                                              │
//! │        │    LineItem     │  owned by exactly one Quote                  │
//! │        │  id, desc, qty, │  (no independent lifecycle)                  │
//! │        │  unit_price     │                                              │
//! │        └─────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draft vs Persisted
//! Top-level entities never carry a magic "new" id. A value that has not been
//! stored yet is a [`Record::Draft`]; a stored value is a [`Persisted`] pairing
//! an [`EntityId`] with the entity fields. The store branches on the variant,
//! so an unknown id can be reported instead of silently ignored.
//!
//! ## Snapshot Pattern
//! Client addresses and item templates are copied **by value** into a quote.
//! Editing the address book later never rewrites quotes that already copied
//! an entry.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::lenient;

// =============================================================================
// Entity Identifier
// =============================================================================

/// Opaque identifier of a persisted entity or line item.
///
/// Serialized as a bare JSON string so stored payloads keep their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId(value.to_string())
    }
}

// =============================================================================
// Record Lifecycle
// =============================================================================

/// A stored entity: its identifier plus its fields.
///
/// ## JSON Shape
/// The fields are flattened next to the id, so a stored quote is the flat
/// object `{"id": "...", "quoteNumber": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Persisted<T> {
    /// Pairs an identifier with entity fields.
    pub fn new(id: EntityId, fields: T) -> Self {
        Persisted { id, fields }
    }
}

/// An entity on its way into the store.
///
/// ## Save Protocol
/// ```text
/// Record::Draft(fields)        ──► mint id, append      (size + 1)
/// Record::Persisted(p)         ──► replace entry p.id   (size unchanged)
///                                  unknown id → NotFound
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Record<T> {
    /// Not yet persisted; the store assigns an id on save.
    Draft(T),
    /// Already persisted; the store replaces the entry with this id.
    Persisted(Persisted<T>),
}

impl<T> Record<T> {
    /// Returns the identifier, if this record was persisted before.
    pub fn id(&self) -> Option<&EntityId> {
        match self {
            Record::Draft(_) => None,
            Record::Persisted(p) => Some(&p.id),
        }
    }

    /// Returns true when the record has never been saved.
    pub fn is_draft(&self) -> bool {
        matches!(self, Record::Draft(_))
    }

    /// Borrows the entity fields.
    pub fn fields(&self) -> &T {
        match self {
            Record::Draft(fields) => fields,
            Record::Persisted(p) => &p.fields,
        }
    }

    /// Mutably borrows the entity fields.
    pub fn fields_mut(&mut self) -> &mut T {
        match self {
            Record::Draft(fields) => fields,
            Record::Persisted(p) => &mut p.fields,
        }
    }

    /// Consumes the record, returning the entity fields.
    pub fn into_fields(self) -> T {
        match self {
            Record::Draft(fields) => fields,
            Record::Persisted(p) => p.fields,
        }
    }
}

impl<T> From<Persisted<T>> for Record<T> {
    fn from(value: Persisted<T>) -> Self {
        Record::Persisted(value)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: EntityId,
    pub description: String,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_price: f64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(id: EntityId, description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            id,
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Creates the empty row the editor offers: quantity 1, price 0.
    pub fn blank(id: EntityId) -> Self {
        LineItem::new(id, "", 1.0, 0.0)
    }

    /// Copies a template into a fresh row (quantity 1).
    ///
    /// The template is referenced by value: later edits to the template do
    /// not reach this row.
    pub fn from_template(id: EntityId, template: &QuoteItemTemplate) -> Self {
        LineItem::new(id, template.description.clone(), 1.0, template.unit_price)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A price quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Free text; usually a zero-padded number such as `0007`.
    pub quote_number: String,

    /// Issue date, stored as `YYYY-MM-DD` (`""` when cleared).
    #[serde(with = "lenient::date", default)]
    pub date: Option<NaiveDate>,

    pub from_name: String,
    pub from_address: String,
    pub to_name: String,
    pub to_address: String,

    /// Display and export order is insertion order.
    pub line_items: Vec<LineItem>,

    /// Percentage, e.g. `21.0` for 21 %.
    #[serde(deserialize_with = "lenient::number")]
    pub tax_rate: f64,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub terms: String,

    /// Embedded logo as a `data:image/...;base64,` URL.
    #[serde(rename = "logoUrl", default, skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
}

impl Default for Quote {
    fn default() -> Self {
        Quote {
            quote_number: String::new(),
            date: None,
            from_name: String::new(),
            from_address: String::new(),
            to_name: String::new(),
            to_address: String::new(),
            line_items: Vec::new(),
            tax_rate: 0.0,
            notes: String::new(),
            terms: String::new(),
            logo_image: None,
        }
    }
}

impl Quote {
    /// Appends an empty line item and returns its index.
    pub fn add_line_item(&mut self, id: EntityId) -> usize {
        self.line_items.push(LineItem::blank(id));
        self.line_items.len() - 1
    }

    /// Appends a row copied from a template and returns its index.
    pub fn add_line_item_from_template(&mut self, id: EntityId, template: &QuoteItemTemplate) -> usize {
        self.line_items.push(LineItem::from_template(id, template));
        self.line_items.len() - 1
    }

    /// Removes the line item at `index`, returning it.
    pub fn remove_line_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.line_items.len() {
            return Err(CoreError::LineItemOutOfRange {
                index,
                len: self.line_items.len(),
            });
        }
        Ok(self.line_items.remove(index))
    }

    /// Snapshots a client address into the recipient fields.
    ///
    /// ## Value Copy
    /// ```text
    /// ClientAddress { name: "ACME", street: "Dlouhá", house_number: "5", ... }
    ///      │
    ///      ▼
    /// to_name    = "ACME"
    /// to_address = "Dlouhá 5\n110 00 Praha\nČeská republika"
    /// ```
    pub fn apply_client_address(&mut self, address: &ClientAddress) {
        self.to_name = address.name.clone();
        self.to_address = address.formatted();
    }

    /// Clears the recipient fields (the "no address selected" choice).
    pub fn clear_client(&mut self) {
        self.to_name.clear();
        self.to_address.clear();
    }

    /// Sets the embedded logo from a `data:image/...;base64,` URL.
    pub fn set_logo(&mut self, data_url: impl Into<String>) -> CoreResult<()> {
        let data_url = data_url.into();
        if split_data_url(&data_url).is_none() {
            return Err(CoreError::InvalidLogo {
                reason: "expected a data:image/...;base64, URL".to_string(),
            });
        }
        self.logo_image = Some(data_url);
        Ok(())
    }

    /// Removes the embedded logo.
    pub fn clear_logo(&mut self) {
        self.logo_image = None;
    }
}

/// Splits a `data:image/<type>;base64,<payload>` URL into mime type and payload.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    if !mime.starts_with("image/") || payload.is_empty() {
        return None;
    }
    Some((mime, payload))
}

// =============================================================================
// Client Address
// =============================================================================

/// Country preselected for a new address-book entry.
pub const DEFAULT_COUNTRY: &str = "Česká republika";

/// An address-book entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAddress {
    pub name: String,
    pub street: String,
    pub house_number: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for ClientAddress {
    fn default() -> Self {
        ClientAddress {
            name: String::new(),
            street: String::new(),
            house_number: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ClientAddress {
    /// Three-line postal form copied into a quote's `to_address`.
    pub fn formatted(&self) -> String {
        format!(
            "{} {}\n{} {}\n{}",
            self.street, self.house_number, self.postal_code, self.city, self.country
        )
    }
}

// =============================================================================
// Quote Item Template
// =============================================================================

/// A reusable line-item description with a price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemTemplate {
    pub description: String,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> ClientAddress {
        ClientAddress {
            name: "ACME s.r.o.".to_string(),
            street: "Dlouhá".to_string(),
            house_number: "5".to_string(),
            city: "Praha".to_string(),
            postal_code: "110 00".to_string(),
            country: "Česká republika".to_string(),
        }
    }

    #[test]
    fn test_persisted_quote_json_is_flat() {
        let quote = Persisted::new(
            EntityId::from("id_1"),
            Quote {
                quote_number: "0001".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1),
                tax_rate: 21.0,
                ..Quote::default()
            },
        );

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["id"], "id_1");
        assert_eq!(json["quoteNumber"], "0001");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["taxRate"], 21.0);
        assert!(json.get("logoUrl").is_none());
    }

    #[test]
    fn test_reads_payload_written_without_optional_fields() {
        let json = r#"{
            "id": "id_1700000000000_abc123xyz",
            "quoteNumber": "0042",
            "date": "2024-05-17",
            "fromName": "Jan Novák",
            "fromAddress": "Ulice 1",
            "toName": "Klient",
            "toAddress": "Jinde 2",
            "lineItems": [{"id": "li_1", "description": "Web", "quantity": 2, "unitPrice": 1500}],
            "taxRate": 21
        }"#;

        let quote: Persisted<Quote> = serde_json::from_str(json).unwrap();
        assert_eq!(quote.id.as_str(), "id_1700000000000_abc123xyz");
        assert_eq!(quote.fields.line_items[0].quantity, 2.0);
        assert_eq!(quote.fields.notes, "");
        assert_eq!(quote.fields.logo_image, None);
    }

    #[test]
    fn test_reads_form_values_stored_as_typed() {
        let json = r#"{
            "id": "id_2",
            "quoteNumber": "0043",
            "date": "",
            "fromName": "", "fromAddress": "", "toName": "", "toAddress": "",
            "lineItems": [{"id": "li_1", "description": "Web", "quantity": null, "unitPrice": 1500}],
            "taxRate": "15"
        }"#;

        let quote: Persisted<Quote> = serde_json::from_str(json).unwrap();
        assert_eq!(quote.fields.date, None);
        assert_eq!(quote.fields.tax_rate, 15.0);
        assert_eq!(quote.fields.line_items[0].quantity, 0.0);

        let written = serde_json::to_value(&quote).unwrap();
        assert_eq!(written["date"], "");
        assert_eq!(written["taxRate"], 15.0);
    }

    #[test]
    fn test_record_accessors() {
        let draft: Record<QuoteItemTemplate> = Record::Draft(QuoteItemTemplate::default());
        assert!(draft.is_draft());
        assert!(draft.id().is_none());

        let stored: Record<QuoteItemTemplate> =
            Persisted::new(EntityId::from("t1"), QuoteItemTemplate::default()).into();
        assert_eq!(stored.id(), Some(&EntityId::from("t1")));
    }

    #[test]
    fn test_apply_client_address_snapshots_values() {
        let mut address = sample_address();
        let mut quote = Quote::default();

        quote.apply_client_address(&address);
        assert_eq!(quote.to_name, "ACME s.r.o.");
        assert_eq!(quote.to_address, "Dlouhá 5\n110 00 Praha\nČeská republika");

        // Later edits to the address book do not reach the quote
        address.name = "Renamed".to_string();
        assert_eq!(quote.to_name, "ACME s.r.o.");
    }

    #[test]
    fn test_line_item_from_template() {
        let template = QuoteItemTemplate {
            description: "Konzultace".to_string(),
            unit_price: 900.0,
        };
        let mut quote = Quote::default();
        let index = quote.add_line_item_from_template(EntityId::from("li_9"), &template);

        let item = &quote.line_items[index];
        assert_eq!(item.id.as_str(), "li_9");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.unit_price, 900.0);
        assert_eq!(item.description, "Konzultace");
    }

    #[test]
    fn test_remove_line_item_out_of_range() {
        let mut quote = Quote::default();
        quote.add_line_item(EntityId::from("a"));

        assert!(quote.remove_line_item(1).is_err());
        assert_eq!(quote.remove_line_item(0).unwrap().id.as_str(), "a");
        assert!(quote.line_items.is_empty());
    }

    #[test]
    fn test_set_logo_requires_data_url() {
        let mut quote = Quote::default();
        assert!(quote.set_logo("https://example.com/logo.png").is_err());
        assert!(quote.set_logo("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(quote.logo_image.is_some());

        quote.clear_logo();
        assert!(quote.logo_image.is_none());
    }

    #[test]
    fn test_split_data_url() {
        assert_eq!(
            split_data_url("data:image/jpeg;base64,AAAA"),
            Some(("image/jpeg", "AAAA"))
        );
        assert_eq!(split_data_url("data:text/plain;base64,AAAA"), None);
        assert_eq!(split_data_url("data:image/png,raw"), None);
    }

    #[test]
    fn test_default_address_country() {
        assert_eq!(ClientAddress::default().country, DEFAULT_COUNTRY);
    }
}

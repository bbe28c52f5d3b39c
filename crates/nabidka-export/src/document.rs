//! # Quote Document
//!
//! The printable model of a quote. The visible preview and the exported PDF
//! are both produced from this one model, so they always agree.
//!
//! ## Sections
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ [logo]                                                   │
//! │ From Name                                      NABÍDKA   │
//! │ From address                                             │
//! ├──────────────────────────────────────────────────────────┤
//! │ PRO                           Číslo Nabídky: 0007        │
//! │ Client                        Datum Vystavení: 1. 5. 2024│
//! │ Client address                                           │
//! │                                                          │
//! │ POPIS          MNOŽSTVÍ    CENA/JEDN.        CELKEM      │
//! │ ...rows or "Žádné položky"                               │
//! │                                   Mezisoučet:   ...      │
//! │                                   Daň (21%):    ...      │
//! │                                   Celkem:       ...      │
//! │ POZNÁMKY (only when non-empty)                           │
//! │ OBCHODNÍ PODMÍNKY (only when non-empty)                  │
//! │                 Děkujeme za Váš zájem.                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty text fields fall back to placeholders. Figures are formatted here,
//! once, in cs-CZ style.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::DynamicImage;
use tracing::warn;

use nabidka_core::format::{format_currency, format_date};
use nabidka_core::{split_data_url, Quote, Totals};

pub const TITLE: &str = "Nabídka";
pub const PLACEHOLDER_FROM_NAME: &str = "Vaše Jméno / Společnost";
pub const PLACEHOLDER_FROM_ADDRESS: &str = "Vaše Adresa";
pub const PLACEHOLDER_TO_NAME: &str = "Jméno Klienta";
pub const PLACEHOLDER_TO_ADDRESS: &str = "Adresa Klienta";
pub const PLACEHOLDER_NUMBER: &str = "N/A";
pub const NO_ITEMS: &str = "Žádné položky";
pub const FOOTER: &str = "Děkujeme za Váš zájem.";

/// Table column headings, in display order.
pub const COLUMNS: [&str; 4] = ["Popis", "Množství", "Cena/Jedn.", "Celkem"];

/// A decoded logo, ready for layout and embedding.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub image: Arc<DynamicImage>,
}

impl LogoImage {
    /// Decodes a `data:image/...;base64,` URL.
    ///
    /// Returns `None` (with a warning) for anything that does not decode,
    /// so a broken logo never blocks an export.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let Some((mime, payload)) = split_data_url(url) else {
            warn!("Logo is not a base64 image data URL, skipping");
            return None;
        };

        let bytes = match STANDARD.decode(payload.trim()) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(mime = %mime, error = %err, "Logo base64 payload invalid, skipping");
                return None;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(image) => Some(LogoImage {
                image: Arc::new(image),
            }),
            Err(err) => {
                warn!(mime = %mime, error = %err, "Logo image undecodable, skipping");
                None
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One row of the line-item table, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

/// The printable model of a quote.
#[derive(Debug, Clone)]
pub struct QuoteDocument {
    pub logo: Option<LogoImage>,
    pub from_name: String,
    pub from_address: String,
    pub to_name: String,
    pub to_address: String,
    pub quote_number: String,
    pub date: String,
    pub rows: Vec<DocumentRow>,
    pub subtotal: String,
    pub tax_label: String,
    pub tax_amount: String,
    pub total: String,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl QuoteDocument {
    /// Builds the document for `quote` with its precomputed `totals`.
    pub fn build(quote: &Quote, totals: &Totals) -> Self {
        let rows = quote
            .line_items
            .iter()
            .map(|item| DocumentRow {
                description: item.description.clone(),
                quantity: item.quantity.to_string(),
                unit_price: format_currency(item.unit_price),
                line_total: format_currency(item.line_total()),
            })
            .collect();

        QuoteDocument {
            logo: quote.logo_image.as_deref().and_then(LogoImage::from_data_url),
            from_name: or_placeholder(&quote.from_name, PLACEHOLDER_FROM_NAME),
            from_address: or_placeholder(&quote.from_address, PLACEHOLDER_FROM_ADDRESS),
            to_name: or_placeholder(&quote.to_name, PLACEHOLDER_TO_NAME),
            to_address: or_placeholder(&quote.to_address, PLACEHOLDER_TO_ADDRESS),
            quote_number: or_placeholder(&quote.quote_number, PLACEHOLDER_NUMBER),
            date: quote.date.map(format_date).unwrap_or_default(),
            rows,
            subtotal: format_currency(totals.subtotal),
            tax_label: format!("Daň ({}%):", quote.tax_rate),
            tax_amount: format_currency(totals.tax_amount),
            total: format_currency(totals.total),
            notes: non_empty(&quote.notes),
            terms: non_empty(&quote.terms),
        }
    }

    /// Convenience: computes totals and builds the document.
    pub fn from_quote(quote: &Quote) -> Self {
        Self::build(quote, &quote.totals())
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Plain-text rendering of the document, used by the terminal preview.
impl fmt::Display for QuoteDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}    {}", self.from_name, TITLE.to_uppercase())?;
        writeln!(f, "{}", self.from_address)?;
        writeln!(f)?;
        writeln!(f, "PRO: {}", self.to_name)?;
        writeln!(f, "{}", self.to_address)?;
        writeln!(f, "Číslo Nabídky: {}", self.quote_number)?;
        writeln!(f, "Datum Vystavení: {}", self.date)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<32} {:>10} {:>16} {:>16}",
            COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3]
        )?;
        if self.rows.is_empty() {
            writeln!(f, "{NO_ITEMS}")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "{:<32} {:>10} {:>16} {:>16}",
                row.description, row.quantity, row.unit_price, row.line_total
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Mezisoučet: {}", self.subtotal)?;
        writeln!(f, "{} {}", self.tax_label, self.tax_amount)?;
        writeln!(f, "Celkem: {}", self.total)?;
        if let Some(notes) = &self.notes {
            writeln!(f, "\nPOZNÁMKY\n{notes}")?;
        }
        if let Some(terms) = &self.terms {
            writeln!(f, "\nOBCHODNÍ PODMÍNKY\n{terms}")?;
        }
        write!(f, "\n{FOOTER}")
    }
}

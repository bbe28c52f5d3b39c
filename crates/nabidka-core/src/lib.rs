//! # nabidka-core: Pure Domain Logic for Nabídka
//!
//! This crate is the **heart** of Nabídka, a quote manager for freelancers.
//! It contains the domain model and every derived calculation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nabídka Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Commands (apps/nabidka)                      │   │
//! │  │    list_quotes, save_quote, export_quote, suggest_terms ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nabidka-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │ numbering │  │ validation│  │   │
//! │  │   │  Quote    │  │  Totals   │  │ next no.  │  │   rules   │  │   │
//! │  │   │  Record   │  │ subtotal  │  │ template  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │    id     │  │  listing  │  │  format   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │            ┌───────────────────┼────────────────────┐                  │
//! │            ▼                   ▼                    ▼                   │
//! │     nabidka-store       nabidka-export       nabidka-assist            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, LineItem, ClientAddress, Record, ...)
//! - [`id`] - Process-unique identifier generator
//! - [`totals`] - Calculation engine (subtotal, tax, total)
//! - [`numbering`] - Quote-number proposal and the new-quote template
//! - [`listing`] - Home-screen listing: totals, filters, newest-first order
//! - [`format`] - cs-CZ currency and date formatting
//! - [`lenient`] - Tolerant readers for numbers and dates in stored payloads
//! - [`error`] - Domain error types
//! - [`validation`] - Save-boundary validation
//!
//! ## Example Usage
//!
//! ```rust
//! use nabidka_core::{EntityId, LineItem, Quote};
//!
//! let mut quote = Quote::default();
//! quote.tax_rate = 21.0;
//! quote.line_items.push(LineItem::new(EntityId::from("a"), "Design", 2.0, 100.0));
//! quote.line_items.push(LineItem::new(EntityId::from("b"), "Hosting", 1.0, 50.0));
//!
//! let totals = quote.totals();
//! assert_eq!(totals.subtotal, 250.0);
//! assert_eq!(totals.tax_amount, 52.5);
//! assert_eq!(totals.total, 302.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod id;
pub mod lenient;
pub mod listing;
pub mod numbering;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use id::IdGenerator;
pub use listing::{summarize, QuoteFilter, QuoteSummary};
pub use numbering::{new_quote_draft, next_quote_number, QuoteDefaults};
pub use totals::{calculate_totals, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Persistence slot holding the quote collection.
pub const QUOTES_SLOT: &str = "quotes";

/// Persistence slot holding the client address book.
pub const CLIENT_ADDRESSES_SLOT: &str = "clientAddresses";

/// Persistence slot holding the saved line-item templates.
pub const QUOTE_ITEM_TEMPLATES_SLOT: &str = "quoteItemTemplates";

/// Width of the zero-padded quote number proposed for a new quote.
pub const QUOTE_NUMBER_WIDTH: usize = 4;

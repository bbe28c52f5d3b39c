//! # Quote Numbering & New-Quote Template
//!
//! Proposes the number of the next quote and builds the draft the editor
//! opens when the user starts a new quote.
//!
//! ## Number Proposal
//! ```text
//! existing numbers:   "0007"    "12"    "abc"    "Q-2024-3"
//! digits extracted:     7        12       0       20243
//!                                    │
//!                                    ▼
//!                      max + 1, zero-padded to 4 digits
//! ```
//!
//! The digits of a number are concatenated and read as one integer, so
//! `"Q-2024-3"` counts as 20243. A number without digits counts as 0; one
//! whose digits do not fit in a `u64` counts as `u64::MAX`.

use chrono::NaiveDate;

use crate::id::IdGenerator;
use crate::types::{LineItem, Quote, Record};
use crate::QUOTE_NUMBER_WIDTH;

/// Proposes the next quote number from the numbers already in use.
pub fn next_quote_number<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let latest = existing.into_iter().map(numeric_value).max().unwrap_or(0);
    format!(
        "{:0width$}",
        latest.saturating_add(1),
        width = QUOTE_NUMBER_WIDTH
    )
}

fn numeric_value(quote_number: &str) -> u64 {
    let digits: String = quote_number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

// =============================================================================
// New-Quote Template
// =============================================================================

/// Sender defaults pre-filled into every new quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDefaults {
    pub from_name: String,
    pub from_address: String,
    pub tax_rate: f64,
    pub terms: String,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        QuoteDefaults {
            from_name: "Vaše Jméno / Společnost".to_string(),
            from_address: "Vaše Adresa\nPSČ, Město".to_string(),
            tax_rate: 21.0,
            terms: "Splatnost faktury je 14 dní. Platba je možná bankovním převodem.".to_string(),
        }
    }
}

/// Builds the draft quote shown when the editor opens without a selection.
///
/// The draft carries the proposed number, `today`, the sender defaults and
/// one empty line item. It has no id until the store saves it.
pub fn new_quote_draft<'a, I>(
    existing_numbers: I,
    today: NaiveDate,
    defaults: &QuoteDefaults,
    ids: &IdGenerator,
) -> Record<Quote>
where
    I: IntoIterator<Item = &'a str>,
{
    Record::Draft(Quote {
        quote_number: next_quote_number(existing_numbers),
        date: Some(today),
        from_name: defaults.from_name.clone(),
        from_address: defaults.from_address.clone(),
        to_name: String::new(),
        to_address: String::new(),
        line_items: vec![LineItem::blank(ids.next_id())],
        tax_rate: defaults.tax_rate,
        notes: String::new(),
        terms: defaults.terms.clone(),
        logo_image: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_number_mixed_inputs() {
        assert_eq!(next_quote_number(["0007", "12", "abc"]), "0013");
    }

    #[test]
    fn test_next_number_without_quotes() {
        assert_eq!(next_quote_number(std::iter::empty()), "0001");
    }

    #[test]
    fn test_next_number_concatenates_digits() {
        assert_eq!(next_quote_number(["Q-1-2"]), "0013");
    }

    #[test]
    fn test_next_number_grows_past_width() {
        assert_eq!(next_quote_number(["9999"]), "10000");
    }

    #[test]
    fn test_overflowing_number_saturates() {
        assert_eq!(
            next_quote_number(["123456789012345678901234567890", "0003"]),
            u64::MAX.to_string()
        );
        assert_eq!(numeric_value("0000000000000000000000000042"), 42);
    }

    #[test]
    fn test_new_quote_draft() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let record = new_quote_draft(
            ["0001", "0002"],
            today,
            &QuoteDefaults::default(),
            &IdGenerator::new(),
        );

        assert!(record.is_draft());
        let quote = record.fields();
        assert_eq!(quote.quote_number, "0003");
        assert_eq!(quote.date, Some(today));
        assert_eq!(quote.from_name, "Vaše Jméno / Společnost");
        assert_eq!(quote.tax_rate, 21.0);
        assert_eq!(quote.line_items.len(), 1);
        assert_eq!(quote.line_items[0].quantity, 1.0);
        assert_eq!(quote.line_items[0].unit_price, 0.0);
        assert!(quote.to_name.is_empty());
        assert!(quote.logo_image.is_none());
    }
}

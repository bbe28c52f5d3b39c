//! # Calculation Engine
//!
//! Derives the money figures of a quote from its line items and tax rate.
//!
//! ## Formula
//! ```text
//! subtotal   = Σ quantity × unit_price
//! tax_amount = subtotal × tax_rate / 100
//! total      = subtotal + tax_amount
//! ```
//!
//! ## Precision
//! Figures are `f64` and are never rounded here. Rounding to two decimals
//! happens only when a figure is formatted for display (see [`crate::format`]).
//! Negative quantities or prices are not rejected; they simply produce
//! negative figures.

use serde::Serialize;

use crate::types::{LineItem, Quote};

/// Derived money figures of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl LineItem {
    /// `quantity × unit_price`.
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Computes totals for a set of line items at a tax rate given in percent.
pub fn calculate_totals(line_items: &[LineItem], tax_rate: f64) -> Totals {
    let subtotal: f64 = line_items.iter().map(LineItem::line_total).sum();
    let tax_amount = subtotal * tax_rate / 100.0;

    Totals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

impl Quote {
    /// Computes the quote's totals. Recomputed on every call.
    pub fn totals(&self) -> Totals {
        calculate_totals(&self.line_items, self.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn item(quantity: f64, unit_price: f64) -> LineItem {
        LineItem::new(EntityId::from("x"), "", quantity, unit_price)
    }

    #[test]
    fn test_reference_quote() {
        let totals = calculate_totals(&[item(2.0, 100.0), item(1.0, 50.0)], 21.0);
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.tax_amount, 52.5);
        assert_eq!(totals.total, 302.5);
    }

    #[test]
    fn test_empty_quote_is_zero() {
        assert_eq!(calculate_totals(&[], 21.0), Totals::default());
    }

    #[test]
    fn test_total_identity_holds() {
        let cases = [
            (vec![item(3.0, 19.99), item(0.5, 1200.0)], 21.0),
            (vec![item(1.0, 0.1), item(1.0, 0.2)], 15.0),
            (vec![item(7.0, 333.33)], 0.0),
        ];

        for (items, rate) in cases {
            let t = calculate_totals(&items, rate);
            assert!((t.total - (t.subtotal + t.tax_amount)).abs() < 1e-9);
            assert!((t.tax_amount - t.subtotal * rate / 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_negative_values_are_computed() {
        let totals = calculate_totals(&[item(1.0, -100.0)], 10.0);
        assert_eq!(totals.subtotal, -100.0);
        assert_eq!(totals.total, -110.0);
    }

    #[test]
    fn test_quote_totals_follow_edits() {
        let mut quote = Quote {
            tax_rate: 10.0,
            ..Quote::default()
        };
        quote.line_items.push(item(1.0, 100.0));
        assert_eq!(quote.totals().total, 110.0);

        quote.line_items[0].quantity = 3.0;
        assert_eq!(quote.totals().total, 330.0);
    }
}

//! # Presentation Formatting
//!
//! cs-CZ rendering of money and dates, shared by the listing, the preview
//! and the exported document.
//!
//! ```text
//! 1234.5        ──► "1 234,50 Kč"     (group separator is U+00A0)
//! 2026-10-17    ──► "17. 10. 2026"
//! ```
//!
//! This is the only place where figures are rounded (to two decimals).

use chrono::NaiveDate;

/// Non-breaking space used between digit groups and before the currency.
pub const NBSP: char = '\u{a0}';

/// Formats an amount as Czech crowns with two decimals.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}{}Kč", amount, NBSP);
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let negative = amount < 0.0 && cents != 0;

    format!(
        "{}{},{:02}{}Kč",
        if negative { "-" } else { "" },
        group_thousands(whole),
        fraction,
        NBSP
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a date the way cs-CZ locales print it: `17. 10. 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d. %-m. %Y").to_string()
}

//! # Home Listing
//!
//! Turns the stored quote collection into the rows of the home screen.
//!
//! ## Pipeline
//! ```text
//! [Persisted<Quote>] ──► summarize (total per quote)
//!                    ──► sort by date, newest first (stable)
//!                    ──► QuoteFilter::matches
//!                    ──► [QuoteSummary]
//! ```
//!
//! Text filters are case-insensitive substring matches. The date filter is
//! an exact match. Empty filters accept everything.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{EntityId, Persisted, Quote};

/// Filter criteria of the home listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteFilter {
    pub quote_number: Option<String>,
    pub client_name: Option<String>,
    pub date: Option<NaiveDate>,
}

impl QuoteFilter {
    /// Returns true when the quote passes every set criterion.
    pub fn matches(&self, quote: &Quote) -> bool {
        contains_folded(&quote.quote_number, self.quote_number.as_deref())
            && contains_folded(&quote.to_name, self.client_name.as_deref())
            && self.date.map_or(true, |date| quote.date == Some(date))
    }
}

fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// One row of the home listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub id: EntityId,
    pub quote_number: String,
    pub date: Option<NaiveDate>,
    pub to_name: String,
    pub total: f64,
}

/// Builds the filtered, newest-first listing.
pub fn summarize(quotes: &[Persisted<Quote>], filter: &QuoteFilter) -> Vec<QuoteSummary> {
    let mut rows: Vec<QuoteSummary> = quotes
        .iter()
        .filter(|q| filter.matches(&q.fields))
        .map(|q| QuoteSummary {
            id: q.id.clone(),
            quote_number: q.fields.quote_number.clone(),
            date: q.fields.date,
            to_name: q.fields.to_name.clone(),
            total: q.fields.totals().total,
        })
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    fn stored(id: &str, number: &str, date: (i32, u32, u32), client: &str) -> Persisted<Quote> {
        Persisted::new(
            EntityId::from(id),
            Quote {
                quote_number: number.to_string(),
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
                to_name: client.to_string(),
                tax_rate: 21.0,
                line_items: vec![LineItem::new(EntityId::from("li"), "x", 1.0, 100.0)],
                ..Quote::default()
            },
        )
    }

    fn sample() -> Vec<Persisted<Quote>> {
        vec![
            stored("a", "0001", (2024, 1, 10), "Alfa s.r.o."),
            stored("b", "0002", (2024, 3, 5), "Beta a.s."),
            stored("c", "0003", (2024, 2, 1), "ALFA Group"),
        ]
    }

    #[test]
    fn test_sorted_newest_first_with_totals() {
        let rows = summarize(&sample(), &QuoteFilter::default());
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(rows[0].total, 121.0);
    }

    #[test]
    fn test_same_date_keeps_insertion_order() {
        let quotes = vec![
            stored("first", "1", (2024, 1, 1), ""),
            stored("second", "2", (2024, 1, 1), ""),
        ];
        let rows = summarize(&quotes, &QuoteFilter::default());
        assert_eq!(rows[0].id.as_str(), "first");
        assert_eq!(rows[1].id.as_str(), "second");
    }

    #[test]
    fn test_undated_quotes_sort_last() {
        let mut quotes = sample();
        quotes[1].fields.date = None;

        let rows = summarize(&quotes, &QuoteFilter::default());
        assert_eq!(rows.last().unwrap().id.as_str(), "b");
        assert_eq!(rows.last().unwrap().date, None);
    }

    #[test]
    fn test_client_filter_is_case_insensitive() {
        let filter = QuoteFilter {
            client_name: Some("alfa".to_string()),
            ..QuoteFilter::default()
        };
        let rows = summarize(&sample(), &filter);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_number_and_date_filters() {
        let filter = QuoteFilter {
            quote_number: Some("000".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            ..QuoteFilter::default()
        };
        let rows = summarize(&sample(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quote_number, "0002");
    }

    #[test]
    fn test_empty_text_filter_accepts_all() {
        let filter = QuoteFilter {
            quote_number: Some(String::new()),
            ..QuoteFilter::default()
        };
        assert_eq!(summarize(&sample(), &filter).len(), 3);
    }
}

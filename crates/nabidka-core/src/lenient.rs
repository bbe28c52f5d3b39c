//! Tolerant field codecs for stored payloads.
//!
//! Older payloads hold form values exactly as they were typed: numbers as
//! strings (`"taxRate": "15"`), a cleared date as `""`, and `null` where a
//! numeric input could not be parsed. These codecs read all of those
//! instead of rejecting the whole collection.
//!
//! | Stored value        | number field | date field   |
//! |---------------------|--------------|--------------|
//! | `21`, `21.5`        | as is        | -            |
//! | `"15"`, `" 1,5 "`   | parsed       | -            |
//! | `""`, `null`, junk  | `0.0`        | `None`       |
//! | `"2024-05-17"`      | -            | `Some(date)` |

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Reads a number that may be stored as a JSON number or a string.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_number(&s),
        _ => 0.0,
    })
}

fn parse_number(text: &str) -> f64 {
    let text = text.trim().replace(',', ".");
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub mod date {
    //! Optional `YYYY-MM-DD` date, written as `""` when absent.

    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "number")]
        rate: f64,
        #[serde(with = "date")]
        day: Option<NaiveDate>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_from_strings_and_junk() {
        assert_eq!(row(r#"{"rate": 21, "day": ""}"#).rate, 21.0);
        assert_eq!(row(r#"{"rate": "15", "day": ""}"#).rate, 15.0);
        assert_eq!(row(r#"{"rate": " 1,5 ", "day": ""}"#).rate, 1.5);
        assert_eq!(row(r#"{"rate": "", "day": ""}"#).rate, 0.0);
        assert_eq!(row(r#"{"rate": null, "day": ""}"#).rate, 0.0);
        assert_eq!(row(r#"{"rate": "abc", "day": ""}"#).rate, 0.0);
    }

    #[test]
    fn test_dates_empty_or_invalid_are_none() {
        assert_eq!(
            row(r#"{"rate": 0, "day": "2024-05-17"}"#).day,
            NaiveDate::from_ymd_opt(2024, 5, 17)
        );
        assert_eq!(row(r#"{"rate": 0, "day": ""}"#).day, None);
        assert_eq!(row(r#"{"rate": 0, "day": "17. 5. 2024"}"#).day, None);
        assert_eq!(row(r#"{"rate": 0, "day": null}"#).day, None);
    }

    #[test]
    fn test_missing_date_written_as_empty_string() {
        let json = serde_json::to_value(Row { rate: 1.0, day: None }).unwrap();
        assert_eq!(json["day"], "");

        let day = NaiveDate::from_ymd_opt(2024, 1, 2);
        let json = serde_json::to_value(Row { rate: 1.0, day }).unwrap();
        assert_eq!(json["day"], "2024-01-02");
    }
}

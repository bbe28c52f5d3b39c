//! # Validation Module
//!
//! Save-boundary validation for Nabídka entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command (apps/nabidka)                                       │
//! │  ├── Deserialization of the incoming record                            │
//! │  └── THIS MODULE: field rules, run before every save                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity Store (nabidka-store)                                 │
//! │  └── No validation. Stores whatever it is given.                       │
//! │                                                                         │
//! │  Calculation never validates: negative figures are computed as-is.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nabidka_core::validation::validate_item_template;
//! use nabidka_core::QuoteItemTemplate;
//!
//! let template = QuoteItemTemplate {
//!     description: "Konzultace".to_string(),
//!     unit_price: 900.0,
//! };
//! assert!(validate_item_template(&template).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{ClientAddress, Quote, QuoteItemTemplate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Rejects blank (empty or whitespace-only) text.
pub fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Accepts finite numbers that are zero or greater.
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates an address-book entry.
///
/// ## Rules
/// - `name`, `street`, `city`, `postalCode` and `country` must not be blank
/// - `houseNumber` is optional
pub fn validate_client_address(address: &ClientAddress) -> ValidationResult<()> {
    require_text("name", &address.name)?;
    require_text("street", &address.street)?;
    require_text("city", &address.city)?;
    require_text("postalCode", &address.postal_code)?;
    require_text("country", &address.country)?;
    Ok(())
}

/// Validates a saved line-item template.
pub fn validate_item_template(template: &QuoteItemTemplate) -> ValidationResult<()> {
    require_text("description", &template.description)?;
    validate_non_negative("unitPrice", template.unit_price)
}

/// Validates a quote before it is saved.
///
/// ## Rules
/// - `taxRate` is finite and ≥ 0
/// - every line item has a finite `quantity` ≥ 0 and `unitPrice` ≥ 0
///
/// Text fields may be empty: the document falls back to placeholders.
pub fn validate_quote(quote: &Quote) -> ValidationResult<()> {
    validate_non_negative("taxRate", quote.tax_rate)?;

    for (index, item) in quote.line_items.iter().enumerate() {
        validate_non_negative(&format!("lineItems[{index}].quantity"), item.quantity)?;
        validate_non_negative(&format!("lineItems[{index}].unitPrice"), item.unit_price)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, LineItem};

    fn address() -> ClientAddress {
        ClientAddress {
            name: "ACME".to_string(),
            street: "Dlouhá".to_string(),
            house_number: String::new(),
            city: "Praha".to_string(),
            postal_code: "110 00".to_string(),
            ..ClientAddress::default()
        }
    }

    #[test]
    fn test_address_without_house_number_is_valid() {
        assert!(validate_client_address(&address()).is_ok());
    }

    #[test]
    fn test_address_requires_postal_code() {
        let mut addr = address();
        addr.postal_code = "  ".to_string();
        assert_eq!(
            validate_client_address(&addr),
            Err(ValidationError::required("postalCode"))
        );
    }

    #[test]
    fn test_template_rules() {
        let mut template = QuoteItemTemplate {
            description: "Web".to_string(),
            unit_price: -1.0,
        };
        assert_eq!(
            validate_item_template(&template).unwrap_err().field(),
            "unitPrice"
        );

        template.unit_price = f64::NAN;
        assert!(matches!(
            validate_item_template(&template),
            Err(ValidationError::NotFinite { .. })
        ));

        template.description.clear();
        assert_eq!(
            validate_item_template(&template),
            Err(ValidationError::required("description"))
        );
    }

    #[test]
    fn test_quote_reports_offending_line() {
        let mut quote = Quote {
            tax_rate: 21.0,
            ..Quote::default()
        };
        quote.line_items.push(LineItem::new(EntityId::from("a"), "ok", 1.0, 10.0));
        quote.line_items.push(LineItem::new(EntityId::from("b"), "bad", -2.0, 10.0));

        let err = validate_quote(&quote).unwrap_err();
        assert_eq!(err.field(), "lineItems[1].quantity");
    }

    #[test]
    fn test_empty_quote_is_valid() {
        assert!(validate_quote(&Quote::default()).is_ok());
    }
}

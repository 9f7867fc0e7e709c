//! # Validation Module
//!
//! Input checks run by the caller before an invoice is saved.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Editor (browser)                                                       │
//! │  ├── free-form typing, nothing blocked                                  │
//! │  └── Save pressed                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_for_save()  ← THIS MODULE                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  InvoiceStore::save()  (stores whatever it is given)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator and the store never validate.
//!
//! ## Usage
//! ```rust
//! use gstbook_core::validation::{validate_gstin, validate_search_query};
//!
//! assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
//! assert_eq!(validate_search_query("  acme ").unwrap(), "acme");
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{GstRate, InvoiceData};
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Length of every GSTIN.
pub const GSTIN_LEN: usize = 15;

// =============================================================================
// Invoice Validators
// =============================================================================

/// Checks an invoice is complete enough to save.
///
/// ## Rules (first failure wins)
/// 1. invoice number is not blank
/// 2. buyer name is not blank
/// 3. there is at least one item
/// 4. at least one item has a description
/// 5. at least one item has a rate above zero
///
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::types::{InvoiceData, LineItem};
/// use gstbook_core::validation::validate_for_save;
///
/// let mut invoice = InvoiceData::default();
/// assert!(validate_for_save(&invoice).is_err());
///
/// invoice.details.invoice_no = "INV-20250115-042".to_string();
/// invoice.buyer.name = "Acme Events".to_string();
/// let mut item = LineItem::new(1);
/// item.description = "Stage lights".to_string();
/// item.unit_rate = Money::from_rupees(500);
/// invoice.items.push(item);
/// assert!(validate_for_save(&invoice).is_ok());
/// ```
pub fn validate_for_save(invoice: &InvoiceData) -> ValidationResult<()> {
    if invoice.details.invoice_no.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "invoice number".to_string(),
        });
    }

    if invoice.buyer.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "buyer name".to_string(),
        });
    }

    if invoice.items.is_empty() {
        return Err(ValidationError::NoneProvided {
            what: "item".to_string(),
        });
    }

    if !invoice
        .items
        .iter()
        .any(|item| !item.description.trim().is_empty())
    {
        return Err(ValidationError::NoneProvided {
            what: "item with a description".to_string(),
        });
    }

    if !invoice.items.iter().any(|item| item.unit_rate.is_positive()) {
        return Err(ValidationError::NoneProvided {
            what: "item with a rate".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a GSTIN.
///
/// ## Rules
/// - exactly 15 characters after trimming
/// - starts with a two-digit state code
/// - uppercase letters and digits only
///
/// ```rust
/// use gstbook_core::validation::validate_gstin;
///
/// assert!(validate_gstin("07AAACR5055K1Z5").is_ok());
/// assert!(validate_gstin("07aaacr5055k1z5").is_err());
/// assert!(validate_gstin("AA1234").is_err());
/// ```
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let gstin = gstin.trim();

    if gstin.is_empty() {
        return Err(ValidationError::Required {
            field: "GSTIN".to_string(),
        });
    }

    if gstin.chars().count() != GSTIN_LEN {
        return Err(ValidationError::InvalidFormat {
            field: "GSTIN".to_string(),
            reason: format!("must be {} characters", GSTIN_LEN),
        });
    }

    if !gstin.chars().take(2).all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "GSTIN".to_string(),
            reason: "must start with a two-digit state code".to_string(),
        });
    }

    if !gstin
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return Err(ValidationError::InvalidFormat {
            field: "GSTIN".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate percentage.
///
/// ## Rules
/// - between 0 and 100 inclusive
pub fn validate_tax_rate(rate: GstRate) -> ValidationResult<()> {
    let percent = rate.percent();
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

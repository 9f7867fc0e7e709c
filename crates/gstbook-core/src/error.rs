//! # Error Types
//!
//! Domain-specific error types for gstbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gstbook-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Save-time and field validation failures         │
//! │                                                                         │
//! │  gstbook-store errors (separate crate)                                  │
//! │  └── StoreError       - Slot I/O and encoding failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UI toast                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! GST arithmetic never fails. A negative quantity or a discount larger than
//! the amount simply produces a negative result for the UI to flag. Looking
//! up or deleting a missing invoice is not an error either.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The invoice cannot be saved as it stands.
    ///
    /// ## User Workflow
    /// ```text
    /// Save pressed
    ///      │
    ///      ▼
    /// validate_for_save()
    ///      │
    ///      ▼
    /// Validation(Required { field: "buyer name" })
    ///      │
    ///      ▼
    /// UI shows: "buyer name is required"
    /// ```
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A collection that needs at least one entry is empty.
    #[error("at least one {what} is required")]
    NoneProvided { what: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

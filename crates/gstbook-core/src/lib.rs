//! # gstbook-core: Pure Business Logic for gstbook
//!
//! GST tax invoice arithmetic, wording and list queries as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gstbook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Browser UI (React)                           │    │
//! │  │    Invoice Editor ──► Print View      Admin List ──► Stats      │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ generated TypeScript types             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ gstbook-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐   │    │
//! │  │   │  calc   │ │ summary │ │  words  │ │  query  │ │validate │   │    │
//! │  │   │LineItem │ │ totals  │ │ ₹ → text│ │ filter  │ │  rules  │   │    │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 gstbook-store (Persistence)                     │    │
//! │  │         SQLite slot, InvoiceStore, migrations, config           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Party, LineItem, InvoiceData, SavedInvoice)
//! - [`money`] - Money type in whole paise
//! - [`calc`] - Line item tax calculator
//! - [`summary`] - Invoice totals
//! - [`words`] - Amount in words, Indian numbering
//! - [`query`] - Invoice list filtering, sorting and statistics
//! - [`invoice`] - Invoice numbers, the default template, finalizing totals
//! - [`validation`] - Save-time checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gstbook_core::calc::calculate_item;
//! use gstbook_core::money::Money;
//! use gstbook_core::types::LineItem;
//! use gstbook_core::words::amount_in_words;
//!
//! let mut item = LineItem::new(1);
//! item.unit_rate = Money::from_rupees(1000);
//! let item = calculate_item(&item);
//!
//! assert_eq!(item.line_total.to_string(), "₹1,180.00");
//! assert_eq!(
//!     amount_in_words(item.line_total),
//!     "One Thousand One Hundred and Eighty Rupees Only"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod coerce;

pub mod calc;
pub mod error;
pub mod invoice;
pub mod money;
pub mod query;
pub mod summary;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use query::{InvoiceQuery, InvoiceStats};
pub use summary::InvoiceSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the invoice list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "saved_invoices";

/// India Standard Time, +05:30, in minutes east of UTC.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Longest accepted search query, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Customer filter value that matches every buyer.
pub const CUSTOMER_FILTER_ALL: &str = "all";

//! # gstbook-store: Persistence Layer for gstbook
//!
//! Keeps saved invoices in a durable key-value slot backed by SQLite, with
//! sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gstbook Data Flow                                │
//! │                                                                         │
//! │  Editor: Save pressed                                                   │
//! │       │  invoice.prepare_for_save()   (gstbook-core)                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  gstbook-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │ InvoiceStore  │    │   Database    │    │  Migrations  │    │    │
//! │  │   │ (invoices.rs) │───►│   (pool.rs)   │    │  (embedded)  │    │    │
//! │  │   │ upsert/delete │    │ SlotRepository│    │ 001_slots    │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │  SQLite: storage_slots["saved_invoices"] = [ {...}, {...} ]     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Storage slot access
//! - [`invoices`] - The saved invoice list
//! - [`config`] - Environment settings
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gstbook_store::{Database, InvoiceStore, StoreSettings};
//!
//! let settings = StoreSettings::from_env();
//! let db = Database::new(settings.db_config()).await?;
//! let mut store = InvoiceStore::open(&db, &settings.storage_key).await?;
//!
//! let summary = invoice.prepare_for_save()?;
//! store.save(invoice, summary.total_amount).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod invoices;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreSettings;
pub use error::{StoreError, StoreResult};
pub use invoices::InvoiceStore;
pub use pool::{Database, DbConfig};
pub use repository::slot::SlotRepository;

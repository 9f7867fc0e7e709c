//! # Repository Module
//!
//! Database access behind small, typed handles.
//!
//! ```text
//! InvoiceStore
//!      │  slots.write("saved_invoices", <json array>)
//!      ▼
//! SlotRepository ── read / write / delete
//!      │
//!      ▼
//! storage_slots (key, value, updated_at)
//! ```
//!
//! ## Available Repositories
//!
//! - [`slot::SlotRepository`] - Durable key-value slots

pub mod slot;

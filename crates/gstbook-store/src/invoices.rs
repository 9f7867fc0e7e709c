//! # Invoice Record Store
//!
//! The saved invoice list: an ordered, in-memory collection kept in step
//! with one durable storage slot.
//!
//! ## Write-Through
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(invoice, total)                                                   │
//! │       │                                                                 │
//! │       ├── invoiceNo already stored? → replace in place (same position)  │
//! │       └── otherwise                 → insert at the front               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serialize the WHOLE list → slots.write(key, json) → await              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return SavedInvoice                                                    │
//! │                                                                         │
//! │  A failed write is reported, but the in-memory change stays.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! At most one record per invoice number. Loading a slot that breaks this
//! keeps the first occurrence.

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use gstbook_core::query::{InvoiceQuery, InvoiceStats};
use gstbook_core::{InvoiceData, Money, SavedInvoice};

use crate::error::StoreResult;
use crate::pool::Database;
use crate::repository::slot::SlotRepository;

/// Saved invoices, most recently created first.
#[derive(Debug)]
pub struct InvoiceStore {
    slots: SlotRepository,
    key: String,
    invoices: Vec<SavedInvoice>,
}

impl InvoiceStore {
    /// Loads the list stored under `key`.
    ///
    /// A missing slot gives an empty store. So does a slot holding anything
    /// other than a JSON array of invoices; that case is logged and is not
    /// an error. Only a failed database read is.
    pub async fn open(db: &Database, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let slots = db.slots();

        let invoices = match slots.read(&key).await? {
            None => {
                debug!(key = %key, "No saved invoices yet");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<SavedInvoice>>(&raw) {
                Ok(loaded) => dedupe(loaded),
                Err(e) => {
                    warn!(key = %key, error = %e, "Saved invoices are unreadable, starting empty");
                    Vec::new()
                }
            },
        };

        info!(key = %key, count = invoices.len(), "Invoice store opened");
        Ok(InvoiceStore {
            slots,
            key,
            invoices,
        })
    }

    /// Saves a snapshot of `invoice` with `total_amount`, stamped now.
    pub async fn save(
        &mut self,
        invoice: InvoiceData,
        total_amount: Money,
    ) -> StoreResult<SavedInvoice> {
        self.save_at(invoice, total_amount, Utc::now()).await
    }

    /// [`save`](Self::save) with an explicit `saved_at`.
    pub async fn save_at(
        &mut self,
        invoice: InvoiceData,
        total_amount: Money,
        saved_at: DateTime<Utc>,
    ) -> StoreResult<SavedInvoice> {
        let record = SavedInvoice::new(invoice, total_amount, saved_at);

        match self.position(record.invoice_no()) {
            Some(index) => {
                debug!(invoice_no = %record.invoice_no(), index, "Replacing saved invoice");
                self.invoices[index] = record.clone();
            }
            None => {
                debug!(invoice_no = %record.invoice_no(), "Adding saved invoice");
                self.invoices.insert(0, record.clone());
            }
        }

        self.persist().await?;
        Ok(record)
    }

    /// Removes the invoice numbered `invoice_no`. Returns whether one was
    /// removed; a missing invoice is a no-op and writes nothing.
    pub async fn delete(&mut self, invoice_no: &str) -> StoreResult<bool> {
        let Some(index) = self.position(invoice_no) else {
            debug!(invoice_no = %invoice_no, "Delete of unknown invoice ignored");
            return Ok(false);
        };

        self.invoices.remove(index);
        debug!(invoice_no = %invoice_no, "Deleted saved invoice");

        self.persist().await?;
        Ok(true)
    }

    /// Exact-match lookup by invoice number.
    pub fn get(&self, invoice_no: &str) -> Option<&SavedInvoice> {
        self.invoices
            .iter()
            .find(|invoice| invoice.invoice_no() == invoice_no)
    }

    /// Case-insensitive substring search over invoice number, buyer name
    /// and consignee name, in stored order. An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<&SavedInvoice> {
        let needle = query.to_lowercase();
        self.invoices
            .iter()
            .filter(|invoice| {
                invoice.invoice_no().to_lowercase().contains(&needle)
                    || invoice.buyer_name().to_lowercase().contains(&needle)
                    || invoice.consignee_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Runs an admin list query over the stored invoices.
    pub fn query(&self, query: &InvoiceQuery, now: DateTime<FixedOffset>) -> Vec<&SavedInvoice> {
        query.apply(&self.invoices, now)
    }

    /// Dashboard statistics over every stored invoice.
    pub fn stats(&self, now: DateTime<FixedOffset>) -> InvoiceStats {
        InvoiceStats::compute(&self.invoices, now)
    }

    /// Every stored invoice, most recently created first.
    pub fn all(&self) -> &[SavedInvoice] {
        &self.invoices
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// The slot key this store persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn position(&self, invoice_no: &str) -> Option<usize> {
        self.invoices
            .iter()
            .position(|invoice| invoice.invoice_no() == invoice_no)
    }

    async fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.invoices)?;
        self.slots.write(&self.key, &json).await?;
        debug!(key = %self.key, count = self.invoices.len(), "Invoice list persisted");
        Ok(())
    }
}

/// Keeps the first record for each invoice number.
fn dedupe(invoices: Vec<SavedInvoice>) -> Vec<SavedInvoice> {
    let total = invoices.len();
    let mut seen = HashSet::new();
    let unique: Vec<SavedInvoice> = invoices
        .into_iter()
        .filter(|invoice| seen.insert(invoice.invoice_no().to_string()))
        .collect();

    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "Saved invoices had duplicate numbers, kept the first of each"
        );
    }
    unique
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Invoice Helpers
//!
//! Invoice numbering, the blank "create invoice" template, and keeping an
//! invoice's totals in step with its items.
//!
//! ## Editing Lifecycle
//! ```text
//! default_invoice(company, now)
//!      │
//!      ▼
//! user edits items ──► add_item / remove_item / item.recalculate()
//!      │
//!      ▼
//! prepare_for_save()  = finalize() + validate_for_save()
//!      │
//!      ▼
//! InvoiceStore::save(invoice, summary.total_amount)
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calc::renumber_items;
use crate::error::CoreResult;
use crate::money::Money;
use crate::summary::InvoiceSummary;
use crate::types::{Company, InvoiceData, InvoiceDetails, LineItem, Party};
use crate::validation::validate_for_save;
use crate::words::amount_in_words;

/// Payment terms pre-filled on a new invoice.
pub const DEFAULT_PAYMENT_TERMS: &str = "Net 30 Days";

/// Description of the template's single line item.
pub const DEFAULT_ITEM_DESCRIPTION: &str = "Event Equipment Rental";

/// SAC code for rental services, used on the template item.
pub const DEFAULT_ITEM_HSN: &str = "9966";

// =============================================================================
// Invoice Numbers
// =============================================================================

/// Generates an invoice number for `date`: `INV-YYYYMMDD-NNN`, where NNN is
/// random in 000-999.
///
/// Numbers are not guaranteed unique. Saving a second invoice under the same
/// number replaces the first.
///
/// ```rust
/// use chrono::NaiveDate;
/// use gstbook_core::invoice::generate_invoice_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let number = generate_invoice_number(date);
/// assert!(number.starts_with("INV-20250115-"));
/// assert_eq!(number.len(), 16);
/// ```
pub fn generate_invoice_number(date: NaiveDate) -> String {
    let suffix = (Uuid::new_v4().as_u128() % 1000) as u16;
    format_invoice_number(date, suffix)
}

/// Formats an invoice number with an explicit suffix (taken modulo 1000).
pub fn format_invoice_number(date: NaiveDate, suffix: u16) -> String {
    format!("INV-{}-{:03}", date.format("%Y%m%d"), suffix % 1000)
}

// =============================================================================
// Template
// =============================================================================

/// The invoice the editor opens with: today's date, a fresh number, empty
/// buyer and consignee, and one ₹1,000 rental line at 9% + 9%.
///
/// Already finalized, so the totals read ₹1,180.00 / ₹180.00.
pub fn default_invoice(company: Company, now: DateTime<FixedOffset>) -> InvoiceData {
    let mut item = LineItem::new(1);
    item.description = DEFAULT_ITEM_DESCRIPTION.to_string();
    item.hsn_code = DEFAULT_ITEM_HSN.to_string();
    item.quantity = Decimal::ONE;
    item.unit_rate = Money::from_rupees(1000);

    let blank_party = Party {
        place_of_supply: Some(String::new()),
        ..Party::default()
    };

    let mut invoice = InvoiceData {
        company,
        consignee: blank_party.clone(),
        buyer: blank_party,
        details: InvoiceDetails {
            invoice_no: generate_invoice_number(now.date_naive()),
            date: now.with_timezone(&Utc),
            mode_of_payment: DEFAULT_PAYMENT_TERMS.to_string(),
            ..InvoiceDetails::default()
        },
        items: vec![item],
        ..InvoiceData::default()
    };
    invoice.finalize();
    invoice
}

// =============================================================================
// Keeping Totals in Step
// =============================================================================

impl InvoiceData {
    /// Recalculates every item and refreshes `total_amount` (including
    /// tax), `total_tax` and `total_amount_in_words`.
    ///
    /// Returns the summary the totals were taken from.
    pub fn finalize(&mut self) -> InvoiceSummary {
        for item in &mut self.items {
            item.recalculate();
        }

        let summary = InvoiceSummary::from_items(&self.items);
        self.total_amount = summary.total_amount;
        self.total_tax = summary.total_tax;
        self.total_amount_in_words = amount_in_words(summary.total_amount);
        summary
    }

    /// Finalizes the totals, then runs the save-time checks.
    ///
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone};
    /// use gstbook_core::invoice::default_invoice;
    /// use gstbook_core::types::Company;
    ///
    /// let now = FixedOffset::east_opt(19_800).unwrap()
    ///     .with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
    /// let mut invoice = default_invoice(Company::default(), now);
    ///
    /// // No buyer yet
    /// assert!(invoice.prepare_for_save().is_err());
    ///
    /// invoice.buyer.name = "Acme Events".to_string();
    /// let summary = invoice.prepare_for_save().unwrap();
    /// assert_eq!(summary.total_amount.paise(), 118_000);
    /// ```
    pub fn prepare_for_save(&mut self) -> CoreResult<InvoiceSummary> {
        let summary = self.finalize();
        validate_for_save(self)?;
        Ok(summary)
    }

    /// Appends a blank line item (see [`LineItem::new`]) and refreshes the
    /// totals. Returns the new item's id.
    pub fn add_item(&mut self) -> String {
        let mut item = LineItem::new(self.items.len() as u32 + 1);
        item.recalculate();
        let id = item.id.clone();
        self.items.push(item);
        self.finalize();
        id
    }

    /// Removes the item with `id`, renumbers the rest and refreshes the
    /// totals. Returns whether an item was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }

        renumber_items(&mut self.items);
        self.finalize();
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 15, 23, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_invoice_number_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_invoice_number(date, 7), "INV-20250105-007");
        assert_eq!(format_invoice_number(date, 999), "INV-20250105-999");
        assert_eq!(format_invoice_number(date, 1042), "INV-20250105-042");

        for _ in 0..50 {
            let number = generate_invoice_number(date);
            assert!(number.starts_with("INV-20250105-"));
            let suffix: u16 = number[13..].parse().unwrap();
            assert!(suffix < 1000);
        }
    }

    #[test]
    fn test_default_invoice_totals() {
        let company = Company {
            name: "Rent My Event".to_string(),
            state_code: "07".to_string(),
            ..Company::default()
        };
        let invoice = default_invoice(company, now());

        assert_eq!(invoice.company.name, "Rent My Event");
        assert_eq!(invoice.items.len(), 1);
        let item = &invoice.items[0];
        assert_eq!(item.description, DEFAULT_ITEM_DESCRIPTION);
        assert_eq!(item.hsn_code, "9966");
        assert_eq!(item.line_total, Money::from_rupees(1180));

        assert_eq!(invoice.total_amount, Money::from_rupees(1180));
        assert_eq!(invoice.total_tax, Money::from_rupees(180));
        assert_eq!(
            invoice.total_amount_in_words,
            "One Thousand One Hundred and Eighty Rupees Only"
        );
        assert_eq!(invoice.details.mode_of_payment, "Net 30 Days");
    }

    #[test]
    fn test_default_invoice_uses_local_date() {
        // 23:30 IST on the 15th is still the 15th locally
        let invoice = default_invoice(Company::default(), now());
        assert!(invoice.invoice_no().starts_with("INV-20250115-"));
        assert_eq!(invoice.details.date, now().with_timezone(&Utc));
    }

    #[test]
    fn test_finalize_uses_grand_total() {
        let mut invoice = default_invoice(Company::default(), now());
        invoice.items[0].discount = Money::from_rupees(100);
        let summary = invoice.finalize();

        assert_eq!(summary.taxable_amount, Money::from_rupees(900));
        assert_eq!(invoice.total_tax, Money::from_rupees(162));
        assert_eq!(invoice.total_amount, Money::from_rupees(1062));
        assert_eq!(
            invoice.total_amount_in_words,
            "One Thousand Sixty Two Rupees Only"
        );
    }

    #[test]
    fn test_prepare_for_save_reports_validation() {
        let mut invoice = default_invoice(Company::default(), now());
        let err = invoice.prepare_for_save().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        invoice.buyer.name = "Acme Events".to_string();
        assert!(invoice.prepare_for_save().is_ok());
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut invoice = default_invoice(Company::default(), now());
        let second = invoice.add_item();
        let third = invoice.add_item();
        assert_eq!(invoice.items.len(), 3);
        assert_eq!(invoice.items[2].sr_no, 3);

        invoice.items[1].unit_rate = Money::from_rupees(500);
        invoice.finalize();
        assert_eq!(invoice.total_amount, Money::from_rupees(1770));

        assert!(invoice.remove_item(&second));
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[1].id, third);
        assert_eq!(invoice.items[1].sr_no, 2);
        assert_eq!(invoice.total_amount, Money::from_rupees(1180));

        assert!(!invoice.remove_item("missing"));
    }
}

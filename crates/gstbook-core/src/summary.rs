//! # Invoice Summary
//!
//! Totals across the line items of one invoice, as printed in the footer
//! row of the item table and in the tax breakup.
//!
//! ```text
//! items ──► Σ quantity, amount, discount, taxableValue,
//!           Σ sgst, cgst, igst, lineTotal
//!              │
//!              ▼
//!          InvoiceSummary  (totalTax = sgst + cgst + igst)
//! ```
//!
//! Money fields are whole paise, so the sums are exact and independent of
//! item order. The quantity sum is rounded once to two places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce;
use crate::money::Money;
use crate::types::LineItem;

/// Aggregated invoice totals. Purely derived from the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceSummary {
    #[serde(
        serialize_with = "coerce::serialize_decimal",
        deserialize_with = "coerce::deserialize_decimal"
    )]
    #[ts(type = "number")]
    pub total_quantity: Decimal,

    #[ts(type = "number")]
    pub amount: Money,
    #[ts(type = "number")]
    pub discount: Money,
    #[ts(type = "number")]
    pub taxable_amount: Money,
    #[ts(type = "number")]
    pub cgst: Money,
    #[ts(type = "number")]
    pub sgst: Money,
    #[ts(type = "number")]
    pub igst: Money,
    #[ts(type = "number")]
    pub total_tax: Money,
    #[ts(type = "number")]
    pub total_amount: Money,
}

impl InvoiceSummary {
    /// Sums the derived fields of `items`. An empty slice gives all zeros.
    ///
    /// ```rust
    /// use gstbook_core::calc::calculate_item;
    /// use gstbook_core::money::Money;
    /// use gstbook_core::summary::InvoiceSummary;
    /// use gstbook_core::types::LineItem;
    ///
    /// let mut item = LineItem::new(1);
    /// item.unit_rate = Money::from_rupees(1000);
    /// let items = vec![calculate_item(&item)];
    ///
    /// let summary = InvoiceSummary::from_items(&items);
    /// assert_eq!(summary.total_tax, Money::from_rupees(180));
    /// assert_eq!(summary.total_amount, Money::from_rupees(1180));
    /// ```
    pub fn from_items(items: &[LineItem]) -> Self {
        let mut summary = items.iter().fold(InvoiceSummary::default(), |mut acc, item| {
            acc.total_quantity = acc.total_quantity.saturating_add(item.quantity);
            acc.amount += item.amount;
            acc.discount += item.discount;
            acc.taxable_amount += item.taxable_value;
            acc.sgst += item.sgst_amount;
            acc.cgst += item.cgst_amount;
            acc.igst += item.igst_amount;
            acc.total_amount += item.line_total;
            acc
        });

        summary.total_quantity = summary
            .total_quantity
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        summary.total_tax = summary.sgst + summary.cgst + summary.igst;
        summary
    }

    /// True when the invoice crosses state lines (any IGST collected).
    pub fn has_igst(&self) -> bool {
        !self.igst.is_zero()
    }
}

//! # Line Item Tax Calculator
//!
//! Derives every computed field of a [`LineItem`] from its inputs.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  amount        = round(unitRate × quantity)                             │
//! │  taxableValue  = amount − discount            (may go negative)         │
//! │  sgstAmount    = round(taxableValue × sgstRate / 100)                   │
//! │  cgstAmount    = round(taxableValue × cgstRate / 100)                   │
//! │  igstAmount    = round(taxableValue × igstRate / 100)                   │
//! │  lineTotal     = taxableValue + sgst + cgst + igst                      │
//! │                                                                         │
//! │  round = half-up to whole paise, applied per field                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three tax components are summed unconditionally. Whether an item
//! carries CGST+SGST or IGST is decided when the rates are set
//! ([`LineItem::apply_gst_percent`]), not here.
//!
//! There is no validation: the calculator is pure arithmetic and a negative
//! quantity simply yields a negative amount.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::{GstRate, LineItem, SupplyType};

/// Returns a copy of `item` with all derived fields recomputed.
///
/// ## Example
/// ```rust
/// use gstbook_core::calc::calculate_item;
/// use gstbook_core::money::Money;
/// use gstbook_core::types::{GstRate, LineItem};
///
/// let mut item = LineItem::new(1);
/// item.unit_rate = Money::from_rupees(1000);
///
/// let item = calculate_item(&item);
/// assert_eq!(item.sgst_amount, Money::from_rupees(90));
/// assert_eq!(item.line_total, Money::from_rupees(1180));
/// ```
pub fn calculate_item(item: &LineItem) -> LineItem {
    let mut calculated = item.clone();
    calculated.recalculate();
    calculated
}

impl LineItem {
    /// Recomputes the derived fields in place.
    pub fn recalculate(&mut self) {
        self.amount = self.unit_rate.multiply_quantity(self.quantity);
        self.taxable_value = self.amount - self.discount;
        self.sgst_amount = self.taxable_value.apply_rate(self.sgst_rate);
        self.cgst_amount = self.taxable_value.apply_rate(self.cgst_rate);
        self.igst_amount = self.taxable_value.apply_rate(self.igst_rate);
        self.line_total =
            self.taxable_value + self.sgst_amount + self.cgst_amount + self.igst_amount;
    }

    /// Sets the component rates for a combined GST percentage and
    /// recalculates.
    ///
    /// ```text
    /// 18%, IntraState  →  SGST 9%  + CGST 9%  + IGST 0%
    /// 18%, InterState  →  SGST 0%  + CGST 0%  + IGST 18%
    /// ```
    pub fn apply_gst_percent(&mut self, percent: GstRate, supply: SupplyType) {
        let split = GstSplit::new(percent, supply);
        self.sgst_rate = split.sgst;
        self.cgst_rate = split.cgst;
        self.igst_rate = split.igst;
        self.recalculate();
    }
}

/// A GST percentage broken into its SGST / CGST / IGST components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GstSplit {
    pub sgst: GstRate,
    pub cgst: GstRate,
    pub igst: GstRate,
}

impl GstSplit {
    pub fn new(percent: GstRate, supply: SupplyType) -> Self {
        match supply {
            SupplyType::IntraState => GstSplit {
                sgst: percent.half(),
                cgst: percent.half(),
                igst: GstRate::zero(),
            },
            SupplyType::InterState => GstSplit {
                sgst: GstRate::zero(),
                cgst: GstRate::zero(),
                igst: percent,
            },
        }
    }
}

/// Reassigns serial numbers 1..=n in list order, e.g. after a row is
/// deleted.
pub fn renumber_items(items: &mut [LineItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.sr_no = index as u32 + 1;
    }
}

/// Convenience for callers holding raw numbers (tests, seeding).
pub fn line_item(
    description: &str,
    hsn_code: &str,
    unit_rate: Money,
    quantity: Decimal,
    percent: GstRate,
    supply: SupplyType,
) -> LineItem {
    let mut item = LineItem::new(1);
    item.description = description.to_string();
    item.hsn_code = hsn_code.to_string();
    item.unit_rate = unit_rate;
    item.quantity = quantity;
    item.apply_gst_percent(percent, supply);
    item
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rate_paise: i64, quantity: Decimal, discount_paise: i64) -> LineItem {
        LineItem {
            unit_rate: Money::from_paise(rate_paise),
            quantity,
            discount: Money::from_paise(discount_paise),
            sgst_rate: GstRate::from_percent(9),
            cgst_rate: GstRate::from_percent(9),
            igst_rate: GstRate::zero(),
            ..LineItem::new(1)
        }
    }

    #[test]
    fn test_default_invoice_scenario() {
        let calculated = calculate_item(&item(100_000, Decimal::ONE, 0));

        assert_eq!(calculated.amount.paise(), 100_000);
        assert_eq!(calculated.taxable_value.paise(), 100_000);
        assert_eq!(calculated.sgst_amount.paise(), 9_000);
        assert_eq!(calculated.cgst_amount.paise(), 9_000);
        assert_eq!(calculated.igst_amount.paise(), 0);
        assert_eq!(calculated.line_total.paise(), 118_000);
    }

    #[test]
    fn test_amount_independent_of_discount_and_rates() {
        let quantities = [Decimal::ZERO, Decimal::ONE, Decimal::new(25, 1), Decimal::from(7)];
        let rates = [0_i64, 1, 3_333, 99_999];

        for quantity in quantities {
            for rate in rates {
                let expected = Money::from_decimal(Decimal::new(rate, 2) * quantity);

                let mut plain = item(rate, quantity, 0);
                plain.sgst_rate = GstRate::zero();
                plain.cgst_rate = GstRate::zero();

                let mut taxed = item(rate, quantity, 500);
                taxed.igst_rate = GstRate::from_percent(28);

                assert_eq!(calculate_item(&plain).amount, expected);
                assert_eq!(calculate_item(&taxed).amount, expected);
            }
        }
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let once = calculate_item(&item(3_333, Decimal::new(15, 1), 125));
        let twice = calculate_item(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rounds_each_field_half_up() {
        // ₹10.50 at 9% = ₹0.945 → ₹0.95 per component
        let calculated = calculate_item(&item(1_050, Decimal::ONE, 0));
        assert_eq!(calculated.sgst_amount.paise(), 95);
        assert_eq!(calculated.cgst_amount.paise(), 95);
        assert_eq!(calculated.line_total.paise(), 1_050 + 95 + 95);
    }

    #[test]
    fn test_discount_larger_than_amount_goes_negative() {
        let calculated = calculate_item(&item(10_000, Decimal::ONE, 15_000));
        assert_eq!(calculated.taxable_value.paise(), -5_000);
        assert_eq!(calculated.sgst_amount.paise(), -450);
        assert_eq!(calculated.line_total.paise(), -5_000 - 450 - 450);
    }

    #[test]
    fn test_all_tax_components_are_summed() {
        let mut both = item(10_000, Decimal::ONE, 0);
        both.igst_rate = GstRate::from_percent(18);
        let calculated = calculate_item(&both);
        assert_eq!(calculated.tax_amount().paise(), 900 + 900 + 1_800);
        assert_eq!(calculated.line_total.paise(), 10_000 + 3_600);
    }

    #[test]
    fn test_negative_quantity_is_not_rejected() {
        let calculated = calculate_item(&item(10_000, Decimal::from(-2), 0));
        assert_eq!(calculated.amount.paise(), -20_000);
    }

    #[test]
    fn test_oversized_stored_rate_clamps() {
        let mut loaded: LineItem = serde_json::from_str(
            r#"{"rate":"100000000000000000000","quantity":2,"sgstRate":9,"cgstRate":9}"#,
        )
        .unwrap();
        assert_eq!(loaded.unit_rate.paise(), i64::MAX);

        loaded.recalculate();
        assert_eq!(loaded.amount.paise(), i64::MAX);
        assert_eq!(loaded.taxable_value.paise(), i64::MAX);
        assert!(loaded.sgst_amount.is_positive());
        assert_eq!(loaded.line_total.paise(), i64::MAX);
    }

    #[test]
    fn test_apply_gst_percent_intra_state() {
        let mut row = item(100_000, Decimal::ONE, 0);
        row.apply_gst_percent(GstRate::from_percent(18), SupplyType::IntraState);
        assert_eq!(row.sgst_rate, GstRate::from_percent(9));
        assert_eq!(row.cgst_rate, GstRate::from_percent(9));
        assert_eq!(row.igst_rate, GstRate::zero());
        assert_eq!(row.line_total, Money::from_rupees(1180));
    }

    #[test]
    fn test_apply_gst_percent_inter_state() {
        let mut row = item(100_000, Decimal::ONE, 0);
        row.apply_gst_percent(GstRate::from_percent(18), SupplyType::InterState);
        assert_eq!(row.sgst_rate, GstRate::zero());
        assert_eq!(row.cgst_rate, GstRate::zero());
        assert_eq!(row.igst_rate, GstRate::from_percent(18));
        assert_eq!(row.igst_amount, Money::from_rupees(180));
        assert_eq!(row.line_total, Money::from_rupees(1180));
    }

    #[test]
    fn test_renumber_items() {
        let mut items = vec![LineItem::new(1), LineItem::new(2), LineItem::new(3)];
        items.remove(1);
        renumber_items(&mut items);
        let numbers: Vec<u32> = items.iter().map(|i| i.sr_no).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}

//! # Domain Types
//!
//! Core domain types used throughout gstbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           SavedInvoice                                  │
//! │   savedAt ──────────────┐                                               │
//! │                         ▼                                               │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                        InvoiceData                                │  │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐        │  │
//! │  │  │ Company  │ │  Party   │ │  Party   │ │ InvoiceDetails │        │  │
//! │  │  │ (seller) │ │ (buyer)  │ │(consignee│ │ invoiceNo (KEY)│        │  │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────────────┘        │  │
//! │  │  ┌──────────────────────────────────┐  totalAmount                │  │
//! │  │  │ items: Vec<LineItem>             │  totalTax                   │  │
//! │  │  │  inputs: rate, qty, discount,    │  totalAmountInWords         │  │
//! │  │  │          sgst/cgst/igst rates    │                             │  │
//! │  │  │  derived: amount … lineTotal     │                             │  │
//! │  │  └──────────────────────────────────┘                             │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A saved invoice freezes the company, parties and items exactly as they
//! were when the user pressed save. Nothing here references other records.
//!
//! ## Persisted Names
//! Field names serialize in camelCase. Line items also accept the browser
//! app's older `hsn` / `rate` / `total` keys.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::coerce;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// GST Rate
// =============================================================================

/// A GST component rate as a percentage (`9` = 9%).
///
/// ## Why a Decimal Percentage?
/// Real GST slabs split into fractional halves: 0.25% becomes
/// 0.125% CGST + 0.125% SGST, which basis points cannot hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GstRate(Decimal);

impl GstRate {
    /// Creates a rate from a percentage.
    pub fn from_percent(percent: impl Into<Decimal>) -> Self {
        GstRate(percent.into())
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Half of this rate, used to split GST into equal CGST and SGST parts.
    pub fn half(&self) -> Self {
        GstRate((self.0 / Decimal::TWO).normalize())
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl FromStr for GstRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%').trim();
        Decimal::from_str(trimmed)
            .map(GstRate)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "tax rate".to_string(),
                reason: format!("'{}' is not a percentage", s),
            })
    }
}

impl Serialize for GstRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        coerce::serialize_decimal(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for GstRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        coerce::deserialize_decimal(deserializer).map(GstRate)
    }
}

// =============================================================================
// Supply Type
// =============================================================================

/// Whether a supply stays within one state (CGST + SGST) or crosses state
/// lines (IGST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Seller and place of supply are in the same state.
    IntraState,
    /// Seller and place of supply are in different states.
    InterState,
}

impl Default for SupplyType {
    fn default() -> Self {
        SupplyType::IntraState
    }
}

impl SupplyType {
    /// Decides the supply type from the seller and the buyer.
    ///
    /// The buyer's state is taken from, in order: its explicit state code,
    /// the first two digits of its GSTIN, its state name. When the buyer's
    /// state is unknown the supply is treated as intra-state.
    pub fn between(seller: &Company, buyer: &Party) -> Self {
        let seller_code = seller.state_code.trim();
        let buyer_code = buyer
            .state_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .or_else(|| gstin_state_code(&buyer.gstin));

        if let Some(buyer_code) = buyer_code {
            if !seller_code.is_empty() {
                return if buyer_code == seller_code {
                    SupplyType::IntraState
                } else {
                    SupplyType::InterState
                };
            }
        }

        let seller_state = seller.state.trim();
        let buyer_state = buyer.state.trim();
        if seller_state.is_empty()
            || buyer_state.is_empty()
            || seller_state.eq_ignore_ascii_case(buyer_state)
        {
            SupplyType::IntraState
        } else {
            SupplyType::InterState
        }
    }
}

/// The two-digit state code a GSTIN starts with.
fn gstin_state_code(gstin: &str) -> Option<&str> {
    let gstin = gstin.trim();
    let code = gstin.get(0..2)?;
    code.chars().all(|c| c.is_ascii_digit()).then_some(code)
}

// =============================================================================
// Company (Seller)
// =============================================================================

/// The business issuing the invoice, with the bank details printed in the
/// footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub gstin: String,
    pub state: String,
    pub state_code: String,
    pub bank_name: String,
    pub account_no: String,
    pub ifsc_code: String,
    pub branch_address: String,
    pub account_holder_name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    /// Logo as a URL or data URI.
    pub logo: Option<String>,
}

// =============================================================================
// Party (Buyer / Consignee)
// =============================================================================

/// A buyer ("billed to") or consignee ("shipped to").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    #[serde(deserialize_with = "coerce::deserialize_string")]
    pub name: String,
    pub address: String,
    #[serde(deserialize_with = "coerce::deserialize_string")]
    pub gstin: String,
    pub state: String,
    pub state_code: Option<String>,
    pub place_of_supply: Option<String>,
}

// =============================================================================
// Invoice Details
// =============================================================================

/// Header fields of a tax invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetails {
    /// Business key of the invoice. Unique within the store.
    #[serde(deserialize_with = "coerce::deserialize_string")]
    pub invoice_no: String,

    #[serde(deserialize_with = "coerce::deserialize_date")]
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    #[serde(deserialize_with = "coerce::deserialize_optional_date")]
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,

    pub delivery_note: String,
    pub mode_of_payment: String,
    pub supplier_ref: String,
    pub other_references: String,
    pub buyer_order_no: String,
    pub buyer_order_date: String,
    pub despatch_doc_no: String,
    pub delivery_note_date: String,
    pub despatch_through: String,
    pub destination: String,
    pub terms_of_delivery: String,
    pub eway_bill_no: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// A line on the invoice.
///
/// Inputs are the rate, quantity, discount and the three GST rates.
/// Everything from `amount` down is derived by
/// [`calc::calculate_item`](crate::calc::calculate_item) and is never the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Stable identity (UUID v4 for items created here).
    pub id: String,

    /// 1-based display position.
    pub sr_no: u32,

    #[serde(deserialize_with = "coerce::deserialize_string")]
    pub description: String,

    #[serde(alias = "hsn")]
    pub hsn_code: String,

    #[serde(
        serialize_with = "coerce::serialize_decimal",
        deserialize_with = "coerce::deserialize_decimal"
    )]
    #[ts(type = "number")]
    pub quantity: Decimal,

    pub unit: String,

    #[serde(alias = "rate")]
    #[ts(type = "number")]
    pub unit_rate: Money,

    #[ts(type = "number")]
    pub discount: Money,

    #[ts(type = "number")]
    pub sgst_rate: GstRate,
    #[ts(type = "number")]
    pub cgst_rate: GstRate,
    #[ts(type = "number")]
    pub igst_rate: GstRate,

    // ---- derived ----
    #[ts(type = "number")]
    pub amount: Money,
    #[ts(type = "number")]
    pub taxable_value: Money,
    #[ts(type = "number")]
    pub sgst_amount: Money,
    #[ts(type = "number")]
    pub cgst_amount: Money,
    #[ts(type = "number")]
    pub igst_amount: Money,

    #[serde(alias = "total")]
    #[ts(type = "number")]
    pub line_total: Money,
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem {
            id: String::new(),
            sr_no: 0,
            description: String::new(),
            hsn_code: String::new(),
            quantity: Decimal::ZERO,
            unit: String::new(),
            unit_rate: Money::zero(),
            discount: Money::zero(),
            sgst_rate: GstRate::zero(),
            cgst_rate: GstRate::zero(),
            igst_rate: GstRate::zero(),
            amount: Money::zero(),
            taxable_value: Money::zero(),
            sgst_amount: Money::zero(),
            cgst_amount: Money::zero(),
            igst_amount: Money::zero(),
            line_total: Money::zero(),
        }
    }
}

impl LineItem {
    /// A blank row as the editor adds it: quantity 1, "Pcs",
    /// 9% SGST + 9% CGST.
    pub fn new(sr_no: u32) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            sr_no,
            quantity: Decimal::ONE,
            unit: DEFAULT_UNIT.to_string(),
            sgst_rate: GstRate::from_percent(9),
            cgst_rate: GstRate::from_percent(9),
            ..LineItem::default()
        }
    }

    /// Sum of the three tax amounts.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        self.sgst_amount + self.cgst_amount + self.igst_amount
    }

    /// Sum of the three tax rates.
    pub fn total_rate(&self) -> GstRate {
        GstRate::from_percent(
            self.sgst_rate.percent() + self.cgst_rate.percent() + self.igst_rate.percent(),
        )
    }
}

/// Unit printed for new line items.
pub const DEFAULT_UNIT: &str = "Pcs";

// =============================================================================
// Invoice Data
// =============================================================================

/// Everything printed on one tax invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceData {
    pub company: Company,
    pub consignee: Party,
    pub buyer: Party,
    pub details: InvoiceDetails,
    pub items: Vec<LineItem>,
    pub remarks: String,

    /// Grand total including tax.
    #[ts(type = "number")]
    pub total_amount: Money,

    #[ts(type = "number")]
    pub total_tax: Money,

    pub total_amount_in_words: String,
}

impl InvoiceData {
    /// The store key.
    #[inline]
    pub fn invoice_no(&self) -> &str {
        &self.details.invoice_no
    }
}

// =============================================================================
// Saved Invoice
// =============================================================================

/// An invoice snapshot as kept by the record store.
///
/// `totalAmount` lives once on the flattened snapshot; the store overwrites
/// it with the amount passed to save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SavedInvoice {
    #[serde(flatten)]
    pub invoice: InvoiceData,

    #[serde(default, deserialize_with = "coerce::deserialize_date")]
    #[ts(as = "String")]
    pub saved_at: DateTime<Utc>,
}

impl SavedInvoice {
    /// Builds the stored record: the snapshot with `total_amount` applied,
    /// stamped with `saved_at`.
    pub fn new(mut invoice: InvoiceData, total_amount: Money, saved_at: DateTime<Utc>) -> Self {
        invoice.total_amount = total_amount;
        SavedInvoice { invoice, saved_at }
    }

    #[inline]
    pub fn invoice_no(&self) -> &str {
        &self.invoice.details.invoice_no
    }

    #[inline]
    pub fn buyer_name(&self) -> &str {
        &self.invoice.buyer.name
    }

    #[inline]
    pub fn consignee_name(&self) -> &str {
        &self.invoice.consignee.name
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.invoice.details.date
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        self.invoice.total_amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gst_rate_half() {
        assert_eq!(GstRate::from_percent(18).half(), GstRate::from_percent(9));
        assert_eq!(
            "0.25".parse::<GstRate>().unwrap().half(),
            "0.125".parse::<GstRate>().unwrap()
        );
    }

    #[test]
    fn test_gst_rate_parse_and_display() {
        assert_eq!("9%".parse::<GstRate>().unwrap(), GstRate::from_percent(9));
        assert_eq!(GstRate::from_percent(9).to_string(), "9%");
        assert_eq!("2.50".parse::<GstRate>().unwrap().to_string(), "2.5%");
        assert!("nine".parse::<GstRate>().is_err());
    }

    #[test]
    fn test_supply_type_by_state_code() {
        let seller = Company {
            state: "Delhi".to_string(),
            state_code: "07".to_string(),
            ..Company::default()
        };

        let local = Party {
            state_code: Some("07".to_string()),
            ..Party::default()
        };
        assert_eq!(SupplyType::between(&seller, &local), SupplyType::IntraState);

        let outside = Party {
            gstin: "27AAPFU0939F1ZV".to_string(),
            ..Party::default()
        };
        assert_eq!(SupplyType::between(&seller, &outside), SupplyType::InterState);
    }

    #[test]
    fn test_supply_type_falls_back_to_state_name() {
        let seller = Company {
            state: "Delhi".to_string(),
            ..Company::default()
        };
        let buyer = Party {
            state: "Maharashtra".to_string(),
            ..Party::default()
        };
        assert_eq!(SupplyType::between(&seller, &buyer), SupplyType::InterState);

        let unknown = Party::default();
        assert_eq!(SupplyType::between(&seller, &unknown), SupplyType::IntraState);
    }

    #[test]
    fn test_line_item_new_defaults() {
        let item = LineItem::new(3);
        assert_eq!(item.sr_no, 3);
        assert_eq!(item.quantity, Decimal::ONE);
        assert_eq!(item.unit, "Pcs");
        assert_eq!(item.total_rate(), GstRate::from_percent(18));
        assert!(Uuid::parse_str(&item.id).is_ok());
        assert_ne!(LineItem::new(1).id, LineItem::new(1).id);
    }

    #[test]
    fn test_line_item_accepts_legacy_keys() {
        let item: LineItem = serde_json::from_value(json!({
            "id": "a1",
            "srNo": 1,
            "description": "Chairs",
            "hsn": "9403",
            "quantity": 10,
            "rate": 150,
            "discount": "50",
            "sgstRate": 9,
            "cgstRate": 9,
            "total": 1711
        }))
        .unwrap();

        assert_eq!(item.hsn_code, "9403");
        assert_eq!(item.unit_rate, Money::from_rupees(150));
        assert_eq!(item.discount, Money::from_rupees(50));
        assert_eq!(item.igst_rate, GstRate::zero());
        assert_eq!(item.line_total, Money::from_rupees(1711));
    }

    #[test]
    fn test_saved_invoice_flattens_snapshot() {
        let mut invoice = InvoiceData::default();
        invoice.details.invoice_no = "INV-1".to_string();
        let saved = SavedInvoice::new(invoice, Money::from_rupees(1180), DateTime::default());

        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(value["details"]["invoiceNo"], "INV-1");
        assert_eq!(value["totalAmount"], 1180.0);
        assert!(value.get("savedAt").is_some());
        assert!(value.get("invoice").is_none());
    }

    #[test]
    fn test_saved_invoice_tolerates_missing_fields() {
        let saved: SavedInvoice = serde_json::from_value(json!({
            "details": { "invoiceNo": "INV-OLD", "date": "2024-03-01" },
            "buyer": { "name": null },
            "totalAmount": "2360"
        }))
        .unwrap();

        assert_eq!(saved.invoice_no(), "INV-OLD");
        assert_eq!(saved.buyer_name(), "");
        assert_eq!(saved.total_amount(), Money::from_rupees(2360));
        assert!(saved.invoice.items.is_empty());
        assert_eq!(saved.saved_at, DateTime::<Utc>::default());
    }
}

//! # Invoice List Query Engine
//!
//! Filtering, sorting and statistics for the admin invoice list.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   &[SavedInvoice]  (never mutated)                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   text filter     invoiceNo / buyer / consignee / buyer GSTIN           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   period filter   date ≥ lower bound (local to `now`)                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   customer filter exact buyer name, or "all"                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   stable sort     date │ amount │ invoiceNo │ customer  × asc │ desc    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Vec<&SavedInvoice>                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time
//! The engine never reads the clock. Callers pass `now` with the
//! business's UTC offset so that "today" and "this month" follow local
//! calendar days rather than UTC ones.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::SavedInvoice;
use crate::CUSTOMER_FILTER_ALL;

// =============================================================================
// Query Parameters
// =============================================================================

/// Time window for the period filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Inclusive lower bound of the window, or `None` for [`Period::All`].
    ///
    /// ```text
    /// today    local midnight of `now`
    /// week     now − 7 days
    /// month    now − 1 calendar month   (Mar 31 → Feb 28/29)
    /// quarter  now − 3 calendar months
    /// year     now − 12 calendar months
    /// ```
    pub fn lower_bound(&self, now: DateTime<FixedOffset>) -> Option<DateTime<Utc>> {
        let bound = match self {
            Period::All => return None,
            Period::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .and_then(|midnight| midnight.and_local_timezone(*now.offset()).single()),
            Period::Week => now.checked_sub_signed(Duration::days(7)),
            Period::Month => now.checked_sub_months(Months::new(1)),
            Period::Quarter => now.checked_sub_months(Months::new(3)),
            Period::Year => now.checked_sub_months(Months::new(12)),
        };

        // Out-of-range arithmetic only happens near chrono's limits; treat
        // it as "no lower bound".
        Some(
            bound
                .map(|instant| instant.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }
}

/// Column the list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
    InvoiceNo,
    Customer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction, as toggled by clicking the active column.
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Buyer filter. Serialized as the buyer name, or `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CustomerFilter {
    #[default]
    All,
    Named(String),
}

impl CustomerFilter {
    fn matches(&self, invoice: &SavedInvoice) -> bool {
        match self {
            CustomerFilter::All => true,
            CustomerFilter::Named(name) => invoice.buyer_name() == name,
        }
    }
}

impl From<&str> for CustomerFilter {
    fn from(value: &str) -> Self {
        if value == CUSTOMER_FILTER_ALL {
            CustomerFilter::All
        } else {
            CustomerFilter::Named(value.to_string())
        }
    }
}

impl fmt::Display for CustomerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerFilter::All => f.write_str(CUSTOMER_FILTER_ALL),
            CustomerFilter::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for CustomerFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CustomerFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(CustomerFilter::from(value.as_str()))
    }
}

/// The admin list's filter and sort state.
///
/// Defaults to everything, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceQuery {
    pub text: String,
    pub period: Period,
    #[ts(type = "string")]
    pub customer: CustomerFilter,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl InvoiceQuery {
    /// Runs the query. Filters combine by AND; ties in the sort key keep
    /// their input order in both directions.
    ///
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone};
    /// use gstbook_core::query::InvoiceQuery;
    ///
    /// let ist = FixedOffset::east_opt(330 * 60).unwrap();
    /// let now = ist.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    ///
    /// let results = InvoiceQuery::default().apply(&[], now);
    /// assert!(results.is_empty());
    /// ```
    pub fn apply<'a>(
        &self,
        invoices: &'a [SavedInvoice],
        now: DateTime<FixedOffset>,
    ) -> Vec<&'a SavedInvoice> {
        let needle = self.text.to_lowercase();
        let since = self.period.lower_bound(now);

        let mut results: Vec<&SavedInvoice> = invoices
            .iter()
            .filter(|invoice| needle.is_empty() || matches_text(invoice, &needle))
            .filter(|invoice| since.map_or(true, |bound| invoice.date() >= bound))
            .filter(|invoice| self.customer.matches(invoice))
            .collect();

        // sort_by is stable, and reversing the comparator (not the output)
        // keeps ties in input order for descending sorts too.
        results.sort_by(|a, b| {
            let ordering = compare_by(self.sort, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        results
    }
}

/// Case-insensitive substring match. `needle` must already be lowercase.
fn matches_text(invoice: &SavedInvoice, needle: &str) -> bool {
    let fields = [
        invoice.invoice_no(),
        invoice.buyer_name(),
        invoice.consignee_name(),
        invoice.invoice.buyer.gstin.as_str(),
    ];
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn compare_by(field: SortField, a: &SavedInvoice, b: &SavedInvoice) -> Ordering {
    match field {
        SortField::Date => a.date().cmp(&b.date()),
        SortField::Amount => a.total_amount().cmp(&b.total_amount()),
        SortField::InvoiceNo => a
            .invoice_no()
            .to_lowercase()
            .cmp(&b.invoice_no().to_lowercase()),
        SortField::Customer => a
            .buyer_name()
            .to_lowercase()
            .cmp(&b.buyer_name().to_lowercase()),
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Headline numbers for the admin dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub total_count: usize,
    #[ts(type = "number")]
    pub total_revenue: Money,
    pub unique_customers: usize,
    pub this_month_count: usize,
    #[ts(type = "number")]
    pub this_month_revenue: Money,
    #[ts(type = "number")]
    pub average_invoice: Money,
}

impl InvoiceStats {
    /// Computes statistics over the whole list (filters do not apply).
    ///
    /// "This month" is the calendar month and year of `now`, with each
    /// invoice date read in `now`'s offset.
    pub fn compute(invoices: &[SavedInvoice], now: DateTime<FixedOffset>) -> Self {
        let offset = *now.offset();
        let mut customers: HashSet<&str> = HashSet::new();
        let mut stats = InvoiceStats {
            total_count: invoices.len(),
            ..InvoiceStats::default()
        };

        for invoice in invoices {
            stats.total_revenue += invoice.total_amount();
            customers.insert(invoice.buyer_name());

            let local = invoice.date().with_timezone(&offset);
            if local.year() == now.year() && local.month() == now.month() {
                stats.this_month_count += 1;
                stats.this_month_revenue += invoice.total_amount();
            }
        }

        stats.unique_customers = customers.len();
        stats.average_invoice = stats.total_revenue.divide_by(stats.total_count);
        stats
    }
}

/// Options for the customer dropdown: `"all"` followed by each distinct
/// buyer name in first-seen order.
pub fn customer_options(invoices: &[SavedInvoice]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options = vec![CUSTOMER_FILTER_ALL.to_string()];
    for invoice in invoices {
        if seen.insert(invoice.buyer_name()) {
            options.push(invoice.buyer_name().to_string());
        }
    }
    options
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceData;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    /// 2025-03-31 18:00 IST
    fn now() -> DateTime<FixedOffset> {
        ist().with_ymd_and_hms(2025, 3, 31, 18, 0, 0).unwrap()
    }

    fn invoice(no: &str, buyer: &str, date: &str, total_rupees: i64) -> SavedInvoice {
        let mut data = InvoiceData::default();
        data.details.invoice_no = no.to_string();
        data.buyer.name = buyer.to_string();
        data.details.date = DateTime::parse_from_rfc3339(date)
            .unwrap()
            .with_timezone(&Utc);
        SavedInvoice::new(data, Money::from_rupees(total_rupees), Utc::now())
    }

    fn numbers(results: &[&SavedInvoice]) -> Vec<String> {
        results.iter().map(|i| i.invoice_no().to_string()).collect()
    }

    fn sample() -> Vec<SavedInvoice> {
        vec![
            invoice("INV-001", "Acme Events", "2025-03-31T09:00:00+05:30", 1180),
            invoice("INV-002", "Bharat Tents", "2025-03-26T10:00:00+05:30", 2360),
            invoice("INV-003", "acme events", "2025-02-28T10:00:00+05:30", 590),
            invoice("INV-004", "Acme Events", "2024-12-15T10:00:00+05:30", 1180),
            invoice("INV-005", "Chandni Decor", "2024-01-10T10:00:00+05:30", 4720),
        ]
    }

    #[test]
    fn test_default_query_sorts_by_date_desc() {
        let invoices = sample();
        let mut shuffled = invoices.clone();
        shuffled.reverse();
        let results = InvoiceQuery::default().apply(&shuffled, now());
        assert_eq!(
            numbers(&results),
            vec!["INV-001", "INV-002", "INV-003", "INV-004", "INV-005"]
        );
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let mut invoices = sample();
        invoices[4].invoice.buyer.gstin = "27AAPFU0939F1ZV".to_string();
        invoices[1].invoice.consignee.name = "Venue Hall".to_string();

        let query = |text: &str| InvoiceQuery {
            text: text.to_string(),
            ..InvoiceQuery::default()
        };

        assert_eq!(numbers(&query("ACME").apply(&invoices, now())).len(), 3);
        assert_eq!(numbers(&query("inv-002").apply(&invoices, now())), vec!["INV-002"]);
        assert_eq!(numbers(&query("venue").apply(&invoices, now())), vec!["INV-002"]);
        assert_eq!(numbers(&query("aapfu").apply(&invoices, now())), vec!["INV-005"]);
        assert_eq!(query("").apply(&invoices, now()).len(), 5);

        // Surrounding spaces are part of the substring
        assert_eq!(numbers(&query(" events").apply(&invoices, now())).len(), 3);
        assert!(query("Events ").apply(&invoices, now()).is_empty());
    }

    #[test]
    fn test_period_bounds() {
        let now = now();
        let bound = |period: Period| period.lower_bound(now).unwrap();

        assert_eq!(Period::All.lower_bound(now), None);
        assert_eq!(
            bound(Period::Today),
            ist().with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap()
        );
        assert_eq!(
            bound(Period::Week),
            ist().with_ymd_and_hms(2025, 3, 24, 18, 0, 0).unwrap()
        );
        // Mar 31 minus one month clamps to Feb 28
        assert_eq!(
            bound(Period::Month),
            ist().with_ymd_and_hms(2025, 2, 28, 18, 0, 0).unwrap()
        );
        assert_eq!(
            bound(Period::Quarter),
            ist().with_ymd_and_hms(2024, 12, 31, 18, 0, 0).unwrap()
        );
        assert_eq!(
            bound(Period::Year),
            ist().with_ymd_and_hms(2024, 3, 31, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_period_filter() {
        let invoices = sample();
        let count = |period: Period| {
            InvoiceQuery {
                period,
                ..InvoiceQuery::default()
            }
            .apply(&invoices, now())
            .len()
        };

        assert_eq!(count(Period::Today), 1);
        assert_eq!(count(Period::Week), 2);
        // INV-003 is 2025-02-28 10:00, before the 18:00 bound
        assert_eq!(count(Period::Month), 2);
        assert_eq!(count(Period::Quarter), 3);
        assert_eq!(count(Period::Year), 4);
        assert_eq!(count(Period::All), 5);
    }

    #[test]
    fn test_today_uses_local_midnight() {
        // 2025-03-30 19:00 UTC is 2025-03-31 00:30 IST
        let invoices = vec![invoice("INV-LATE", "Acme", "2025-03-30T19:00:00Z", 100)];
        let query = InvoiceQuery {
            period: Period::Today,
            ..InvoiceQuery::default()
        };
        assert_eq!(query.apply(&invoices, now()).len(), 1);
    }

    #[test]
    fn test_text_and_period_intersect() {
        let invoices = sample();
        let text_only = InvoiceQuery {
            text: "acme".to_string(),
            ..InvoiceQuery::default()
        };
        let period_only = InvoiceQuery {
            period: Period::Quarter,
            ..InvoiceQuery::default()
        };
        let both = InvoiceQuery {
            text: "acme".to_string(),
            period: Period::Quarter,
            ..InvoiceQuery::default()
        };

        let by_text: HashSet<String> = numbers(&text_only.apply(&invoices, now()))
            .into_iter()
            .collect();
        let by_period: HashSet<String> = numbers(&period_only.apply(&invoices, now()))
            .into_iter()
            .collect();
        let combined: HashSet<String> =
            numbers(&both.apply(&invoices, now())).into_iter().collect();

        let expected: HashSet<String> = by_text.intersection(&by_period).cloned().collect();
        assert_eq!(combined, expected);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_customer_filter_is_exact() {
        let invoices = sample();
        let query = InvoiceQuery {
            customer: CustomerFilter::from("Acme Events"),
            ..InvoiceQuery::default()
        };
        assert_eq!(
            numbers(&query.apply(&invoices, now())),
            vec!["INV-001", "INV-004"]
        );

        let all = InvoiceQuery {
            customer: CustomerFilter::from("all"),
            ..InvoiceQuery::default()
        };
        assert_eq!(all.customer, CustomerFilter::All);
        assert_eq!(all.apply(&invoices, now()).len(), 5);
    }

    #[test]
    fn test_amount_sort_is_stable_both_directions() {
        let invoices = sample();
        let desc = InvoiceQuery {
            sort: SortField::Amount,
            direction: SortDirection::Desc,
            ..InvoiceQuery::default()
        };
        assert_eq!(
            numbers(&desc.apply(&invoices, now())),
            vec!["INV-005", "INV-002", "INV-001", "INV-004", "INV-003"]
        );

        let asc = InvoiceQuery {
            direction: SortDirection::Asc,
            ..desc
        };
        assert_eq!(
            numbers(&asc.apply(&invoices, now())),
            vec!["INV-003", "INV-001", "INV-004", "INV-002", "INV-005"]
        );
    }

    #[test]
    fn test_customer_sort_ignores_case() {
        let invoices = sample();
        let query = InvoiceQuery {
            sort: SortField::Customer,
            direction: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        assert_eq!(
            numbers(&query.apply(&invoices, now())),
            vec!["INV-001", "INV-003", "INV-004", "INV-002", "INV-005"]
        );
    }

    #[test]
    fn test_invoice_no_sort_ignores_case() {
        let mut invoices = sample();
        invoices[2].invoice.details.invoice_no = "inv-003".to_string();
        invoices[4].invoice.details.invoice_no = "INV-000".to_string();

        let asc = InvoiceQuery {
            sort: SortField::InvoiceNo,
            direction: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        assert_eq!(
            numbers(&asc.apply(&invoices, now())),
            vec!["INV-000", "INV-001", "INV-002", "inv-003", "INV-004"]
        );

        let desc = InvoiceQuery {
            direction: SortDirection::Desc,
            ..asc
        };
        assert_eq!(
            numbers(&desc.apply(&invoices, now())),
            vec!["INV-004", "inv-003", "INV-002", "INV-001", "INV-000"]
        );
    }

    #[test]
    fn test_date_sort_ascending() {
        let invoices = sample();
        let query = InvoiceQuery {
            sort: SortField::Date,
            direction: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        assert_eq!(
            numbers(&query.apply(&invoices, now())),
            vec!["INV-005", "INV-004", "INV-003", "INV-002", "INV-001"]
        );
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let invoices = sample();
        let before = invoices.clone();
        let _ = InvoiceQuery {
            sort: SortField::InvoiceNo,
            direction: SortDirection::Asc,
            ..InvoiceQuery::default()
        }
        .apply(&invoices, now());
        assert_eq!(invoices, before);
    }

    #[test]
    fn test_stats() {
        let invoices = sample();
        let stats = InvoiceStats::compute(&invoices, now());

        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.total_revenue, Money::from_rupees(10_030));
        // "Acme Events" and "acme events" are distinct names
        assert_eq!(stats.unique_customers, 4);
        assert_eq!(stats.this_month_count, 2);
        assert_eq!(stats.this_month_revenue, Money::from_rupees(3540));
        assert_eq!(stats.average_invoice, Money::from_rupees(2006));
    }

    #[test]
    fn test_stats_clamp_oversized_totals() {
        let huge: Money = serde_json::from_str("\"90000000000000000\"").unwrap();
        let mut invoices = sample();
        invoices[0].invoice.total_amount = huge;
        invoices[1].invoice.total_amount = huge;

        let stats = InvoiceStats::compute(&invoices, now());
        assert_eq!(stats.total_revenue.paise(), i64::MAX);
        assert_eq!(stats.this_month_revenue.paise(), i64::MAX);
        assert!(stats.average_invoice.is_positive());
    }

    #[test]
    fn test_stats_empty() {
        let stats = InvoiceStats::compute(&[], now());
        assert_eq!(stats, InvoiceStats::default());
        assert_eq!(stats.average_invoice, Money::zero());
    }

    #[test]
    fn test_customer_options() {
        let options = customer_options(&sample());
        assert_eq!(
            options,
            vec!["all", "Acme Events", "Bharat Tents", "acme events", "Chandni Decor"]
        );
        assert_eq!(customer_options(&[]), vec!["all"]);
    }

    #[test]
    fn test_query_serde() {
        let query: InvoiceQuery = serde_json::from_value(serde_json::json!({
            "text": "acme",
            "period": "quarter",
            "customer": "Acme Events",
            "sort": "invoiceNo",
            "direction": "asc"
        }))
        .unwrap();
        assert_eq!(query.period, Period::Quarter);
        assert_eq!(query.sort, SortField::InvoiceNo);
        assert_eq!(query.customer, CustomerFilter::Named("Acme Events".to_string()));

        let defaults: InvoiceQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, InvoiceQuery::default());
        assert_eq!(defaults.direction, SortDirection::Desc);
        assert_eq!(serde_json::to_value(&defaults).unwrap()["customer"], "all");
    }
}

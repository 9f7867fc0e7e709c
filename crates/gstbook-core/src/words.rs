//! # Amount in Words
//!
//! Renders rupee amounts the way Indian tax invoices print them:
//! "One Lakh Twenty Thousand Rupees and Fifty Paise Only".
//!
//! ## Indian Grouping
//! ```text
//!   1,23,45,678
//!   │ │  │  └── remainder (0-999)   "Six Hundred and Seventy Eight"
//!   │ │  └───── thousand  (0-99)    "Forty Five Thousand"
//!   │ └──────── lakh      (0-99)    "Twenty Three Lakh"
//!   └────────── crore     (any)     "One Crore"
//! ```
//! Crore counts above 999 recurse through the same grouping, so
//! ₹1,000,00,00,000 reads "One Thousand Crore".

use crate::money::Money;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Converts an amount to invoice wording.
///
/// - Zero reads "Zero Rupees Only".
/// - Paise are added only when non-zero: "... Rupees and Five Paise Only".
/// - A negative amount (a discount larger than the line) is prefixed with
///   "Minus".
///
/// ```rust
/// use gstbook_core::money::Money;
/// use gstbook_core::words::amount_in_words;
///
/// assert_eq!(amount_in_words(Money::zero()), "Zero Rupees Only");
/// assert_eq!(
///     amount_in_words(Money::from_rupees(1180)),
///     "One Thousand One Hundred and Eighty Rupees Only"
/// );
/// assert_eq!(
///     amount_in_words(Money::from_paise(118_050)),
///     "One Thousand One Hundred and Eighty Rupees and Fifty Paise Only"
/// );
/// ```
pub fn amount_in_words(amount: Money) -> String {
    let paise = amount.paise().unsigned_abs();
    let rupees = paise / 100;
    let fraction = paise % 100;

    let mut words = String::new();
    if amount.is_negative() {
        words.push_str("Minus ");
    }
    words.push_str(&number_in_words(rupees));
    words.push_str(" Rupees");

    if fraction > 0 {
        words.push_str(" and ");
        words.push_str(&below_thousand(fraction));
        words.push_str(" Paise");
    }
    words.push_str(" Only");

    normalize_spaces(&words)
}

/// Spells out a whole number using crore/lakh/thousand grouping.
///
/// ```rust
/// use gstbook_core::words::number_in_words;
///
/// assert_eq!(number_in_words(0), "Zero");
/// assert_eq!(number_in_words(100_000), "One Lakh");
/// assert_eq!(number_in_words(215), "Two Hundred and Fifteen");
/// ```
pub fn number_in_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let crore = n / CRORE;
    let lakh = (n % CRORE) / LAKH;
    let thousand = (n % LAKH) / THOUSAND;
    let remainder = n % THOUSAND;

    let mut groups: Vec<String> = Vec::with_capacity(4);
    if crore > 0 {
        groups.push(format!("{} Crore", number_in_words(crore)));
    }
    if lakh > 0 {
        groups.push(format!("{} Lakh", below_thousand(lakh)));
    }
    if thousand > 0 {
        groups.push(format!("{} Thousand", below_thousand(thousand)));
    }
    if remainder > 0 {
        groups.push(below_thousand(remainder));
    }

    groups.join(" ")
}

/// 1-999 in words; empty for zero.
fn below_thousand(n: u64) -> String {
    // n < 1000, so every index below is in bounds
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=19 => ONES[n].to_string(),
        20..=99 => {
            let tens = TENS[n / 10];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, ONES[ones]),
            }
        }
        _ => {
            let hundreds = format!("{} Hundred", ONES[n / 100]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{} and {}", hundreds, below_thousand(rest as u64)),
            }
        }
    }
}

fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! # Seed Data Generator
//!
//! Populates a database with demo invoices for development.
//!
//! ## Usage
//! ```bash
//! # 25 invoices into ./gstbook.db (or $GSTBOOK_DB_PATH)
//! cargo run -p gstbook-store --bin seed
//!
//! # Custom amount and path
//! cargo run -p gstbook-store --bin seed -- --count 200 --db ./data/gstbook.db
//! ```
//!
//! ## Generated Invoices
//! - Spread over the last ~400 days so every period filter has hits
//! - A handful of repeat buyers, some outside Delhi (IGST)
//! - 1-4 rental line items each, at 5%, 12% or 18% GST

use chrono::{Duration, FixedOffset};
use rust_decimal::Decimal;
use std::env;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gstbook_core::calc::line_item;
use gstbook_core::invoice::{default_invoice, format_invoice_number};
use gstbook_core::{Company, GstRate, Money, Party, SupplyType};
use gstbook_store::{Database, InvoiceStore, StoreSettings};

/// Buyers: (name, state, state code, GSTIN)
const BUYERS: &[(&str, &str, &str, &str)] = &[
    ("Acme Events Pvt Ltd", "Delhi", "07", "07AABCA1234F1Z5"),
    ("Bharat Tent House", "Delhi", "07", "07AAFPB4321K1ZQ"),
    ("Chandni Decorators", "Uttar Pradesh", "09", "09AAGFC7788M1Z2"),
    ("Dream Weddings", "Haryana", "06", "06AAHCD5566P1ZX"),
    ("Shubh Mangal Caterers", "Delhi", "07", ""),
    ("Metro Conferences LLP", "Maharashtra", "27", "27AAPFU0939F1ZV"),
];

/// Rental lines: (description, SAC/HSN, rate in rupees, GST %)
const ITEMS: &[(&str, &str, i64, u32)] = &[
    ("Event Equipment Rental", "9966", 1000, 18),
    ("Stage Platform 8x4 ft", "9966", 2500, 18),
    ("LED Par Light", "9966", 450, 18),
    ("Banquet Chair", "9966", 35, 12),
    ("Round Table with Linen", "9966", 180, 12),
    ("Shamiana 20x20 ft", "9966", 3200, 12),
    ("Generator 62.5 kVA (per day)", "9966", 7500, 18),
    ("Drinking Water Dispenser", "9966", 150, 5),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut settings = StoreSettings::from_env();
    let mut count: usize = 25;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    settings.db_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("gstbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of invoices to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: $GSTBOOK_DB_PATH or ./gstbook.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    println!("🌱 gstbook Seed Data Generator");
    println!("==============================");
    println!("Database: {}", settings.db_path.display());
    println!("Slot:     {}", settings.storage_key);
    println!("Invoices: {}", count);
    println!();

    let db = Database::new(settings.db_config()).await?;
    let mut store = InvoiceStore::open(&db, settings.storage_key.clone()).await?;

    if !store.is_empty() {
        println!("⚠ Slot already has {} invoices", store.len());
        println!("  Skipping seed to avoid mixing demo data in.");
        return Ok(());
    }

    let now = settings.now();
    let start = Instant::now();

    // Oldest first, so the newest invoice ends up at the front of the list.
    for index in (0..count).rev() {
        let mut invoice = demo_invoice(index, now);
        let summary = match invoice.prepare_for_save() {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("Skipping invoice {}: {}", index, e);
                continue;
            }
        };
        store.save(invoice, summary.total_amount).await?;
    }

    let elapsed = start.elapsed();
    let stats = store.stats(now);

    println!("✓ Saved {} invoices in {:?}", store.len(), elapsed);
    println!("  Revenue:    {}", stats.total_revenue);
    println!("  Customers:  {}", stats.unique_customers);
    println!("  This month: {} ({})", stats.this_month_count, stats.this_month_revenue);
    println!();
    println!("✓ Seed complete!");

    info!(count = store.len(), "Seed complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gstbook=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn demo_company() -> Company {
    Company {
        name: "Rent My Event".to_string(),
        address: "A-123 Main Road, Mandawali, New Delhi 110092".to_string(),
        gstin: "07AAKFR2290M1Z8".to_string(),
        state: "Delhi".to_string(),
        state_code: "07".to_string(),
        bank_name: "State Bank of India".to_string(),
        account_no: "123456789012".to_string(),
        ifsc_code: "SBIN0001234".to_string(),
        branch_address: "Mandawali Branch, New Delhi".to_string(),
        account_holder_name: "Rent My Event".to_string(),
        mobile: Some("+91 98100 00000".to_string()),
        email: Some("accounts@rentmyevent.example".to_string()),
        logo: None,
    }
}

/// Builds the `index`-th demo invoice. Deterministic, so reruns produce
/// the same data.
fn demo_invoice(index: usize, now: chrono::DateTime<FixedOffset>) -> gstbook_core::InvoiceData {
    let date = now - Duration::days(((index * 37) % 400) as i64);
    let mut invoice = default_invoice(demo_company(), date);
    invoice.details.invoice_no = format_invoice_number(date.date_naive(), (index % 1000) as u16);

    let (name, state, code, gstin) = BUYERS[index % BUYERS.len()];
    invoice.buyer = Party {
        name: name.to_string(),
        address: format!("{} office", state),
        gstin: gstin.to_string(),
        state: state.to_string(),
        state_code: Some(code.to_string()),
        place_of_supply: Some(state.to_string()),
    };
    invoice.consignee = invoice.buyer.clone();

    let supply = SupplyType::between(&invoice.company, &invoice.buyer);
    let lines = 1 + index % 4;
    invoice.items = (0..lines)
        .map(|line| {
            let (description, hsn, rate, percent) = ITEMS[(index + line * 3) % ITEMS.len()];
            let quantity = Decimal::from(1 + (index + line) % 10);
            let mut item = line_item(
                description,
                hsn,
                Money::from_rupees(rate),
                quantity,
                GstRate::from_percent(percent),
                supply,
            );
            item.sr_no = line as u32 + 1;
            item
        })
        .collect();

    invoice
}

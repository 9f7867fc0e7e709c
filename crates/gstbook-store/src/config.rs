//! # Store Settings
//!
//! Runtime settings for the store, read from the environment over
//! defaults.
//!
//! | Variable                     | Default            |
//! |------------------------------|--------------------|
//! | `GSTBOOK_DB_PATH`            | `./gstbook.db`     |
//! | `GSTBOOK_STORAGE_KEY`        | `saved_invoices`   |
//! | `GSTBOOK_UTC_OFFSET_MINUTES` | `330` (IST, +05:30)|
//!
//! Unusable values are logged and ignored.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::path::PathBuf;
use tracing::warn;

use gstbook_core::{DEFAULT_STORAGE_KEY, DEFAULT_UTC_OFFSET_MINUTES};

use crate::error::{StoreError, StoreResult};
use crate::pool::DbConfig;

pub const ENV_DB_PATH: &str = "GSTBOOK_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "GSTBOOK_STORAGE_KEY";
pub const ENV_UTC_OFFSET_MINUTES: &str = "GSTBOOK_UTC_OFFSET_MINUTES";

/// Default database file for development.
pub const DEFAULT_DB_PATH: &str = "./gstbook.db";

/// Where invoices are stored and which local time the business keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    /// SQLite file, or `:memory:`.
    pub db_path: PathBuf,

    /// Slot key for the invoice list.
    pub storage_key: String,

    /// Business UTC offset, used for "today" and "this month".
    pub utc_offset: FixedOffset,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            utc_offset: default_offset(),
        }
    }
}

impl StoreSettings {
    /// Loads settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = StoreSettings::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            settings.db_path = PathBuf::from(path);
        }

        if let Some(key) = lookup(ENV_STORAGE_KEY).filter(|k| !k.trim().is_empty()) {
            settings.storage_key = key;
        }

        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            match parse_offset(&raw) {
                Ok(offset) => settings.utc_offset = offset,
                Err(e) => warn!(error = %e, "Ignoring UTC offset setting"),
            }
        }

        settings
    }

    /// Database configuration for `db_path`.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone())
    }

    /// The current time in the business's offset.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.utc_offset)
    }
}

/// Parses an offset given in minutes east of UTC, e.g. `330` or `-300`.
pub fn parse_offset(raw: &str) -> StoreResult<FixedOffset> {
    let minutes: i32 = raw.trim().parse().map_err(|_| {
        StoreError::invalid_setting(ENV_UTC_OFFSET_MINUTES, format!("'{}' is not a number", raw))
    })?;

    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            StoreError::invalid_setting(
                ENV_UTC_OFFSET_MINUTES,
                format!("{} minutes is out of range", minutes),
            )
        })
}

fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60).unwrap_or_else(|| Utc.fix())
}

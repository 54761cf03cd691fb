//! # Word Stats
//!
//! Search-interest data for the market dashboard. This crate owns the
//! provider boundary: everything upstream of it speaks provider-specific
//! row shapes, everything downstream of it speaks the canonical
//! [`DatedValue`] series.
//!
//! - **Provider records**: one named record shape per source, normalized to
//!   `DatedValue` in a single place
//! - **Trends provider**: asynchronous fetch contract plus the per-day
//!   chunked fetch the live APIs require
//! - **Memoization cache**: bounded, TTL-evicting get-or-compute cache for
//!   fetch results
//! - **Dictionaries**: on-disk per-item stats files (Google Trends CSV,
//!   Yandex Wordstats JSON)

use chrono::NaiveDate;
use series_math::{clean_series, DatedValue};
use thiserror::Error;

pub mod cache;
pub mod dictionary;
pub mod provider;

// Re-export the entry points for convenient access
pub use cache::MemoCache;
pub use dictionary::{available_names, read_google_stats, read_yandex_stats};
pub use provider::{fetch_interest_daily, TrendsProvider};

/// Errors that can occur while obtaining search-interest data
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for stats operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Raw rows exactly as each source ships them.
///
/// Each variant names the source's own column vocabulary; the rest of the
/// pipeline never sees these shapes. A batch passed to [`normalize_records`]
/// is expected to come from a single source.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRecord {
    /// Google Trends dictionary row, already on the 0-100 interest scale
    GoogleTrends { date: NaiveDate, value: f64 },
    /// Yandex Wordstats dictionary row; raw search counts, zero means
    /// "no data" rather than an observed zero
    YandexWordstat { date: NaiveDate, total_count: f64 },
    /// Retail-flow row: items entering circulation on a day
    Inflow { dt: NaiveDate, enter_cnt: f64 },
    /// Retail-flow row: items leaving circulation on a day
    Outflow { dt: NaiveDate, leave_cnt: f64 },
}

impl ProviderRecord {
    /// Canonical `(date, value)` view of the record.
    pub fn into_dated_value(self) -> DatedValue {
        match self {
            ProviderRecord::GoogleTrends { date, value } => DatedValue::new(date, value),
            ProviderRecord::YandexWordstat { date, total_count } => {
                DatedValue::new(date, total_count)
            }
            ProviderRecord::Inflow { dt, enter_cnt } => DatedValue::new(dt, enter_cnt),
            ProviderRecord::Outflow { dt, leave_cnt } => DatedValue::new(dt, leave_cnt),
        }
    }

    /// Whether this record's source uses zero as a "no data" sentinel.
    pub fn zero_means_missing(&self) -> bool {
        matches!(self, ProviderRecord::YandexWordstat { .. })
    }
}

/// Normalize one source's raw rows into a canonical cleaned series.
///
/// This is the single place provider row shapes become [`DatedValue`]s:
/// sentinel zeros are dropped for sources that use them, duplicates collapse
/// to their per-date maximum, and the output is ordered by date.
pub fn normalize_records(records: Vec<ProviderRecord>) -> Vec<DatedValue> {
    let drop_sentinels = records.iter().any(ProviderRecord::zero_means_missing);
    let raw: Vec<DatedValue> = records
        .into_iter()
        .map(ProviderRecord::into_dated_value)
        .collect();

    clean_series(&raw, drop_sentinels)
}

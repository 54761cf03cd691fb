//! # Series Math
//!
//! Mathematical transformations over calendar-dated value series.
//! This crate provides the building blocks the dashboard pipeline composes:
//!
//! - **Cleaning**: collapse raw provider output to one value per date
//! - **Interpolation**: fill gaps to one value per calendar day
//! - **Normalization**: rescale a series into the 0-100 range
//! - **Cumulative aggregation**: running totals with partition carry-over

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Transformation modules
pub mod cleaning;
pub mod cumulative;
pub mod interpolation;
pub mod normalization;

// Re-export the operations for convenient access
pub use cleaning::clean_series;
pub use cumulative::{cumulative, cumulative_series};
pub use interpolation::interpolate_daily;
pub use normalization::normalize_series;

/// Errors that can occur in series calculations
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Cannot normalize a constant series (min equals max)")]
    ConstantSeries,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for series operations
pub type Result<T> = std::result::Result<T, SeriesError>;

/// A single observation: one value on one calendar day.
///
/// Serializes as `{"date": "yyyy-mm-dd", "value": n}`, the shape the
/// dashboard charts consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    /// Calendar day of the observation (no time component)
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
}

impl DatedValue {
    /// Create a new dated value.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

#[cfg(test)]
pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

//! Error types for the demand_forecast crate

use chrono::NaiveDate;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The requested target date does not exist in the historical dataset
    #[error("Date {0} not found in the historical dataset")]
    DateNotFound(NaiveDate),

    /// The dataset holds fewer rows before the target date than the model's
    /// history window needs
    #[error("Insufficient history before the target date: need {needed} rows, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// The stats series has no value for a date inside the feature window
    #[error("Stats series does not cover window date {0}")]
    StatsCoverage(NaiveDate),

    /// Error raised by or around the forecasting model
    #[error("Model error: {0}")]
    Model(String),

    /// Error related to dataset contents or shapes
    #[error("Data error: {0}")]
    Data(String),

    /// An external load exceeded the configured deadline
    #[error("Timed out while {0}")]
    Timeout(String),

    /// Error from series transformations
    #[error("Series error: {0}")]
    Series(#[from] series_math::SeriesError),

    /// Error from the stats provider layer
    #[error("Stats error: {0}")]
    Stats(#[from] word_stats::StatsError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON configuration handling
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<polars::prelude::PolarsError> for ForecastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}

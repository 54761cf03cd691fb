//! # Market Pulse
//!
//! `market_pulse` is the umbrella crate for the market-trend dashboard
//! backend. It ties together the three member crates:
//!
//! - [`series_math`]: pure transformations over calendar-dated value series
//!   (cleaning, interpolation, normalization, cumulative aggregation)
//! - [`word_stats`]: search-interest providers, memoized fetching and
//!   per-item stats dictionaries (Google Trends, Yandex Wordstats)
//! - [`demand_forecast`]: the forecasting pipeline from historical
//!   retail-flow data to dated before/after/predict curves
//!
//! ## Example
//!
//! ```
//! use market_pulse::DatedValue;
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2022, 12, 22).unwrap();
//! let point = DatedValue::new(day, 42.0);
//! assert_eq!(point.value, 42.0);
//! ```

pub use series_math::{DatedValue, SeriesError};
pub use word_stats::{MemoCache, ProviderRecord, StatsError, TrendsProvider};

pub use demand_forecast::{
    DashboardConfig, DashboardService, ForecastError, Hypothesis, InferenceBackend, ModelHandle,
    ModelParams, ModelRegistry,
};

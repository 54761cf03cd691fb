//! # Demand Forecast
//!
//! The forecasting pipeline of the market-trend dashboard. Takes historical
//! retail-flow datasets and search-interest stats, runs a pre-trained
//! forecasting model over a shaped feature window, and produces the dated
//! before/after/predict curves the dashboard charts.
//!
//! ## Pipeline
//!
//! raw provider series → cleaning → (interpolation | normalization) →
//! alignment on the target date → feature window (slice + substitute +
//! flatten) → model inference → denormalize + date-stamp → cumulative
//! aggregation → response payload
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::{
//!     DashboardConfig, DashboardService, Hypothesis, ModelHandle, ModelRegistry,
//! };
//! use std::sync::Arc;
//!
//! # #[derive(Debug)]
//! # struct MyBackend;
//! # impl demand_forecast::InferenceBackend for MyBackend {
//! #     fn infer(&self, _input: &[f64]) -> demand_forecast::Result<Vec<f64>> { Ok(vec![]) }
//! #     fn name(&self) -> &str { "my-backend" }
//! # }
//! # struct MyProvider;
//! # #[async_trait::async_trait]
//! # impl word_stats::TrendsProvider for MyProvider {
//! #     async fn fetch(
//! #         &self,
//! #         _keyword: &str,
//! #         _start: chrono::NaiveDate,
//! #         _end: chrono::NaiveDate,
//! #     ) -> word_stats::Result<Vec<series_math::DatedValue>> { Ok(vec![]) }
//! # }
//! # async fn run() -> demand_forecast::Result<()> {
//! // Load the two hypothesis models once at startup
//! let mut registry = ModelRegistry::new();
//! registry.insert(
//!     Hypothesis::Inflow,
//!     ModelHandle::load("models/enter", Box::new(MyBackend))?,
//! );
//! registry.insert(
//!     Hypothesis::Outflow,
//!     ModelHandle::load("models/leave", Box::new(MyBackend))?,
//! );
//!
//! let service = DashboardService::new(
//!     DashboardConfig::default(),
//!     registry,
//!     Arc::new(MyProvider),
//! );
//!
//! // One forecast request
//! let date = chrono::NaiveDate::from_ymd_opt(2022, 12, 22).unwrap();
//! let payload = service.predict_leave("perfume", date).await?;
//! assert_eq!(payload.leave.predict.len(), payload.leave_cum.predict.len());
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod model;
pub mod payload;
pub mod pipeline;

// Re-export commonly used types
pub use crate::data::HistoryFrame;
pub use crate::error::{ForecastError, Result};
pub use crate::features::FeatureWindow;
pub use crate::model::{Hypothesis, InferenceBackend, ModelHandle, ModelParams, ModelRegistry};
pub use crate::payload::{EnterForecast, LeaveForecast, Partitions, SearchStats};
pub use crate::pipeline::{DashboardConfig, DashboardService, STATS_COLUMN};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

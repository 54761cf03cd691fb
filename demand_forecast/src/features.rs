//! Feature shaping: the fixed-length numeric input the model expects.
//!
//! The model was trained on a rolling window of multi-column rows. Shaping
//! slices that window out of the history, swaps the search-interest column
//! in for the externally fetched series, and flattens row-major into the
//! single vector the inference call takes.

use crate::data::HistoryFrame;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use series_math::DatedValue;
use std::collections::HashMap;

/// A `[rows, columns]` numeric table flattened row-major for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureWindow {
    rows: usize,
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureWindow {
    /// Number of rows (trailing history days) in the window
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Feature column names, in flattening order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total vector length: `rows * columns`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The flattened vector, row-major (all columns of row 0, then row 1, ...)
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Shape the model input window ending immediately before the target row.
///
/// Slices `history_size` rows covering `[target_index - history_size,
/// target_index)`. Columns named in `feature_columns` are read from the
/// dataset, except `stats_column`, whose values come from the externally
/// fetched `stats` series matched by date and rescaled by `search_std`.
/// The date column never enters the window.
///
/// Fails fast when fewer than `history_size` rows precede the target
/// ([`ForecastError::InsufficientHistory`]) or when the stats series lacks
/// a window date ([`ForecastError::StatsCoverage`]).
pub fn shape_window(
    history: &HistoryFrame,
    target_index: usize,
    history_size: usize,
    feature_columns: &[String],
    stats_column: &str,
    stats: &[DatedValue],
    search_std: f64,
) -> Result<FeatureWindow> {
    if history_size == 0 || feature_columns.is_empty() {
        return Err(ForecastError::Data(
            "feature window needs a positive history size and at least one column".to_string(),
        ));
    }
    if !feature_columns.iter().any(|name| name == stats_column) {
        return Err(ForecastError::Data(format!(
            "stats column '{}' is not among the feature columns",
            stats_column
        )));
    }
    if !(search_std.is_finite() && search_std > 0.0) {
        return Err(ForecastError::Data(format!(
            "search_std must be a positive number, got {}",
            search_std
        )));
    }
    if target_index > history.len() {
        return Err(ForecastError::Data(format!(
            "target index {} is outside the dataset ({} rows)",
            target_index,
            history.len()
        )));
    }
    if target_index < history_size {
        return Err(ForecastError::InsufficientHistory {
            needed: history_size,
            got: target_index,
        });
    }

    let window_start = target_index - history_size;
    let window_dates = &history.dates()[window_start..target_index];

    let stats_by_date: HashMap<NaiveDate, f64> = stats
        .iter()
        .map(|point| (point.date, point.value))
        .collect();

    // Dataset-backed columns are loaded once up front; the stats column has
    // no dataset backing and stays None.
    let mut loaded: Vec<Option<Vec<f64>>> = Vec::with_capacity(feature_columns.len());
    for name in feature_columns {
        if name == stats_column {
            loaded.push(None);
        } else {
            loaded.push(Some(history.column(name)?));
        }
    }

    let mut values = Vec::with_capacity(history_size * feature_columns.len());
    for (offset, date) in window_dates.iter().enumerate() {
        let row = window_start + offset;
        for column in loaded.iter() {
            match column {
                Some(column_values) => values.push(column_values[row]),
                None => {
                    let raw = stats_by_date
                        .get(date)
                        .copied()
                        .ok_or(ForecastError::StatsCoverage(*date))?;
                    values.push(raw / search_std);
                }
            }
        }
    }

    Ok(FeatureWindow {
        rows: history_size,
        columns: feature_columns.to_vec(),
        values,
    })
}

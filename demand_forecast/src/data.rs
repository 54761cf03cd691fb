//! Historical dataset handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use series_math::DatedValue;
use std::fs::File;
use std::path::Path;

/// Historical retail-flow table: one row per calendar day, a date column
/// plus one or more numeric columns (`enter_cnt`, `leave_cnt`, ...).
#[derive(Debug, Clone)]
pub struct HistoryFrame {
    /// Data frame containing the raw table
    df: DataFrame,
    /// Name of the date column
    date_column: String,
    /// Parsed date per row, in table order
    dates: Vec<NaiveDate>,
}

impl HistoryFrame {
    /// Load a historical dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Create a history frame from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let date_column = Self::detect_date_column(&df)?;
        let dates = Self::extract_dates(&df, &date_column)?;

        Ok(Self {
            df,
            date_column,
            dates,
        })
    }

    /// Build a frame from parallel column vectors (for testing)
    pub fn from_columns(dates: Vec<NaiveDate>, columns: Vec<(&str, Vec<f64>)>) -> Result<Self> {
        let date_series = Series::new(
            "dt",
            dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect::<Vec<String>>(),
        );

        let mut all = vec![date_series];
        for (name, values) in columns {
            all.push(Series::new(name, values));
        }

        let df = DataFrame::new(all)?;
        Self::from_dataframe(df)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower = name.to_lowercase();
            if lower == "dt" || lower == "date" {
                return Ok(name.to_string());
            }
        }

        Err(ForecastError::Data(
            "no date column (dt/date) found in dataset".to_string(),
        ))
    }

    /// Parse the date column into calendar days
    fn extract_dates(df: &DataFrame, column: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column)?;

        let dates = match col.dtype() {
            DataType::Utf8 => {
                let mut dates = Vec::with_capacity(df.height());
                for opt in col.utf8()?.into_iter() {
                    let raw = opt.ok_or_else(|| {
                        ForecastError::Data(format!("null date in column '{}'", column))
                    })?;
                    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                        ForecastError::Data(format!("invalid date '{}': {}", raw, e))
                    })?;
                    dates.push(date);
                }
                dates
            }
            DataType::Date => {
                let mut dates = Vec::with_capacity(df.height());
                for opt in col.date()?.into_iter() {
                    let days = opt.ok_or_else(|| {
                        ForecastError::Data(format!("null date in column '{}'", column))
                    })?;
                    let date = NaiveDate::from_ymd_opt(1970, 1, 1)
                        .and_then(|epoch| {
                            epoch.checked_add_signed(chrono::Duration::days(days as i64))
                        })
                        .ok_or_else(|| {
                            ForecastError::Data(format!(
                                "date out of range in column '{}'",
                                column
                            ))
                        })?;
                    dates.push(date);
                }
                dates
            }
            other => {
                return Err(ForecastError::Data(format!(
                    "unsupported date column type: {:?}",
                    other
                )))
            }
        };

        Ok(dates)
    }

    /// Get the parsed dates, one per row in table order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the date column name
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows in the dataset
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Names of the numeric (non-date) columns, in table order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|col| {
                col.name() != self.date_column
                    && matches!(
                        col.dtype(),
                        DataType::Float64
                            | DataType::Float32
                            | DataType::Int64
                            | DataType::Int32
                            | DataType::UInt64
                            | DataType::UInt32
                    )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Get a numeric column as f64 values, one per row
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let col = self
            .df
            .column(name)
            .map_err(|e| ForecastError::Data(format!("column '{}' not found: {}", name, e)))?;

        let values: Vec<f64> = match col.dtype() {
            DataType::Float64 => col.f64()?.into_iter().flatten().collect(),
            DataType::Float32 => col.f32()?.into_iter().flatten().map(|v| v as f64).collect(),
            DataType::Int64 => col.i64()?.into_iter().flatten().map(|v| v as f64).collect(),
            DataType::Int32 => col.i32()?.into_iter().flatten().map(|v| v as f64).collect(),
            DataType::UInt64 => col.u64()?.into_iter().flatten().map(|v| v as f64).collect(),
            DataType::UInt32 => col.u32()?.into_iter().flatten().map(|v| v as f64).collect(),
            _ => {
                return Err(ForecastError::Data(format!(
                    "column '{}' cannot be converted to f64",
                    name
                )))
            }
        };

        if values.len() != self.df.height() {
            return Err(ForecastError::Data(format!(
                "column '{}' contains null values",
                name
            )));
        }

        Ok(values)
    }

    /// Get a numeric column paired with its dates as a canonical series
    pub fn series(&self, name: &str) -> Result<Vec<DatedValue>> {
        let values = self.column(name)?;

        Ok(self
            .dates
            .iter()
            .zip(values)
            .map(|(date, value)| DatedValue::new(*date, value))
            .collect())
    }
}

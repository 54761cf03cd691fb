//! Opaque forecasting models and the numeric contract they were trained with.
//!
//! The trained model is an external artifact: a fixed-length vector goes in,
//! a fixed-length vector comes out. This module owns the `params` metadata
//! file describing that contract, the backend trait the numeric runtime
//! implements, and the per-hypothesis registry the pipeline resolves
//! handles from.

use crate::error::{ForecastError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Numeric contract of a pre-trained model, loaded once and immutable for
/// the lifetime of the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Trailing days of multi-column data per input window
    pub history_size: usize,
    /// Future days one inference call predicts
    pub horizon_size: usize,
    /// Training split length the model was exported with
    pub train_len: usize,
    /// Validation split length the model was exported with
    pub val_len: usize,
    /// Test split length the model was exported with
    pub test_len: usize,
    /// Divisor applied to the search-interest column before inference
    pub search_std: f64,
    /// Multiplier applied to raw outputs to recover item counts
    pub value_std: f64,
}

impl ModelParams {
    /// Load the params metadata file shipped next to the model weights.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse the two-line key/value layout the training pipeline exports:
    /// first line comma-separated keys, second line the matching values.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();
        let keys_line = lines
            .next()
            .ok_or_else(|| ForecastError::Data("params file is empty".to_string()))?;
        let values_line = lines
            .next()
            .ok_or_else(|| ForecastError::Data("params file has no values line".to_string()))?;

        let keys: Vec<&str> = keys_line.split(',').map(str::trim).collect();
        let values: Vec<&str> = values_line.split(',').map(str::trim).collect();
        if keys.len() != values.len() {
            return Err(ForecastError::Data(format!(
                "params file has {} keys but {} values",
                keys.len(),
                values.len()
            )));
        }

        let fields: HashMap<&str, &str> = keys.into_iter().zip(values).collect();

        let params = Self {
            history_size: parse_usize(&fields, "history_size")?,
            horizon_size: parse_usize(&fields, "horizon_size")?,
            train_len: parse_usize(&fields, "train_len")?,
            val_len: parse_usize(&fields, "val_len")?,
            test_len: parse_usize(&fields, "test_len")?,
            search_std: parse_f64(&fields, "search_std")?,
            value_std: parse_f64(&fields, "value_std")?,
        };
        params.validate()?;

        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        if self.history_size == 0 {
            return Err(ForecastError::Data(
                "history_size must be positive".to_string(),
            ));
        }
        if self.horizon_size == 0 {
            return Err(ForecastError::Data(
                "horizon_size must be positive".to_string(),
            ));
        }
        if !(self.search_std.is_finite() && self.search_std > 0.0) {
            return Err(ForecastError::Data(
                "search_std must be a positive number".to_string(),
            ));
        }
        if !(self.value_std.is_finite() && self.value_std > 0.0) {
            return Err(ForecastError::Data(
                "value_std must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

fn require<'a>(fields: &HashMap<&'a str, &'a str>, key: &str) -> Result<&'a str> {
    fields
        .get(key)
        .copied()
        .ok_or_else(|| ForecastError::Data(format!("params file is missing '{}'", key)))
}

fn parse_usize(fields: &HashMap<&str, &str>, key: &str) -> Result<usize> {
    let raw = require(fields, key)?;
    raw.parse()
        .map_err(|e| ForecastError::Data(format!("invalid '{}' value '{}': {}", key, raw, e)))
}

fn parse_f64(fields: &HashMap<&str, &str>, key: &str) -> Result<f64> {
    let raw = require(fields, key)?;
    raw.parse()
        .map_err(|e| ForecastError::Data(format!("invalid '{}' value '{}': {}", key, raw, e)))
}

/// Opaque pre-trained forecasting model.
///
/// Implementations wrap whatever numeric runtime hosts the weights.
/// Inference takes `&self` and must be reentrant-safe; handles are shared
/// read-only across concurrent requests.
pub trait InferenceBackend: Send + Sync + fmt::Debug {
    /// Run one inference: flattened feature vector in, raw horizon out.
    fn infer(&self, input: &[f64]) -> Result<Vec<f64>>;

    /// Name of the backend (for diagnostics)
    fn name(&self) -> &str;
}

/// A loaded model paired with the contract it was trained with.
#[derive(Debug)]
pub struct ModelHandle {
    params: ModelParams,
    backend: Box<dyn InferenceBackend>,
}

impl ModelHandle {
    /// Pair a backend with its params.
    pub fn new(params: ModelParams, backend: Box<dyn InferenceBackend>) -> Self {
        Self { params, backend }
    }

    /// Load a handle from a model directory: reads `params.csv` next to the
    /// weights and pairs it with the backend the caller constructed for
    /// those weights.
    pub fn load<P: AsRef<Path>>(model_dir: P, backend: Box<dyn InferenceBackend>) -> Result<Self> {
        let params = ModelParams::from_csv(model_dir.as_ref().join("params.csv"))?;
        tracing::info!(
            backend = backend.name(),
            history_size = params.history_size,
            horizon_size = params.horizon_size,
            "loaded forecasting model"
        );

        Ok(Self { params, backend })
    }

    /// The numeric contract of this model
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Run the backend over a shaped window and check the output length
    /// against the contract.
    pub fn predict(&self, window: &crate::features::FeatureWindow) -> Result<Vec<f64>> {
        if window.rows() != self.params.history_size {
            return Err(ForecastError::Model(format!(
                "window has {} rows, model expects {}",
                window.rows(),
                self.params.history_size
            )));
        }

        let raw = self.backend.infer(window.as_slice())?;

        if raw.len() != self.params.horizon_size {
            return Err(ForecastError::Model(format!(
                "backend '{}' returned {} values, expected horizon {}",
                self.backend.name(),
                raw.len(),
                self.params.horizon_size
            )));
        }

        Ok(raw)
    }
}

/// Forecasting hypothesis: which flow a model predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hypothesis {
    /// Items entering circulation
    Inflow,
    /// Items leaving circulation (demand)
    Outflow,
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hypothesis::Inflow => write!(f, "inflow"),
            Hypothesis::Outflow => write!(f, "outflow"),
        }
    }
}

/// Application-scoped registry of loaded models, one per hypothesis.
///
/// Handles are registered once at startup and only ever read afterwards;
/// the two hypotheses never share parameters or backends.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<Hypothesis, ModelHandle>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the model for a hypothesis.
    pub fn insert(&mut self, hypothesis: Hypothesis, handle: ModelHandle) {
        self.models.insert(hypothesis, handle);
    }

    /// Resolve the model for a hypothesis.
    pub fn get(&self, hypothesis: Hypothesis) -> Result<&ModelHandle> {
        self.models
            .get(&hypothesis)
            .ok_or_else(|| ForecastError::Model(format!("no model registered for {}", hypothesis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = "history_size,horizon_size,train_len,val_len,test_len,search_std,value_std\n30,7,300,40,40,25.0,120.5\n";

    #[test]
    fn test_parse_two_line_params() {
        let params = ModelParams::parse(PARAMS).unwrap();

        assert_eq!(params.history_size, 30);
        assert_eq!(params.horizon_size, 7);
        assert_eq!(params.train_len, 300);
        assert_eq!(params.val_len, 40);
        assert_eq!(params.test_len, 40);
        assert_eq!(params.search_std, 25.0);
        assert_eq!(params.value_std, 120.5);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let contents = "history_size,horizon_size\n30,7\n";
        assert!(ModelParams::parse(contents).is_err());
    }

    #[test]
    fn test_zero_horizon_is_an_error() {
        let contents = "history_size,horizon_size,train_len,val_len,test_len,search_std,value_std\n30,0,300,40,40,25.0,120.5\n";
        assert!(ModelParams::parse(contents).is_err());
    }

    #[test]
    fn test_key_value_count_mismatch_is_an_error() {
        let contents = "history_size,horizon_size\n30\n";
        assert!(ModelParams::parse(contents).is_err());
    }

    #[test]
    fn test_registry_resolves_by_hypothesis() {
        #[derive(Debug)]
        struct NullBackend;

        impl InferenceBackend for NullBackend {
            fn infer(&self, _input: &[f64]) -> Result<Vec<f64>> {
                Ok(vec![0.0; 7])
            }

            fn name(&self) -> &str {
                "null"
            }
        }

        let params = ModelParams::parse(PARAMS).unwrap();
        let mut registry = ModelRegistry::new();
        registry.insert(Hypothesis::Inflow, ModelHandle::new(params, Box::new(NullBackend)));

        assert!(registry.get(Hypothesis::Inflow).is_ok());
        assert!(registry.get(Hypothesis::Outflow).is_err());
    }
}

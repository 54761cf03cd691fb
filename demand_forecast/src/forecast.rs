//! Forecast adapter: from raw model output to a dated, denormalized series.

use crate::error::Result;
use crate::features::FeatureWindow;
use crate::model::ModelHandle;
use chrono::{Days, NaiveDate};
use series_math::DatedValue;

/// Run one inference and map the output back into calendar space.
///
/// Every raw output is multiplied by the model's `value_std` to recover item
/// counts, then stamped with consecutive dates starting the day after the
/// target: the forecast always covers `target+1 ..= target+horizon`, with no
/// gaps or repeats.
pub fn forecast_series(
    handle: &ModelHandle,
    window: &FeatureWindow,
    target_date: NaiveDate,
) -> Result<Vec<DatedValue>> {
    let raw = handle.predict(window)?;
    let value_std = handle.params().value_std;

    Ok(raw
        .iter()
        .enumerate()
        .map(|(offset, value)| {
            let date = target_date + Days::new(offset as u64 + 1);
            DatedValue::new(date, value * value_std)
        })
        .collect())
}

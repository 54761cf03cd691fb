//! Min/max rescaling of bounded series into the 0-100 range.

use crate::{DatedValue, Result, SeriesError};

/// Rescale every value to `round(100 * (v - min) / (max - min))`.
///
/// Used to bring raw search counts onto the same 0-100 scale Google Trends
/// ships natively. A constant series has no variance to rescale and is
/// rejected with [`SeriesError::ConstantSeries`]. Empty input yields empty
/// output.
pub fn normalize_series(series: &[DatedValue]) -> Result<Vec<DatedValue>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let min = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);

    if max - min == 0.0 {
        return Err(SeriesError::ConstantSeries);
    }

    Ok(series
        .iter()
        .map(|p| {
            let scaled = (100.0 * (p.value - min) / (max - min)).round();
            DatedValue::new(p.date, scaled)
        })
        .collect())
}

//! Linear interpolation of sparse dated series to daily density.

use crate::{DatedValue, Result, SeriesError};
use chrono::Days;

/// Fill gaps in a sparse series so that every calendar day between the
/// first and last date (inclusive) carries a value.
///
/// Values between two known points follow the straight line
/// `v0 + (v1 - v0) * (t - t0) / (t1 - t0)`; values at known dates are
/// reproduced exactly. The input must be cleaned (one value per date,
/// ascending order) and hold at least two points; interpolation is
/// undefined below that.
pub fn interpolate_daily(series: &[DatedValue]) -> Result<Vec<DatedValue>> {
    if series.len() < 2 {
        return Err(SeriesError::InsufficientData {
            needed: 2,
            got: series.len(),
        });
    }

    for pair in series.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(SeriesError::InvalidInput(
                "series must be cleaned and ordered ascending by date".to_string(),
            ));
        }
    }

    let total_days = (series[series.len() - 1].date - series[0].date).num_days() as usize + 1;
    let mut dense = Vec::with_capacity(total_days);

    for pair in series.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let span = (right.date - left.date).num_days();

        // Emit every day of the segment except its right endpoint; the next
        // segment (or the final push below) owns that one.
        for offset in 0..span {
            let date = left.date + Days::new(offset as u64);
            let fraction = offset as f64 / span as f64;
            let value = left.value + (right.value - left.value) * fraction;
            dense.push(DatedValue::new(date, value));
        }
    }

    dense.push(series[series.len() - 1]);

    Ok(dense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day;

    #[test]
    fn test_four_day_gap() {
        let sparse = vec![
            DatedValue::new(day(2022, 1, 1), 0.0),
            DatedValue::new(day(2022, 1, 4), 9.0),
        ];

        let dense = interpolate_daily(&sparse).unwrap();

        assert_eq!(
            dense,
            vec![
                DatedValue::new(day(2022, 1, 1), 0.0),
                DatedValue::new(day(2022, 1, 2), 3.0),
                DatedValue::new(day(2022, 1, 3), 6.0),
                DatedValue::new(day(2022, 1, 4), 9.0),
            ]
        );
    }

    #[test]
    fn test_known_dates_reproduced_exactly() {
        let sparse = vec![
            DatedValue::new(day(2022, 1, 1), 10.0),
            DatedValue::new(day(2022, 1, 3), 40.0),
            DatedValue::new(day(2022, 1, 8), 25.0),
        ];

        let dense = interpolate_daily(&sparse).unwrap();

        for known in &sparse {
            let hit = dense.iter().find(|p| p.date == known.date).unwrap();
            assert_eq!(hit.value, known.value);
        }
    }

    #[test]
    fn test_output_is_dense_over_span() {
        let sparse = vec![
            DatedValue::new(day(2022, 1, 1), 1.0),
            DatedValue::new(day(2022, 1, 10), 5.0),
        ];

        let dense = interpolate_daily(&sparse).unwrap();

        assert_eq!(dense.len(), 10);
        for (offset, point) in dense.iter().enumerate() {
            assert_eq!(point.date, day(2022, 1, 1) + Days::new(offset as u64));
        }
    }

    #[test]
    fn test_interpolated_values_stay_between_neighbors() {
        let sparse = vec![
            DatedValue::new(day(2022, 1, 1), 100.0),
            DatedValue::new(day(2022, 1, 7), 10.0),
        ];

        let dense = interpolate_daily(&sparse).unwrap();

        for point in &dense[1..dense.len() - 1] {
            assert!(point.value < 100.0 && point.value > 10.0);
        }
    }

    #[test]
    fn test_too_few_points_is_an_error() {
        let single = vec![DatedValue::new(day(2022, 1, 1), 1.0)];

        let err = interpolate_daily(&single).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::InsufficientData { needed: 2, got: 1 }
        ));
    }

    #[test]
    fn test_unordered_input_is_an_error() {
        let unordered = vec![
            DatedValue::new(day(2022, 1, 4), 9.0),
            DatedValue::new(day(2022, 1, 1), 0.0),
        ];

        assert!(interpolate_daily(&unordered).is_err());
    }
}

//! Calendar alignment of series against a target date.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use series_math::DatedValue;

/// Position of the first row whose date equals the target.
///
/// A target absent from the dataset is a hard error: the pipeline cannot
/// shape a feature window around a date the history does not contain.
pub fn index_of(dates: &[NaiveDate], target: NaiveDate) -> Result<usize> {
    dates
        .iter()
        .position(|date| *date == target)
        .ok_or(ForecastError::DateNotFound(target))
}

/// Split a series into the rows strictly before the target date and the
/// rows from the target date onward.
///
/// Concatenating the two parts reproduces the input exactly. A target on
/// the first row yields an empty `before`.
pub fn split_before_after(
    series: &[DatedValue],
    target: NaiveDate,
) -> Result<(Vec<DatedValue>, Vec<DatedValue>)> {
    let dates: Vec<NaiveDate> = series.iter().map(|point| point.date).collect();
    let index = index_of(&dates, target)?;

    Ok((series[..index].to_vec(), series[index..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<DatedValue> {
        (1..=5)
            .map(|d| DatedValue::new(day(2022, 1, d), d as f64))
            .collect()
    }

    #[test]
    fn test_index_of_finds_first_match() {
        let dates: Vec<NaiveDate> = sample().iter().map(|p| p.date).collect();
        assert_eq!(index_of(&dates, day(2022, 1, 3)).unwrap(), 2);
    }

    #[test]
    fn test_index_of_missing_date_is_an_error() {
        let dates: Vec<NaiveDate> = sample().iter().map(|p| p.date).collect();

        let err = index_of(&dates, day(2023, 6, 1)).unwrap_err();
        assert!(matches!(err, ForecastError::DateNotFound(d) if d == day(2023, 6, 1)));
    }

    #[test]
    fn test_split_concatenation_reproduces_input() {
        let series = sample();

        let (before, after) = split_before_after(&series, day(2022, 1, 3)).unwrap();

        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0].date, day(2022, 1, 3));

        let mut joined = before.clone();
        joined.extend(after);
        assert_eq!(joined, series);
    }

    #[test]
    fn test_split_on_first_row_gives_empty_before() {
        let series = sample();

        let (before, after) = split_before_after(&series, day(2022, 1, 1)).unwrap();

        assert!(before.is_empty());
        assert_eq!(after, series);
    }

    #[test]
    fn test_split_on_missing_date_is_an_error() {
        let series = sample();
        assert!(split_before_after(&series, day(2022, 2, 1)).is_err());
    }
}

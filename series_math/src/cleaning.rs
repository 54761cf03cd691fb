//! Series cleaning: collapse raw provider output to one value per date.
//!
//! Providers return overlapping sub-period chunks, so the same calendar day
//! can appear several times with different values. Some providers also use
//! zero as a "no data" sentinel.

use crate::DatedValue;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Deduplicate a raw dated series into one value per calendar day.
///
/// Entries sharing a date are collapsed to their maximum value. When
/// `drop_non_positive` is set, zero and negative values are discarded first
/// (for providers that encode "no data" as zero). Output is ordered
/// ascending by date. Empty input yields empty output.
pub fn clean_series(raw: &[DatedValue], drop_non_positive: bool) -> Vec<DatedValue> {
    let mut best: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for point in raw {
        if drop_non_positive && point.value <= 0.0 {
            continue;
        }
        best.entry(point.date)
            .and_modify(|value| {
                if point.value > *value {
                    *value = point.value;
                }
            })
            .or_insert(point.value);
    }

    best.into_iter()
        .map(|(date, value)| DatedValue::new(date, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day;

    #[test]
    fn test_duplicate_dates_keep_maximum() {
        let raw = vec![
            DatedValue::new(day(2022, 1, 1), 5.0),
            DatedValue::new(day(2022, 1, 1), 9.0),
            DatedValue::new(day(2022, 1, 2), 3.0),
        ];

        let cleaned = clean_series(&raw, false);

        assert_eq!(
            cleaned,
            vec![
                DatedValue::new(day(2022, 1, 1), 9.0),
                DatedValue::new(day(2022, 1, 2), 3.0),
            ]
        );
    }

    #[test]
    fn test_output_is_ordered_by_date() {
        let raw = vec![
            DatedValue::new(day(2022, 3, 1), 2.0),
            DatedValue::new(day(2022, 1, 1), 1.0),
            DatedValue::new(day(2022, 2, 1), 4.0),
        ];

        let cleaned = clean_series(&raw, false);

        let dates: Vec<_> = cleaned.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2022, 1, 1), day(2022, 2, 1), day(2022, 3, 1)]);
    }

    #[test]
    fn test_non_positive_values_dropped_when_requested() {
        let raw = vec![
            DatedValue::new(day(2022, 1, 1), 0.0),
            DatedValue::new(day(2022, 1, 2), 7.0),
            DatedValue::new(day(2022, 1, 3), -1.0),
        ];

        let cleaned = clean_series(&raw, true);
        assert_eq!(cleaned, vec![DatedValue::new(day(2022, 1, 2), 7.0)]);

        // Without the flag the sentinel values survive
        let kept = clean_series(&raw, false);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(clean_series(&[], true).is_empty());
    }
}

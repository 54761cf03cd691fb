//! Running-sum aggregation with partition carry-over.
//!
//! The dashboard displays "total items in circulation" charts as three
//! partitions (before / after / predicted). The later partitions start from
//! the final cumulative value of the partition preceding them so the three
//! curves join into one continuous line.

use crate::DatedValue;

/// Running total of a value sequence: `cum[i] = carry_in + sum(values[0..=i])`.
///
/// `carry_in` seeds the total with the preceding partition's final
/// cumulative value (zero for a leading partition). Empty input yields
/// empty output.
pub fn cumulative(values: &[f64], carry_in: f64) -> Vec<f64> {
    let mut total = carry_in;
    values
        .iter()
        .map(|value| {
            total += value;
            total
        })
        .collect()
}

/// Dated variant of [`cumulative`]: dates are preserved, values are replaced
/// by the running total.
pub fn cumulative_series(series: &[DatedValue], carry_in: f64) -> Vec<DatedValue> {
    let mut total = carry_in;
    series
        .iter()
        .map(|point| {
            total += point.value;
            DatedValue::new(point.date, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day;

    #[test]
    fn test_running_total_with_carry() {
        assert_eq!(cumulative(&[1.0, 2.0, 3.0], 10.0), vec![11.0, 13.0, 16.0]);
    }

    #[test]
    fn test_zero_carry_is_plain_prefix_sum() {
        let values = [4.0, 1.0, 7.0];
        let cum = cumulative(&values, 0.0);

        for (idx, total) in cum.iter().enumerate() {
            assert_eq!(*total, values[..=idx].iter().sum::<f64>());
        }
    }

    #[test]
    fn test_last_element_is_carry_plus_total() {
        let values = [2.0, 5.0, 8.0, 1.0];
        let cum = cumulative(&values, 3.0);

        assert_eq!(cum[cum.len() - 1], 3.0 + values.iter().sum::<f64>());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(cumulative(&[], 10.0).is_empty());
    }

    #[test]
    fn test_dated_variant_keeps_dates() {
        let series = vec![
            DatedValue::new(day(2022, 1, 1), 1.0),
            DatedValue::new(day(2022, 1, 2), 2.0),
        ];

        let cum = cumulative_series(&series, 5.0);

        assert_eq!(
            cum,
            vec![
                DatedValue::new(day(2022, 1, 1), 6.0),
                DatedValue::new(day(2022, 1, 2), 8.0),
            ]
        );
    }
}

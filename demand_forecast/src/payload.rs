//! JSON payload types the dashboard charts consume.
//!
//! Shapes mirror the frontend contract: each forecast ships the three
//! curve partitions plus their cumulative twins (camelCase `enterCum` /
//! `leaveCum` keys), and the demand forecast additionally returns the raw
//! stats series it used.

use serde::{Deserialize, Serialize};
use series_math::{cumulative_series, DatedValue};

/// The three curves charted for one series: history before the target
/// date, actual values from the target date onward, and the model's
/// prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partitions {
    /// Rows strictly before the target date
    pub before: Vec<DatedValue>,
    /// Rows from the target date onward
    pub after: Vec<DatedValue>,
    /// Predicted values, starting the day after the target date
    pub predict: Vec<DatedValue>,
}

impl Partitions {
    /// Running-sum view of the partitions.
    ///
    /// The `after` and `predict` curves carry the `before` curve's final
    /// cumulative total so the three displayed lines join continuously.
    pub fn cumulative_twin(&self) -> Partitions {
        let before = cumulative_series(&self.before, 0.0);
        let carry = before.last().map(|point| point.value).unwrap_or(0.0);

        Partitions {
            after: cumulative_series(&self.after, carry),
            predict: cumulative_series(&self.predict, carry),
            before,
        }
    }
}

/// Raw search-interest series used by a forecast, for the secondary chart
/// axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Cleaned Yandex Wordstats counts
    pub yandex: Vec<DatedValue>,
    /// Cleaned Google Trends interest (0-100)
    pub google: Vec<DatedValue>,
}

/// Inflow forecast payload (items entering circulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterForecast {
    /// Daily inflow curves
    pub enter: Partitions,
    /// Cumulative inflow curves
    pub enter_cum: Partitions,
}

/// Outflow forecast payload (demand for items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveForecast {
    /// Daily outflow curves
    pub leave: Partitions,
    /// Cumulative outflow curves
    pub leave_cum: Partitions,
    /// Raw stats series the forecast used
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn partitions() -> Partitions {
        Partitions {
            before: vec![
                DatedValue::new(day(2022, 1, 1), 1.0),
                DatedValue::new(day(2022, 1, 2), 2.0),
            ],
            after: vec![DatedValue::new(day(2022, 1, 3), 4.0)],
            predict: vec![
                DatedValue::new(day(2022, 1, 4), 5.0),
                DatedValue::new(day(2022, 1, 5), 6.0),
            ],
        }
    }

    #[test]
    fn test_cumulative_twin_carries_before_total() {
        let cum = partitions().cumulative_twin();

        assert_eq!(cum.before[1].value, 3.0);
        // Both later partitions start from the before curve's total
        assert_eq!(cum.after[0].value, 7.0);
        assert_eq!(cum.predict[0].value, 8.0);
        assert_eq!(cum.predict[1].value, 14.0);
    }

    #[test]
    fn test_cumulative_twin_of_empty_before() {
        let partitions = Partitions {
            before: Vec::new(),
            after: vec![DatedValue::new(day(2022, 1, 1), 2.0)],
            predict: Vec::new(),
        };

        let cum = partitions.cumulative_twin();
        assert!(cum.before.is_empty());
        assert_eq!(cum.after[0].value, 2.0);
    }

    #[test]
    fn test_enter_payload_uses_camel_case_cum_key() {
        let payload = EnterForecast {
            enter: partitions(),
            enter_cum: partitions().cumulative_twin(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""enterCum""#));
        assert!(json.contains(r#""before""#));
    }

    #[test]
    fn test_leave_payload_round_trips() {
        let payload = LeaveForecast {
            leave: partitions(),
            leave_cum: partitions().cumulative_twin(),
            stats: SearchStats {
                yandex: vec![DatedValue::new(day(2022, 1, 1), 340.0)],
                google: vec![DatedValue::new(day(2022, 1, 1), 55.0)],
            },
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""leaveCum""#));

        let back: LeaveForecast = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}

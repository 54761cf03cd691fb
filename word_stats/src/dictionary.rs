//! On-disk per-item stats dictionaries.
//!
//! The dashboard ships pre-collected stats per item name under a dictionary
//! directory:
//!
//! ```text
//! dictionary/
//!   google-trends/<name>.csv       date,value rows on the 0-100 scale
//!   yandex-wordstats/<name>.json   [{"date": "...", "totalCount": n}, ...]
//! ```
//!
//! Readers normalize through [`normalize_records`](crate::normalize_records)
//! so the rest of the pipeline only ever sees cleaned canonical series.

use crate::{normalize_records, ProviderRecord, Result, StatsError};
use chrono::NaiveDate;
use serde::Deserialize;
use series_math::DatedValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct GoogleRow {
    date: NaiveDate,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct YandexRow {
    date: NaiveDate,
    #[serde(rename = "totalCount")]
    total_count: f64,
}

/// Read a Google Trends dictionary file (`google-trends/<name>.csv`).
pub fn read_google_stats(dictionary_dir: &Path, name: &str) -> Result<Vec<DatedValue>> {
    let path = dictionary_dir
        .join("google-trends")
        .join(format!("{}.csv", name));

    let mut reader = csv::Reader::from_path(&path).map_err(|e| {
        StatsError::Parse(format!("cannot open {}: {}", path.display(), e))
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: GoogleRow = row?;
        records.push(ProviderRecord::GoogleTrends {
            date: row.date,
            value: row.value,
        });
    }

    Ok(normalize_records(records))
}

/// Read a Yandex Wordstats dictionary file (`yandex-wordstats/<name>.json`).
///
/// Zero counts are the provider's "no data" sentinel and are dropped during
/// normalization.
pub fn read_yandex_stats(dictionary_dir: &Path, name: &str) -> Result<Vec<DatedValue>> {
    let path = dictionary_dir
        .join("yandex-wordstats")
        .join(format!("{}.json", name));

    let file = File::open(&path)?;
    let rows: Vec<YandexRow> = serde_json::from_reader(BufReader::new(file))?;

    let records = rows
        .into_iter()
        .map(|row| ProviderRecord::YandexWordstat {
            date: row.date,
            total_count: row.total_count,
        })
        .collect();

    Ok(normalize_records(records))
}

/// List the item names available in the dictionary, sorted.
///
/// Names are the file stems of the Yandex Wordstats directory, which is the
/// authoritative item list.
pub fn available_names(dictionary_dir: &Path) -> Result<Vec<String>> {
    let dir = dictionary_dir.join("yandex-wordstats");

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dictionary_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();

        let google = dir.path().join("google-trends");
        fs::create_dir_all(&google).unwrap();
        fs::write(
            google.join("perfume.csv"),
            "date,value\n2022-01-01,40\n2022-01-02,0\n2022-01-03,100\n",
        )
        .unwrap();

        let yandex = dir.path().join("yandex-wordstats");
        fs::create_dir_all(&yandex).unwrap();
        fs::write(
            yandex.join("perfume.json"),
            r#"[
                {"date": "2022-01-01", "totalCount": 350},
                {"date": "2022-01-02", "totalCount": 0},
                {"date": "2022-01-03", "totalCount": 900}
            ]"#,
        )
        .unwrap();
        fs::write(yandex.join("sneakers.json"), "[]").unwrap();

        dir
    }

    #[test]
    fn test_read_google_stats() {
        let dir = dictionary_fixture();

        let series = read_google_stats(dir.path(), "perfume").unwrap();

        // Observed zeros survive for Google: zero interest is a value
        assert_eq!(series.len(), 3);
        assert_eq!(series[0], DatedValue::new(day(2022, 1, 1), 40.0));
        assert_eq!(series[1].value, 0.0);
    }

    #[test]
    fn test_read_yandex_stats_drops_sentinel_zeros() {
        let dir = dictionary_fixture();

        let series = read_yandex_stats(dir.path(), "perfume").unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0], DatedValue::new(day(2022, 1, 1), 350.0));
        assert_eq!(series[1], DatedValue::new(day(2022, 1, 3), 900.0));
    }

    #[test]
    fn test_available_names_sorted_stems() {
        let dir = dictionary_fixture();

        let names = available_names(dir.path()).unwrap();
        assert_eq!(names, vec!["perfume".to_string(), "sneakers".to_string()]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = dictionary_fixture();

        assert!(read_google_stats(dir.path(), "absent").is_err());
        assert!(read_yandex_stats(dir.path(), "absent").is_err());
    }
}

//! Asynchronous search-interest providers.
//!
//! Live trend APIs bucket long date ranges into coarse samples, so a daily
//! series has to be assembled by querying one calendar day at a time and
//! merging the chunks.

use crate::{Result, StatsError};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use series_math::{clean_series, DatedValue};

/// External search-interest source, queried per calendar period.
///
/// Implementations wrap a concrete upstream (live trends API, fixture
/// files, ...). Results are not guaranteed gap-free or duplicate-free;
/// callers normalize through the series cleaner.
#[async_trait]
pub trait TrendsProvider: Send + Sync {
    /// Fetch the interest series for `keyword` over `[start, end]` inclusive.
    async fn fetch(
        &self,
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DatedValue>>;
}

/// Assemble a daily interest series by querying the provider one calendar
/// day at a time and merging the chunks.
///
/// Chunks overlap on provider quirks, so the merged result is cleaned:
/// duplicates collapse to their per-date maximum and zero "no data" entries
/// are dropped. The range must be non-empty.
pub async fn fetch_interest_daily(
    provider: &dyn TrendsProvider,
    keyword: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DatedValue>> {
    if end < start {
        return Err(StatsError::Provider(format!(
            "invalid range: {} is after {}",
            start, end
        )));
    }

    let mut merged = Vec::new();
    let mut current = start;

    while current <= end {
        tracing::debug!(keyword, date = %current, "fetching daily interest chunk");
        let chunk = provider.fetch(keyword, current, current).await?;
        merged.extend(chunk);
        current = current + Days::new(1);
    }

    Ok(clean_series(&merged, true))
}

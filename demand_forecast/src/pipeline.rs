//! The dashboard service: request orchestration from raw inputs to payloads.
//!
//! One forecast request needs three external loads (historical dataset,
//! Yandex stats, Google stats); they are issued concurrently and awaited
//! together, each under the configured deadline. Everything after that is
//! the pure transformation chain: clean, normalize, interpolate, align,
//! shape, infer, denormalize, cumulate.

use crate::align;
use crate::data::HistoryFrame;
use crate::error::{ForecastError, Result};
use crate::features::shape_window;
use crate::forecast::forecast_series;
use crate::model::{Hypothesis, ModelRegistry};
use crate::payload::{EnterForecast, LeaveForecast, Partitions, SearchStats};
use chrono::NaiveDate;
use serde::Deserialize;
use series_math::{interpolate_daily, normalize_series, DatedValue};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use word_stats::{fetch_interest_daily, MemoCache, TrendsProvider};

/// Name of the search-interest column inside the feature window
pub const STATS_COLUMN: &str = "search_interest";

const INTEREST_CACHE_CAPACITY: usize = 64;
const INTEREST_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Static configuration of the dashboard service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the per-item stats dictionaries
    pub dictionary_dir: PathBuf,
    /// CSV with the aggregated items-entering-circulation history
    pub enter_history_path: PathBuf,
    /// CSV with the aggregated items-leaving-circulation history
    pub leave_history_path: PathBuf,
    /// Keyword whose stats feed the inflow forecast (that request carries
    /// no keyword of its own)
    pub default_keyword: String,
    /// Deadline for each external load, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dictionary_dir: PathBuf::from("dictionary"),
            enter_history_path: PathBuf::from("data/marking/enter-aggregate.csv"),
            leave_history_path: PathBuf::from("data/marking/leave-aggregate.csv"),
            default_keyword: "perfume".to_string(),
            fetch_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    /// Load the configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Deadline for each external load
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Application-scoped dashboard service.
///
/// Holds the only process-wide state: the read-only model registry, the
/// trends provider, and the memoization cache for live interest fetches.
/// Every request's working data is exclusively owned by that request.
pub struct DashboardService {
    config: DashboardConfig,
    registry: ModelRegistry,
    provider: Arc<dyn TrendsProvider>,
    interest_cache: MemoCache<String, Vec<DatedValue>>,
}

impl DashboardService {
    /// Create a service with the default interest cache policy.
    pub fn new(
        config: DashboardConfig,
        registry: ModelRegistry,
        provider: Arc<dyn TrendsProvider>,
    ) -> Self {
        Self::with_cache(
            config,
            registry,
            provider,
            MemoCache::new(INTEREST_CACHE_CAPACITY, INTEREST_CACHE_TTL),
        )
    }

    /// Create a service with an externally configured interest cache.
    pub fn with_cache(
        config: DashboardConfig,
        registry: ModelRegistry,
        provider: Arc<dyn TrendsProvider>,
        interest_cache: MemoCache<String, Vec<DatedValue>>,
    ) -> Self {
        Self {
            config,
            registry,
            provider,
            interest_cache,
        }
    }

    /// The service configuration
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Item names available in the stats dictionary.
    pub fn available_names(&self) -> Result<Vec<String>> {
        Ok(word_stats::available_names(&self.config.dictionary_dir)?)
    }

    /// Cleaned Google Trends dictionary series for an item.
    pub fn google_stats(&self, name: &str) -> Result<Vec<DatedValue>> {
        Ok(word_stats::read_google_stats(
            &self.config.dictionary_dir,
            name,
        )?)
    }

    /// Cleaned Yandex Wordstats dictionary series for an item.
    pub fn yandex_stats(&self, name: &str) -> Result<Vec<DatedValue>> {
        Ok(word_stats::read_yandex_stats(
            &self.config.dictionary_dir,
            name,
        )?)
    }

    /// Live daily interest series for a keyword, memoized per
    /// keyword-and-range.
    pub async fn interest_over_time(
        &self,
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DatedValue>> {
        let key = format!("{}:{}:{}", keyword, start, end);
        let provider = Arc::clone(&self.provider);
        let deadline = self.config.fetch_timeout();
        let keyword = keyword.to_string();

        self.interest_cache
            .get_or_try_insert_with(key, || async move {
                let fetch = fetch_interest_daily(provider.as_ref(), &keyword, start, end);
                match tokio::time::timeout(deadline, fetch).await {
                    Ok(series) => series.map_err(ForecastError::from),
                    Err(_) => Err(ForecastError::Timeout(format!(
                        "fetching interest for '{}'",
                        keyword
                    ))),
                }
            })
            .await
    }

    /// Forecast items entering circulation from `target_date` on.
    ///
    /// The inflow request carries no keyword, so the configured default
    /// keyword's stats feed the model.
    pub async fn predict_enter(&self, target_date: NaiveDate) -> Result<EnterForecast> {
        let keyword = self.config.default_keyword.clone();
        let history_path = self.config.enter_history_path.clone();

        let (enter, _stats) = self
            .predict_partitions(Hypothesis::Inflow, history_path, "enter_cnt", keyword, target_date)
            .await?;

        Ok(EnterForecast {
            enter_cum: enter.cumulative_twin(),
            enter,
        })
    }

    /// Forecast demand (items leaving circulation) for a named item from
    /// `target_date` on.
    pub async fn predict_leave(&self, name: &str, target_date: NaiveDate) -> Result<LeaveForecast> {
        let history_path = self.config.leave_history_path.clone();

        let (leave, stats) = self
            .predict_partitions(
                Hypothesis::Outflow,
                history_path,
                "leave_cnt",
                name.to_string(),
                target_date,
            )
            .await?;

        Ok(LeaveForecast {
            leave_cum: leave.cumulative_twin(),
            leave,
            stats,
        })
    }

    /// Shared prediction pipeline for both hypotheses.
    async fn predict_partitions(
        &self,
        hypothesis: Hypothesis,
        history_path: PathBuf,
        value_column: &str,
        keyword: String,
        target_date: NaiveDate,
    ) -> Result<(Partitions, SearchStats)> {
        let dictionary_dir = self.config.dictionary_dir.clone();
        let yandex_dir = dictionary_dir.clone();
        let google_dir = dictionary_dir;
        let yandex_keyword = keyword.clone();
        let google_keyword = keyword.clone();

        // The three external loads run concurrently, each under the deadline
        let (history, yandex, google) = tokio::try_join!(
            self.load_blocking("reading history dataset", move || {
                HistoryFrame::from_csv(&history_path)
            }),
            self.load_blocking("reading yandex stats", move || {
                Ok(word_stats::read_yandex_stats(&yandex_dir, &yandex_keyword)?)
            }),
            self.load_blocking("reading google stats", move || {
                Ok(word_stats::read_google_stats(&google_dir, &google_keyword)?)
            }),
        )?;

        let handle = self.registry.get(hypothesis)?;
        let params = handle.params();

        // Yandex counts are unbounded; bring them onto the 0-100 scale the
        // model was trained against, then densify to one value per day
        let normalized = normalize_series(&yandex)?;
        let dense_stats = interpolate_daily(&normalized)?;

        let flow = history.series(value_column)?;
        let (before, after) = align::split_before_after(&flow, target_date)?;
        let target_index = align::index_of(history.dates(), target_date)?;

        let feature_columns = vec![value_column.to_string(), STATS_COLUMN.to_string()];
        let window = shape_window(
            &history,
            target_index,
            params.history_size,
            &feature_columns,
            STATS_COLUMN,
            &dense_stats,
            params.search_std,
        )?;

        let predict: Vec<DatedValue> = forecast_series(handle, &window, target_date)?
            .into_iter()
            .map(|point| DatedValue::new(point.date, point.value.round()))
            .collect();

        tracing::info!(
            %hypothesis,
            %target_date,
            keyword = %keyword,
            before = before.len(),
            after = after.len(),
            horizon = predict.len(),
            "forecast pipeline completed"
        );

        Ok((
            Partitions {
                before,
                after,
                predict,
            },
            SearchStats { yandex, google },
        ))
    }

    /// Run a blocking load on the blocking pool under the fetch deadline.
    async fn load_blocking<T, F>(&self, what: &'static str, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tracing::debug!(what, "starting external load");
        let task = tokio::task::spawn_blocking(job);

        match tokio::time::timeout(self.config.fetch_timeout(), task).await {
            Ok(joined) => {
                joined.map_err(|e| ForecastError::Data(format!("{} task failed: {}", what, e)))?
            }
            Err(_) => Err(ForecastError::Timeout(what.to_string())),
        }
    }
}

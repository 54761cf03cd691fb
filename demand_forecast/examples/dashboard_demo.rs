//! End-to-end demo of the dashboard service against generated fixtures.
//!
//! Builds a throwaway data layout (stats dictionary, retail-flow history,
//! model params), registers a stub inference backend for both hypotheses,
//! and runs one inflow and one outflow forecast.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use demand_forecast::{
    DashboardConfig, DashboardService, Hypothesis, InferenceBackend, ModelHandle, ModelRegistry,
    Result,
};
use series_math::DatedValue;
use std::fs;
use std::sync::Arc;

#[derive(Debug)]
struct DecayBackend;

impl InferenceBackend for DecayBackend {
    fn infer(&self, input: &[f64]) -> Result<Vec<f64>> {
        // Fade the last observed level over the horizon
        let last = input.iter().rev().nth(1).copied().unwrap_or(0.0);
        Ok((1..=7).map(|step| last * 0.9_f64.powi(step)).collect())
    }

    fn name(&self) -> &str {
        "decay"
    }
}

struct NoopProvider;

#[async_trait]
impl word_stats::TrendsProvider for NoopProvider {
    async fn fetch(
        &self,
        _keyword: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> word_stats::Result<Vec<DatedValue>> {
        Ok(vec![DatedValue::new(start, 50.0)])
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_fixtures(root: &std::path::Path) -> std::io::Result<()> {
    let dictionary = root.join("dictionary");
    fs::create_dir_all(dictionary.join("google-trends"))?;
    fs::create_dir_all(dictionary.join("yandex-wordstats"))?;
    fs::write(
        dictionary.join("google-trends").join("perfume.csv"),
        "date,value\n2022-01-01,10\n2022-01-20,80\n2022-03-01,45\n",
    )?;
    fs::write(
        dictionary.join("yandex-wordstats").join("perfume.json"),
        r#"[
            {"date": "2022-01-01", "totalCount": 120},
            {"date": "2022-02-01", "totalCount": 480},
            {"date": "2022-03-01", "totalCount": 250}
        ]"#,
    )?;

    for column in ["enter_cnt", "leave_cnt"] {
        let mut csv = format!("dt,{}\n", column);
        for offset in 0..60u64 {
            let date = day(2022, 1, 1) + Days::new(offset);
            csv.push_str(&format!("{},{}\n", date.format("%Y-%m-%d"), 20 + offset % 7));
        }
        let file = if column == "enter_cnt" {
            "enter-aggregate.csv"
        } else {
            "leave-aggregate.csv"
        };
        fs::write(root.join(file), csv)?;
    }

    for model in ["enter", "leave"] {
        let dir = root.join("models").join(model);
        fs::create_dir_all(&dir)?;
        fs::write(
            dir.join("params.csv"),
            "history_size,horizon_size,train_len,val_len,test_len,search_std,value_std\n\
             14,7,300,40,40,25.0,1.0\n",
        )?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let root = tempfile::TempDir::new()?;
    write_fixtures(root.path())?;

    let mut registry = ModelRegistry::new();
    registry.insert(
        Hypothesis::Inflow,
        ModelHandle::load(root.path().join("models").join("enter"), Box::new(DecayBackend))?,
    );
    registry.insert(
        Hypothesis::Outflow,
        ModelHandle::load(root.path().join("models").join("leave"), Box::new(DecayBackend))?,
    );

    let config = DashboardConfig {
        dictionary_dir: root.path().join("dictionary"),
        enter_history_path: root.path().join("enter-aggregate.csv"),
        leave_history_path: root.path().join("leave-aggregate.csv"),
        default_keyword: "perfume".to_string(),
        fetch_timeout_secs: 30,
    };
    let service = DashboardService::new(config, registry, Arc::new(NoopProvider));

    println!("Available items: {:?}", service.available_names()?);

    let target = day(2022, 2, 15);

    let enter = service.predict_enter(target).await?;
    println!(
        "Inflow:  {} before / {} after / {} predicted days from {}",
        enter.enter.before.len(),
        enter.enter.after.len(),
        enter.enter.predict.len(),
        target,
    );

    let leave = service.predict_leave("perfume", target).await?;
    println!(
        "Outflow: first predicted day {} -> {:.0} items",
        leave.leave.predict[0].date, leave.leave.predict[0].value,
    );
    println!(
        "Payload JSON ({} bytes)",
        serde_json::to_string(&leave)?.len()
    );

    Ok(())
}

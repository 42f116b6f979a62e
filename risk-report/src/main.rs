use anyhow::{Context, Result};
use risk_engine::prelude::*;
use serde_json::json;
use tracing::{error, info};

mod config;

use config::{Config, ReportFormat};

// Risk report CLI
// Loads a strategy dataset (CSV or JSON) and prints its risk metrics

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env(std::env::args().nth(1))?;
    info!("Loading dataset from {}", config.data_path);

    let content = tokio::fs::read_to_string(&config.data_path)
        .await
        .with_context(|| format!("failed to read {}", config.data_path))?;
    let data = Dataset::from_str_with_format(&content, &config.data_path)
        .with_context(|| format!("failed to parse {}", config.data_path))?;
    info!(
        "Loaded {} rows, columns: {}",
        data.len(),
        data.column_names().collect::<Vec<_>>().join(", ")
    );

    let benchmark = match &config.benchmark_column {
        Some(column) => Some(benchmark_values(&data, column)?),
        None => None,
    };

    let engine = RiskEngine::from_config(&data, &config.risk);
    let metrics = match engine.summary(&config.risk, benchmark.as_deref()) {
        Ok(metrics) => metrics,
        Err(e) => {
            error!("Failed to compute risk metrics: {}", e);
            return Err(e.into());
        }
    };

    match config.report_format {
        ReportFormat::Text => {
            let report = RiskReport::new(metrics).with_title(format!("Risk Metrics: {}", config.data_path));
            println!("{}", report.format());
        }
        ReportFormat::Json => {
            let output = json!({
                "dataset": config.data_path,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "metrics": metrics,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Benchmark column as plain values, aligned with the dataset rows.
/// Missing entries become NaN and are dropped pairwise by the engine.
fn benchmark_values(data: &Dataset, column: &str) -> Result<Vec<f64>> {
    let values = data
        .column(column)
        .with_context(|| format!("benchmark column '{}' not found", column))?;
    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

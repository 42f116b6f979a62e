use anyhow::{anyhow, bail, Context};
use dotenv::dotenv;
use risk_engine::config::RiskConfig;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(anyhow!("unknown report format '{}', expected text or json", other)),
        }
    }
}

pub struct Config {
    pub data_path: String,
    pub benchmark_column: Option<String>,
    pub report_format: ReportFormat,
    pub risk: RiskConfig,
}

impl Config {
    /// Load from the process environment; `cli_path` overrides RISK_DATA_PATH
    pub fn from_env(cli_path: Option<String>) -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(cli_path, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        cli_path: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, anyhow::Error> {
        let data_path = match cli_path.or_else(|| lookup("RISK_DATA_PATH")) {
            Some(path) => path,
            None => bail!("no dataset given: pass a path or set RISK_DATA_PATH"),
        };

        let defaults = RiskConfig::default();
        let risk = RiskConfig {
            confidence_level: parse_or(&lookup, "CONFIDENCE_LEVEL", defaults.confidence_level)?,
            risk_free_rate: parse_or(&lookup, "RISK_FREE_RATE", defaults.risk_free_rate)?,
            periods_per_year: parse_or(&lookup, "PERIODS_PER_YEAR", defaults.periods_per_year)?,
        };
        risk.validate()?;

        Ok(Config {
            data_path,
            benchmark_column: lookup("BENCHMARK_COLUMN").filter(|c| !c.is_empty()),
            report_format: parse_or(&lookup, "REPORT_FORMAT", ReportFormat::Text)?,
            risk,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("invalid {}='{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(None, lookup(&[("RISK_DATA_PATH", "data.csv")])).unwrap();
        assert_eq!(config.data_path, "data.csv");
        assert_eq!(config.benchmark_column, None);
        assert_eq!(config.report_format, ReportFormat::Text);
        assert_eq!(config.risk.confidence_level, 0.95);
        assert_eq!(config.risk.periods_per_year, 252.0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(
            Some("cli.json".to_string()),
            lookup(&[
                ("RISK_DATA_PATH", "ignored.csv"),
                ("CONFIDENCE_LEVEL", "0.99"),
                ("RISK_FREE_RATE", "0.02"),
                ("BENCHMARK_COLUMN", "spy_returns"),
                ("REPORT_FORMAT", "JSON"),
            ]),
        )
        .unwrap();
        assert_eq!(config.data_path, "cli.json");
        assert_eq!(config.benchmark_column.as_deref(), Some("spy_returns"));
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.risk.confidence_level, 0.99);
        assert_eq!(config.risk.risk_free_rate, 0.02);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Config::from_lookup(None, lookup(&[])).is_err());
        assert!(Config::from_lookup(
            None,
            lookup(&[("RISK_DATA_PATH", "a.csv"), ("CONFIDENCE_LEVEL", "high")])
        )
        .is_err());
        assert!(Config::from_lookup(
            None,
            lookup(&[("RISK_DATA_PATH", "a.csv"), ("CONFIDENCE_LEVEL", "1.5")])
        )
        .is_err());
        assert!(Config::from_lookup(
            None,
            lookup(&[("RISK_DATA_PATH", "a.csv"), ("REPORT_FORMAT", "xml")])
        )
        .is_err());
    }
}

//! Risk report generation

use serde::{Deserialize, Serialize};

/// Every metric the engine computes, evaluated once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
    /// Annualized Sortino ratio
    pub sortino_ratio: f64,
    /// Maximum drawdown (negative fraction, e.g. -0.2 = 20% below peak)
    pub max_drawdown: f64,
    /// Value at Risk at `confidence_level`
    pub value_at_risk: f64,
    /// Conditional Value at Risk at `confidence_level`
    pub cvar: f64,
    /// Beta against the benchmark, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub beta: Option<f64>,
    /// Confidence level used for VaR and CVaR
    pub confidence_level: f64,
    /// Number of non-missing return observations
    pub observations: usize,
}

/// Risk report
#[derive(Debug)]
pub struct RiskReport {
    metrics: RiskMetrics,
    title: String,
}

impl RiskReport {
    /// Create new report from metrics
    pub fn new(metrics: RiskMetrics) -> Self {
        Self {
            metrics,
            title: "Risk Metrics".to_string(),
        }
    }

    /// Set the report heading (e.g. the dataset name)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Format report as string
    pub fn format(&self) -> String {
        let confidence = self.metrics.confidence_level * 100.0;
        let beta = self
            .metrics
            .beta
            .map(|b| format!("{:.4}", b))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            r#"
{title}
{underline}
Observations: {}
Sharpe Ratio: {:.4}
Sortino Ratio: {:.4}
Maximum Drawdown: {:.2}%
Value at Risk ({confidence:.0}%): {:.2}%
CVaR ({confidence:.0}%): {:.2}%
Beta: {beta}
"#,
            self.metrics.observations,
            self.metrics.sharpe_ratio,
            self.metrics.sortino_ratio,
            self.metrics.max_drawdown * 100.0,
            self.metrics.value_at_risk * 100.0,
            self.metrics.cvar * 100.0,
            title = self.title,
            underline = "=".repeat(self.title.chars().count()),
        )
    }

    /// Get metrics reference
    pub fn metrics(&self) -> &RiskMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(beta: Option<f64>) -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: 1.5,
            sortino_ratio: 2.25,
            max_drawdown: -0.02,
            value_at_risk: -0.018,
            cvar: -0.02,
            beta,
            confidence_level: 0.95,
            observations: 5,
        }
    }

    #[test]
    fn test_format() {
        let text = RiskReport::new(metrics(Some(0.8))).with_title("SPY").format();
        assert!(text.contains("SPY\n===\n"));
        assert!(text.contains("Observations: 5"));
        assert!(text.contains("Maximum Drawdown: -2.00%"));
        assert!(text.contains("Value at Risk (95%): -1.80%"));
        assert!(text.contains("Beta: 0.8000"));
    }

    #[test]
    fn test_format_without_benchmark() {
        let report = RiskReport::new(metrics(None));
        assert!(report.format().contains("Beta: n/a"));
        assert_eq!(report.metrics().observations, 5);
    }

    #[test]
    fn test_json_omits_missing_beta() {
        let json = serde_json::to_value(metrics(None)).unwrap();
        assert!(json.get("beta").is_none());
        assert_eq!(json["observations"], 5);
    }
}

//! Risk engine
//!
//! Every query re-derives its input from the borrowed dataset, so calls are
//! independent and the engine can be shared freely between threads.

use tracing::debug;

use crate::config::{check_confidence_level, RiskConfig, TRADING_DAYS_PER_YEAR};
use crate::data::{Dataset, CUMULATIVE_STRATEGY, STRATEGY_RETURNS};
use crate::report::RiskMetrics;
use crate::stats;
use crate::{Result, RiskError};

/// Computes risk and performance metrics from a borrowed dataset.
///
/// Column presence is not checked up front; each method reports
/// [`RiskError::MissingColumn`] for the column it needs.
#[derive(Debug, Clone, Copy)]
pub struct RiskEngine<'a> {
    data: &'a Dataset,
    periods_per_year: f64,
}

impl<'a> RiskEngine<'a> {
    /// Create new engine over a dataset, annualizing with 252 trading days
    pub fn new(data: &'a Dataset) -> Self {
        Self {
            data,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }

    /// Create engine using the annualization factor from a config
    pub fn from_config(data: &'a Dataset, config: &RiskConfig) -> Self {
        Self::new(data).with_periods_per_year(config.periods_per_year)
    }

    /// Override the annualization factor
    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    /// The dataset this engine reads from
    pub fn data(&self) -> &'a Dataset {
        self.data
    }

    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Strategy returns with missing values dropped
    pub fn returns(&self) -> Result<Vec<f64>> {
        self.data.present_values(STRATEGY_RETURNS)
    }

    /// Annualized Sharpe ratio: mean / sample std * sqrt(periods).
    ///
    /// Returns 0.0 when the standard deviation is zero or undefined (fewer
    /// than two observations).
    pub fn sharpe_ratio(&self) -> Result<f64> {
        let returns = self.returns()?;
        let std = stats::sample_std(&returns);
        if !non_zero(std) {
            debug!(observations = returns.len(), "sharpe ratio: zero volatility, returning 0");
            return Ok(0.0);
        }
        Ok(stats::mean(&returns) / std * self.periods_per_year.sqrt())
    }

    /// Annualized Sortino ratio against an annual risk-free rate.
    ///
    /// Downside deviation is the sample std of the negative returns only.
    /// Without at least two negative returns it is undefined, and like a zero
    /// downside deviation that yields 0.0.
    pub fn sortino_ratio(&self, risk_free_rate: f64) -> Result<f64> {
        let returns = self.returns()?;
        let negative: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
        let downside_std = stats::sample_std(&negative);
        if !non_zero(downside_std) {
            debug!(
                negative = negative.len(),
                "sortino ratio: no downside deviation, returning 0"
            );
            return Ok(0.0);
        }

        let expected_return = stats::mean(&returns) - risk_free_rate / self.periods_per_year;
        Ok(expected_return / downside_std * self.periods_per_year.sqrt())
    }

    /// Most negative fractional decline of the equity curve from its running peak.
    ///
    /// 0.0 for a non-decreasing curve, NaN when the column has no values.
    /// The curve is expected to start positive so the peak is never zero.
    pub fn max_drawdown(&self) -> Result<f64> {
        let cumulative = self.data.column(CUMULATIVE_STRATEGY)?;

        let mut peak = f64::NEG_INFINITY;
        let mut worst: Option<f64> = None;
        for value in cumulative.iter().flatten().copied() {
            peak = peak.max(value);
            let drawdown = (value - peak) / peak;
            worst = Some(worst.map_or(drawdown, |w| w.min(drawdown)));
        }

        Ok(worst.unwrap_or(f64::NAN))
    }

    /// Historical Value at Risk: the `(1 - confidence_level)` percentile of
    /// returns, linearly interpolated. Usually negative (a loss).
    pub fn value_at_risk(&self, confidence_level: f64) -> Result<f64> {
        let returns = self.returns()?;
        var_threshold(&returns, confidence_level)
    }

    /// Conditional Value at Risk: mean of the returns at or below the VaR
    /// threshold. NaN if the tail is empty.
    pub fn cvar(&self, confidence_level: f64) -> Result<f64> {
        let returns = self.returns()?;
        let threshold = var_threshold(&returns, confidence_level)?;
        let tail: Vec<f64> = returns.into_iter().filter(|r| *r <= threshold).collect();
        Ok(stats::mean(&tail))
    }

    /// Beta of strategy returns against a benchmark: cov(s, b) / var(b).
    ///
    /// A benchmark as long as the dataset is aligned row for row and rows
    /// missing on either side are dropped; one as long as the non-missing
    /// returns is paired with them directly. NaN when the benchmark has no
    /// variance.
    pub fn beta(&self, benchmark_returns: &[f64]) -> Result<f64> {
        let (strategy, benchmark) = self.align_benchmark(benchmark_returns)?;

        let variance = stats::sample_variance(&benchmark);
        if !non_zero(variance) {
            debug!(observations = benchmark.len(), "beta: zero benchmark variance");
            return Ok(f64::NAN);
        }
        Ok(stats::sample_covariance(&strategy, &benchmark) / variance)
    }

    /// Evaluate every metric once with the confidence level and risk-free
    /// rate from `config`.
    ///
    /// Annualization uses this engine's `periods_per_year`; build the engine
    /// with [`RiskEngine::from_config`] to take it from the config as well.
    /// Beta is only computed when a benchmark is supplied.
    pub fn summary(&self, config: &RiskConfig, benchmark: Option<&[f64]>) -> Result<RiskMetrics> {
        config.validate()?;
        Ok(RiskMetrics {
            sharpe_ratio: self.sharpe_ratio()?,
            sortino_ratio: self.sortino_ratio(config.risk_free_rate)?,
            max_drawdown: self.max_drawdown()?,
            value_at_risk: self.value_at_risk(config.confidence_level)?,
            cvar: self.cvar(config.confidence_level)?,
            beta: benchmark.map(|b| self.beta(b)).transpose()?,
            confidence_level: config.confidence_level,
            observations: self.returns()?.len(),
        })
    }

    fn align_benchmark(&self, benchmark: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        let column = self.data.column(STRATEGY_RETURNS)?;

        if benchmark.len() == column.len() {
            return Ok(column
                .iter()
                .zip(benchmark)
                .filter_map(|(s, b)| s.filter(|_| !b.is_nan()).map(|s| (s, *b)))
                .unzip());
        }

        let returns = self.returns()?;
        if benchmark.len() == returns.len() {
            return Ok((returns, benchmark.to_vec()));
        }

        Err(RiskError::DimensionMismatch {
            expected: column.len(),
            actual: benchmark.len(),
        })
    }
}

fn var_threshold(returns: &[f64], confidence_level: f64) -> Result<f64> {
    check_confidence_level(confidence_level)?;
    stats::percentile(returns, 1.0 - confidence_level)
        .ok_or_else(|| RiskError::EmptySeries(STRATEGY_RETURNS.to_string()))
}

/// Usable as a denominator: defined and not exactly zero
fn non_zero(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

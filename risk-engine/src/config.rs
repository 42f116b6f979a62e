//! Risk metrics configuration

use serde::{Deserialize, Serialize};

use crate::{Result, RiskError};

/// Assumed number of trading periods per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Confidence level used for VaR / CVaR when the caller has no preference.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Annual risk-free rate used by the Sortino ratio when none is given.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0;

/// Risk metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Confidence level for VaR and CVaR (e.g., 0.95 = 95%)
    pub confidence_level: f64,
    /// Annual risk-free rate (e.g., 0.02 = 2%)
    pub risk_free_rate: f64,
    /// Periods per year for annualization
    pub periods_per_year: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl RiskConfig {
    /// Check that every field is usable by the engine
    pub fn validate(&self) -> Result<()> {
        check_confidence_level(self.confidence_level)?;
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(RiskError::InvalidConfig(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(RiskError::InvalidConfig(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_confidence_level(confidence_level: f64) -> Result<()> {
    if (0.0..=1.0).contains(&confidence_level) {
        Ok(())
    } else {
        Err(RiskError::InvalidConfidenceLevel(confidence_level))
    }
}

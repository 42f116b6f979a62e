//! Risk-Engine: risk and performance metrics over strategy return series
//!
//! This crate reduces a precomputed strategy return series (and its cumulative
//! equity curve) to the usual quantitative-finance scalars.
//!
//! # Features
//!
//! - **Dataset**: named numeric columns with missing values, loaded from CSV or JSON
//! - **Risk Engine**: Sharpe, Sortino, maximum drawdown, VaR, CVaR and beta
//! - **Statistics**: mean, sample variance/covariance, linear-interpolated percentiles
//! - **Reporting**: a serializable metrics summary and a text report
//!
//! # Example
//!
//! ```
//! use risk_engine::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let data = Dataset::new()
//!         .with_values(STRATEGY_RETURNS, &[0.01, -0.02, 0.03, -0.01, 0.02])?
//!         .with_values(CUMULATIVE_STRATEGY, &[100.0, 98.0, 101.0, 100.0, 102.0])?;
//!
//!     let engine = RiskEngine::new(&data);
//!     assert!((engine.max_drawdown()? + 0.02).abs() < 1e-12);
//!     assert!(engine.cvar(DEFAULT_CONFIDENCE_LEVEL)? <= engine.value_at_risk(DEFAULT_CONFIDENCE_LEVEL)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::engine::*;
    pub use crate::error::RiskError;
    pub use crate::report::*;

    pub use crate::Result;
}

pub use error::RiskError;

/// Result type alias
pub type Result<T> = std::result::Result<T, RiskError>;

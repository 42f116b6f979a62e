//! Error types

/// Errors surfaced by dataset access, loading and metric computation.
///
/// Degenerate inputs (zero variance, no downside observations) are not errors;
/// each metric documents the value it falls back to instead.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("missing column '{0}' in dataset")]
    MissingColumn(String),

    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("confidence level must be within [0, 1], got {0}")]
    InvalidConfidenceLevel(f64),

    #[error("column '{0}' has no observations")]
    EmptySeries(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

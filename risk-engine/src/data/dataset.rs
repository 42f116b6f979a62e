//! Tabular dataset of named numeric columns

use std::collections::BTreeMap;

use crate::{Result, RiskError};

/// Periodic strategy returns, may contain missing values
pub const STRATEGY_RETURNS: &str = "strategy_returns";
/// Running equity curve, positive and complete
pub const CUMULATIVE_STRATEGY: &str = "cumulative_strategy";

/// Ordered table of numeric columns sharing one row count.
///
/// Each row is a time step. `None` marks a missing value; NaN inputs are
/// stored as `None` so both spellings of "missing" behave the same.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: usize,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Add a column of plain values, builder style
    pub fn with_values(mut self, name: impl Into<String>, values: &[f64]) -> Result<Self> {
        self.insert_values(name, values)?;
        Ok(self)
    }

    /// Insert or replace a column.
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        let replacing_only_column = self.columns.len() == 1 && self.columns.contains_key(&name);
        if !self.columns.is_empty() && !replacing_only_column && values.len() != self.rows {
            return Err(RiskError::DimensionMismatch {
                expected: self.rows,
                actual: values.len(),
            });
        }

        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect::<Vec<_>>();
        self.rows = values.len();
        self.columns.insert(name, values);
        Ok(())
    }

    /// Insert a column of plain values; NaN entries become missing
    pub fn insert_values(&mut self, name: impl Into<String>, values: &[f64]) -> Result<()> {
        self.insert_column(name, values.iter().copied().map(Some).collect())
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| RiskError::MissingColumn(name.to_string()))
    }

    /// Get the non-missing values of a column, in row order
    pub fn present_values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.column(name)?.iter().flatten().copied().collect())
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

//! Dataset loading from CSV and JSON

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::data::Dataset;
use crate::{Result, RiskError};

/// Field spellings treated as missing in CSV input
const MISSING_MARKERS: [&str; 6] = ["", "nan", "NaN", "NA", "null", "None"];

impl Dataset {
    /// Load a dataset from a `.csv` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        match extension(path).as_deref() {
            Some("csv") => Self::from_csv_reader(file),
            Some("json") => {
                let value: Value = serde_json::from_reader(file)?;
                Self::from_json_value(&value)
            }
            _ => Err(RiskError::InvalidData(format!(
                "unsupported dataset format: {}",
                path.display()
            ))),
        }
    }

    /// Parse a dataset from in-memory text, choosing the format by file name
    pub fn from_str_with_format(content: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("csv") => Self::from_csv_reader(content.as_bytes()),
            Some("json") => Self::from_json_str(content),
            _ => Err(RiskError::InvalidData(format!(
                "unsupported dataset format: {}",
                path.display()
            ))),
        }
    }

    /// Read CSV with a header row.
    ///
    /// Columns with any non-numeric, non-missing field (a date index, a
    /// ticker) are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut columns: Vec<Option<Vec<Option<f64>>>> = vec![Some(Vec::new()); headers.len()];
        let mut rows = 0usize;

        for record in reader.records() {
            let record = record?;
            rows += 1;
            for (idx, column) in columns.iter_mut().enumerate() {
                let Some(values) = column.as_mut() else { continue };
                let field = record.get(idx).unwrap_or("").trim();
                if MISSING_MARKERS.contains(&field) {
                    values.push(None);
                } else if let Ok(value) = field.parse::<f64>() {
                    values.push(Some(value));
                } else {
                    *column = None;
                }
            }
        }

        let mut dataset = Dataset::new();
        for (name, column) in headers.iter().zip(columns) {
            match column {
                Some(values) => dataset.insert_column(name, values)?,
                None => debug!(column = name, "skipping non-numeric CSV column"),
            }
        }

        debug!(rows, columns = dataset.column_names().count(), "loaded CSV dataset");
        Ok(dataset)
    }

    /// Parse JSON in records or columnar layout
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// Build a dataset from an already parsed JSON document.
    ///
    /// Accepts `[{"col": 1.0, ...}, ...]` (one object per row) or
    /// `{"col": [1.0, null, ...], ...}` (one array per column).
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let dataset = match value {
            Value::Array(records) => records_to_dataset(records)?,
            Value::Object(map) => {
                let mut dataset = Dataset::new();
                for (name, column) in map {
                    let Value::Array(cells) = column else {
                        return Err(RiskError::InvalidData(format!(
                            "column '{}' is not an array",
                            name
                        )));
                    };
                    let values = cells
                        .iter()
                        .map(|cell| json_number(name, cell))
                        .collect::<Result<Vec<_>>>()?;
                    dataset.insert_column(name.as_str(), values)?;
                }
                dataset
            }
            _ => {
                return Err(RiskError::InvalidData(
                    "expected a JSON array of records or an object of columns".to_string(),
                ))
            }
        };

        debug!(
            rows = dataset.len(),
            columns = dataset.column_names().count(),
            "loaded JSON dataset"
        );
        Ok(dataset)
    }
}

fn records_to_dataset(records: &[Value]) -> Result<Dataset> {
    let mut columns: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(RiskError::InvalidData(format!("row {} is not an object", row)));
        };
        for (name, cell) in fields {
            let value = json_number(name, cell)?;
            // Columns first seen mid-file are missing for the earlier rows
            let column = columns
                .entry(name.clone())
                .or_insert_with(|| vec![None; row]);
            column.resize(row, None);
            column.push(value);
        }
    }

    let mut dataset = Dataset::new();
    for (name, mut values) in columns {
        values.resize(records.len(), None);
        dataset.insert_column(name, values)?;
    }
    Ok(dataset)
}

fn json_number(column: &str, cell: &Value) -> Result<Option<f64>> {
    match cell {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        other => Err(RiskError::InvalidData(format!(
            "non-numeric value {} in column '{}'",
            other, column
        ))),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CUMULATIVE_STRATEGY, STRATEGY_RETURNS};
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_csv_with_missing_and_index() {
        let csv = "date,strategy_returns,cumulative_strategy\n\
                   2024-01-01,,100\n\
                   2024-01-02,-0.02,98\n\
                   2024-01-03,NaN,98\n\
                   2024-01-04,0.03,100.94\n";
        let data = Dataset::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(data.len(), 4);
        assert!(!data.has_column("date"));
        assert_eq!(
            data.column(STRATEGY_RETURNS).unwrap(),
            &[None, Some(-0.02), None, Some(0.03)]
        );
        assert_eq!(data.present_values(CUMULATIVE_STRATEGY).unwrap().len(), 4);
    }

    #[test]
    fn test_load_json_records() {
        let json = r#"[
            {"strategy_returns": null, "cumulative_strategy": 100.0},
            {"strategy_returns": 0.01, "cumulative_strategy": 101.0},
            {"strategy_returns": -0.02, "cumulative_strategy": 98.98, "benchmark": 0.005}
        ]"#;
        let data = Dataset::from_json_str(json).unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(
            data.column(STRATEGY_RETURNS).unwrap(),
            &[None, Some(0.01), Some(-0.02)]
        );
        assert_eq!(data.column("benchmark").unwrap(), &[None, None, Some(0.005)]);
    }

    #[test]
    fn test_load_json_columns() {
        let json = r#"{"strategy_returns": [0.01, null], "cumulative_strategy": [100, 99]}"#;
        let data = Dataset::from_json_str(json).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.column(CUMULATIVE_STRATEGY).unwrap(), &[Some(100.0), Some(99.0)]);

        let ragged = r#"{"a": [1.0, 2.0], "b": [1.0]}"#;
        assert!(matches!(
            Dataset::from_json_str(ragged),
            Err(RiskError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric_json() {
        let json = r#"[{"strategy_returns": "high"}]"#;
        assert!(matches!(
            Dataset::from_json_str(json),
            Err(RiskError::InvalidData(_))
        ));
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "strategy_returns,cumulative_strategy").unwrap();
        writeln!(file, "0.01,101").unwrap();
        writeln!(file, "-0.01,99.99").unwrap();

        let data = Dataset::from_path(file.path()).unwrap();
        assert_eq!(data.len(), 2);

        let other = Builder::new().suffix(".parquet").tempfile().unwrap();
        assert!(matches!(
            Dataset::from_path(other.path()),
            Err(RiskError::InvalidData(_))
        ));
    }

    #[test]
    fn test_from_str_with_format() {
        let data =
            Dataset::from_str_with_format(r#"{"strategy_returns": [0.5]}"#, "returns.JSON").unwrap();
        assert_eq!(data.len(), 1);
    }
}

//! Dated multivariate observations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Canonical name of the index column.
pub const DATE_COLUMN: &str = "date";

/// A dated, row-major table of numeric observations.
///
/// `values[t][j]` is column `j` observed at `dates[t]`. The last column is the
/// forecast target. Deserialization goes through [`Frame::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameParts")]
pub struct Frame {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// Unchecked wire shape of a [`Frame`].
#[derive(Deserialize)]
struct FrameParts {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<FrameParts> for Frame {
    type Error = DataError;

    fn try_from(parts: FrameParts) -> Result<Self> {
        Frame::new(parts.dates, parts.columns, parts.values)
    }
}

impl Frame {
    /// Build a frame, validating shape, finiteness and date ordering.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(DataError::NoDataColumns);
        }
        if dates.is_empty() {
            return Err(DataError::NoData);
        }
        if dates.len() != values.len() {
            return Err(DataError::Csv(format!(
                "{} dates but {} rows",
                dates.len(),
                values.len()
            )));
        }
        for (row, obs) in values.iter().enumerate() {
            if obs.len() != columns.len() {
                return Err(DataError::Csv(format!(
                    "row {} has {} values, expected {}",
                    row + 1,
                    obs.len(),
                    columns.len()
                )));
            }
            if let Some(j) = obs.iter().position(|v| !v.is_finite()) {
                return Err(DataError::InvalidValue {
                    row: row + 1,
                    column: columns[j].clone(),
                    value: obs[j].to_string(),
                });
            }
        }
        if let Some(i) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DataError::UnorderedDates { row: i + 2 });
        }

        Ok(Self {
            dates,
            columns,
            values,
        })
    }

    /// Number of observations.
    pub fn nobs(&self) -> usize {
        self.dates.len()
    }

    /// Number of series.
    pub fn neqs(&self) -> usize {
        self.columns.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major observations.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Date of the final observation.
    pub fn last_date(&self) -> NaiveDate {
        // Non-empty by construction
        self.dates[self.dates.len() - 1]
    }

    /// Name of the forecast target, always the last column.
    pub fn target_column(&self) -> &str {
        &self.columns[self.columns.len() - 1]
    }

    /// Values of column `j` in date order.
    pub fn column(&self, j: usize) -> Option<Vec<f64>> {
        if j >= self.columns.len() {
            return None;
        }
        Some(self.values.iter().map(|row| row[j]).collect())
    }

    /// Values of the target column in date order.
    pub fn target_values(&self) -> Vec<f64> {
        self.values.iter().map(|row| row[row.len() - 1]).collect()
    }

    /// Index of a column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The last `n` rows; the whole frame when `n` is zero or exceeds the length.
    pub fn tail(&self, n: usize) -> &[Vec<f64>] {
        if n == 0 || n >= self.values.len() {
            &self.values
        } else {
            &self.values[self.values.len() - n..]
        }
    }
}

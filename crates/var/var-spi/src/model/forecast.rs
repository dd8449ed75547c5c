//! Forecast container

use serde::{Deserialize, Serialize};

/// Point forecasts with symmetric intervals for every series.
///
/// All matrices are `steps x neqs`, row `h` holding the forecast `h + 1`
/// periods after the last observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarForecast {
    pub point: Vec<Vec<f64>>,
    pub lower: Vec<Vec<f64>>,
    pub upper: Vec<Vec<f64>>,
    /// Coverage of the interval, e.g. 0.95
    pub level: f64,
}

impl VarForecast {
    pub fn steps(&self) -> usize {
        self.point.len()
    }

    /// Point forecasts of series `j`.
    pub fn series(&self, j: usize) -> Vec<f64> {
        self.point.iter().map(|row| row[j]).collect()
    }

    /// Lower and upper bounds of series `j`.
    pub fn bounds(&self, j: usize) -> (Vec<f64>, Vec<f64>) {
        (
            self.lower.iter().map(|row| row[j]).collect(),
            self.upper.iter().map(|row| row[j]).collect(),
        )
    }
}

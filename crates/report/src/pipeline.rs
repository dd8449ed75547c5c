//! Select, fit and forecast a dataset in one pass

use chrono::NaiveDate;
use data_facade::{month_starts, Frame};
use serde::{Deserialize, Serialize};
use tracing::info;
use var_facade::{select_order, InformationCriterion, LagOrderSelection, VarConfig, VarModel};

use crate::error::Result;

/// One forecast period of the target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Everything needed to present a forecast: the chosen model, the observed
/// target and its forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Dataset label or uploaded file name
    pub dataset_label: String,
    pub columns: Vec<String>,
    /// Forecast column, always the last data column
    pub target: String,
    pub nobs: usize,
    pub lag_order: usize,
    pub criterion: InformationCriterion,
    pub selection: LagOrderSelection,
    pub history: Vec<(NaiveDate, f64)>,
    pub forecast: Vec<ForecastPoint>,
    pub interval_level: f64,
    /// Whether the fitted process is stationary
    pub stable: bool,
}

impl ForecastReport {
    pub fn steps(&self) -> usize {
        self.forecast.len()
    }

    /// Forecast values without dates or bounds.
    pub fn values(&self) -> Vec<f64> {
        self.forecast.iter().map(|p| p.value).collect()
    }
}

/// Forecast the last column of `frame` `config.steps` months ahead.
///
/// The lag order is chosen by `config.criterion` over `0..=config.max_lags`,
/// the VAR is fitted on all rows and the forecast starts from the last `p`
/// observations. Forecast dates are the first days of the months following
/// the last observation.
pub fn run_forecast(frame: &Frame, config: &VarConfig, label: &str) -> Result<ForecastReport> {
    config.validate()?;

    let selection = select_order(frame.values(), config.max_lags)?;
    let lag_order = selection.selected(config.criterion);
    let model = VarModel::fit(frame.values(), lag_order)?;
    let fc = model.forecast_interval(frame.tail(lag_order), config.steps, config.interval_level)?;

    let target = frame.neqs() - 1;
    let dates = month_starts(frame.last_date(), config.steps);
    let forecast = dates
        .into_iter()
        .enumerate()
        .map(|(h, date)| ForecastPoint {
            date,
            value: fc.point[h][target],
            lower: fc.lower[h][target],
            upper: fc.upper[h][target],
        })
        .collect();

    let history = frame
        .dates()
        .iter()
        .copied()
        .zip(frame.target_values())
        .collect();

    let stable = model.is_stable();
    info!(
        dataset = label,
        criterion = %config.criterion,
        lag_order,
        steps = config.steps,
        stable,
        "forecast complete"
    );

    Ok(ForecastReport {
        dataset_label: label.to_string(),
        columns: frame.columns().to_vec(),
        target: frame.target_column().to_string(),
        nobs: frame.nobs(),
        lag_order,
        criterion: config.criterion,
        selection,
        history,
        forecast,
        interval_level: config.interval_level,
        stable,
    })
}

//! API route handlers

use std::fs;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use data_facade::{load_csv_reader, load_csv_str, ColumnAliases, DatasetSource, Frame};
use report::{render_svg, run_forecast, to_csv, ChartOptions, ForecastReport};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use var_facade::{InformationCriterion, VarConfig};

use crate::error::{AppError, PageError};
use crate::pages;
use crate::state::AppState;

/// Where the observations come from.
#[derive(Debug)]
enum Input {
    Builtin(String),
    Upload { name: String, bytes: Vec<u8> },
}

fn load_input(
    source: &dyn DatasetSource,
    aliases: &ColumnAliases,
    input: Input,
) -> Result<(Frame, String), AppError> {
    match input {
        Input::Builtin(key) => {
            let label = source
                .entries()
                .iter()
                .find(|e| e.key == key)
                .map(|e| e.label.clone())
                .unwrap_or_else(|| key.clone());
            Ok((source.load(&key)?, label))
        }
        Input::Upload { name, bytes } => Ok((load_csv_reader(bytes.as_slice(), aliases)?, name)),
    }
}

/// Run CPU-bound work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("forecast task failed: {}", e)))?
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let entries: Vec<_> = state
        .source
        .entries()
        .iter()
        .map(|e| (e.clone(), state.source.is_available(&e.key)))
        .collect();
    Html(pages::form_page(&entries, &state.config.forecast))
}

/// Multipart form fields: `source` (`builtin` or `upload`), `dataset`, `file`.
async fn read_form(mut multipart: Multipart) -> Result<Input, AppError> {
    let mut source = String::from("builtin");
    let mut dataset = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "source" => {
                source = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
            }
            "dataset" => {
                dataset = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::bad_request(e.to_string()))?,
                );
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(e.to_string()))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    match source.trim() {
        "upload" => match upload {
            Some((name, bytes)) if !bytes.is_empty() => Ok(Input::Upload { name, bytes }),
            _ => Err(AppError::bad_request("Please choose a CSV file to upload")),
        },
        "builtin" => dataset
            .filter(|d| !d.trim().is_empty())
            .map(|d| Input::Builtin(d.trim().to_string()))
            .ok_or_else(|| AppError::bad_request("Please choose a built-in dataset")),
        other => Err(AppError::bad_request(format!("Unknown data source '{}'", other))),
    }
}

/// Form submission: forecast and render the result page.
pub async fn forecast_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let input = read_form(multipart).await?;
    let source = Arc::clone(&state.source);
    let aliases = Arc::clone(&state.aliases);
    let config = state.config.forecast.clone();

    let (frame, report, svg) = blocking(move || {
        let (frame, label) = load_input(source.as_ref(), &aliases, input)?;
        let report = Arc::new(run_forecast(&frame, &config, &label)?);
        let svg = render_svg(&report, &ChartOptions::default())?;
        Ok((frame, report, svg))
    })
    .await
    .map_err(|e| {
        warn!(status = %e.status, error = %e.message, "forecast failed");
        e
    })?;

    let id = state.results.write().await.insert(Arc::clone(&report));
    info!(id, dataset = %report.dataset_label, "forecast stored");

    let download = format!("/forecast/{}/forecast.csv", id);
    Ok(Html(pages::result_page(&frame, &report, &svg, &download)))
}

/// CSV download of a stored forecast.
pub async fn download_csv(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let report = state
        .results
        .read()
        .await
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("No forecast with id {}", id)))?;
    let csv = to_csv(&report, false)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"forecast.csv\""),
        ],
        csv,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub key: String,
    pub label: String,
    pub file: String,
    pub available: bool,
}

pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetInfo>> {
    let datasets = state
        .source
        .entries()
        .iter()
        .map(|e| DatasetInfo {
            key: e.key.clone(),
            label: e.label.clone(),
            file: e.file_name(),
            available: state.source.is_available(&e.key),
        })
        .collect();
    Json(datasets)
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Built-in dataset key
    pub dataset: Option<String>,
    /// Inline CSV text, used when `dataset` is absent
    pub csv: Option<String>,
    pub steps: Option<usize>,
    pub max_lags: Option<usize>,
    pub criterion: Option<InformationCriterion>,
}

impl ForecastRequest {
    fn config(&self, defaults: &VarConfig) -> VarConfig {
        VarConfig {
            steps: self.steps.unwrap_or(defaults.steps),
            max_lags: self.max_lags.unwrap_or(defaults.max_lags),
            criterion: self.criterion.unwrap_or(defaults.criterion),
            interval_level: defaults.interval_level,
        }
    }
}

pub async fn forecast_api(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastReport>, AppError> {
    let config = req.config(&state.config.forecast);
    config.validate()?;
    let source = Arc::clone(&state.source);
    let aliases = Arc::clone(&state.aliases);

    let report = blocking(move || {
        let (frame, label) = match (req.dataset, req.csv) {
            (Some(key), _) => load_input(source.as_ref(), &aliases, Input::Builtin(key))?,
            (None, Some(csv)) => (load_csv_str(&csv, &aliases)?, "upload".to_string()),
            (None, None) => {
                return Err(AppError::bad_request("Either 'dataset' or 'csv' is required"))
            }
        };
        Ok(run_forecast(&frame, &config, &label)?)
    })
    .await?;

    Ok(Json(report))
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - can the data directory be read?
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let data_dir = &state.config.data_dir;
    let readable = fs::read_dir(data_dir).is_ok();
    let available = state
        .source
        .entries()
        .iter()
        .filter(|e| state.source.is_available(&e.key))
        .count();

    let status = if readable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "status": if readable { "ready" } else { "unavailable" },
            "version": env!("CARGO_PKG_VERSION"),
            "checks": [
                {
                    "name": "data_dir",
                    "status": if readable { "Healthy" } else { "Unhealthy" },
                    "message": data_dir.display().to_string()
                },
                {
                    "name": "datasets",
                    "status": "Healthy",
                    "message": format!("{} of {} available", available, state.source.entries().len())
                }
            ]
        })),
    )
}

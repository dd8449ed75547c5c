//! Server and HTTP error types

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use data_facade::DataError;
use report::ReportError;
use serde::Serialize;
use thiserror::Error;
use var_facade::VarError;

use crate::pages;

/// Errors while configuring or starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidVar { name: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request failure with the status it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let status = match err {
            DataError::FileNotFound(_) | DataError::UnknownDataset(_) => StatusCode::NOT_FOUND,
            DataError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self::new(status, err.to_string())
    }
}

impl From<VarError> for AppError {
    fn from(err: VarError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Data(e) => e.into(),
            ReportError::Var(e) => e.into(),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// [`AppError`] rendered as an HTML page for the form routes.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<DataError> for PageError {
    fn from(err: DataError) -> Self {
        PageError(err.into())
    }
}

impl From<ReportError> for PageError {
    fn from(err: ReportError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let AppError { status, message } = self.0;
        (status, Html(pages::error_page(status, &message))).into_response()
    }
}

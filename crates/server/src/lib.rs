//! # cci-server
//!
//! Web front end and REST API for CCI forecasts.
//!
//! The HTML form at `/` posts a built-in dataset choice or an uploaded CSV to
//! `/forecast`, which renders the input table, the selected lag order, the
//! forecast table and chart, and links a CSV download. The same pipeline is
//! available as JSON under `/api/v1`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{AppError, ServerError};
pub use state::AppState;

/// Build the router with middleware.
pub fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/forecast", post(routes::forecast_page))
        .route("/forecast/:id/forecast.csv", get(routes::download_csv))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        // API endpoints
        .route("/api/v1/datasets", get(routes::list_datasets))
        .route("/api/v1/forecast", post(routes::forecast_api))
        // Middleware layers
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `config.addr()` and serve until the process stops.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr()?;
    let data_dir = config.data_dir.clone();
    let router = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "cci-server v{} listening on {} (data dir {})",
        env!("CARGO_PKG_VERSION"),
        addr,
        data_dir.display()
    );
    axum::serve(listener, router).await?;
    Ok(())
}

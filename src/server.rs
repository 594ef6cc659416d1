//! HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::error::WorkflowError;
use crate::insights::{self, DashboardInsights};
use crate::models::{CatalogEntry, WorkflowResult, COUNTRIES, PERIODS};
use crate::orchestrator::Orchestrator;

pub const PLATFORM_NAME: &str = "STARLA Intelligence Platform";

pub struct ServerState {
    pub orchestrator: Orchestrator,
    pub default_country: String,
    pub default_period: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub platform: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: &'static [CatalogEntry],
}

#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub periods: &'static [CatalogEntry],
}

pub type ApiError = (StatusCode, Json<Value>);
pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        platform: PLATFORM_NAME,
    })
}

pub async fn handle_ask(
    State(state): State<Arc<ServerState>>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<WorkflowResult> {
    let started_at = Instant::now();
    // A missing or unreadable body carries no question
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected ask body: {}", rejection);
        api_error(
            StatusCode::BAD_REQUEST,
            WorkflowError::MissingQuestion.to_string(),
        )
    })?;
    let question = request.question.unwrap_or_default();
    let country = request
        .country
        .unwrap_or_else(|| state.default_country.clone());
    let period = request
        .period
        .unwrap_or_else(|| state.default_period.clone());

    let result = state
        .orchestrator
        .run(&question, &country, &period)
        .await
        .map_err(|err| match err {
            WorkflowError::MissingQuestion => api_error(StatusCode::BAD_REQUEST, err.to_string()),
        })?;

    info!(
        country = %result.country,
        period = %result.period,
        failed = result.failed_count(),
        latency_ms = started_at.elapsed().as_millis() as u64,
        "ask completed"
    );

    Ok(Json(result))
}

pub async fn handle_countries() -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: COUNTRIES,
    })
}

pub async fn handle_periods() -> Json<PeriodsResponse> {
    Json(PeriodsResponse { periods: PERIODS })
}

pub async fn handle_insights(
    State(state): State<Arc<ServerState>>,
    Path((country, period)): Path<(String, String)>,
) -> Json<DashboardInsights> {
    let metrics = state.orchestrator.facts().lookup(&country, &period);
    Json(insights::generate(&country, metrics))
}

pub async fn handle_extract_pdf() -> Json<Value> {
    Json(json!({
        "message": "PDF extraction endpoint ready",
        "note": "Requires a vision-capable model for chart interpretation"
    }))
}

pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/ask", post(handle_ask))
        .route("/api/data/countries", get(handle_countries))
        .route("/api/data/periods", get(handle_periods))
        .route("/api/insights/{country}/{period}", get(handle_insights))
        .route("/api/extract-pdf", post(handle_extract_pdf))
        .with_state(state)
}

pub async fn run_server(state: ServerState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid server bind address '{}:{}'", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server listener")?;

    println!("☕ {} running on http://{}", PLATFORM_NAME, addr);
    println!("   Agents ready: Data Analyst, Competitive Intelligence, Market Analyst");
    println!("   Validators:   Senior Data Scientist, McKinsey Expert Partner");
    info!("Listening on {}", addr);

    axum::serve(listener, build_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server runtime failed")
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

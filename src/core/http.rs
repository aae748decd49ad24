//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::{self, EngineConfig};
use crate::core::pipeline::{Evaluation, SignalService};
use crate::db::{InMemorySignalStore, QuestDatabase, SignalFilter, SignalStore};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::SignalLogRecord;
use crate::risk::CircuitBreakerState;
use crate::services::YahooChartProvider;

pub const SERVICE_NAME: &str = "strikewise-signal-engine";
pub const GENERIC_FAILURE_DETAIL: &str = "Prediction failed. Please try again later.";
pub const USER_ID_HEADER: &str = "x-user-id";
pub const DEFAULT_SIGNAL_LIMIT: usize = 10;
pub const MAX_SIGNAL_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<SignalService>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error body `{detail}`; non-validation failures never leak their cause
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_validation() {
            warn!(error = %self.0, "Rejected request");
            return (StatusCode::BAD_REQUEST, Json(json!({ "detail": self.0.to_string() }))).into_response();
        }
        error!(error = %self.0, error_debug = ?self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": GENERIC_FAILURE_DETAIL })),
        )
            .into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct PredictQuery {
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

fn default_period() -> String {
    "1mo".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

#[derive(Debug, Deserialize)]
struct SignalsQuery {
    symbol: Option<String>,
    user_id: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct PnlRequest {
    pnl: f64,
    equity: f64,
}

/// Evaluate a symbol
async fn predict(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<PredictQuery>,
    headers: HeaderMap,
) -> Result<Json<Evaluation>, ApiError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let evaluation = state
        .service
        .evaluate(&symbol, &params.period, &params.interval, user_id)
        .await?;
    Ok(Json(evaluation))
}

/// Recent signal log records, newest first
async fn list_signals(
    State(state): State<AppState>,
    Query(params): Query<SignalsQuery>,
) -> Result<Json<Vec<SignalLogRecord>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SIGNAL_LIMIT)
        .clamp(1, MAX_SIGNAL_LIMIT);
    let filter = SignalFilter {
        symbol: params.symbol.map(|s| s.trim().to_uppercase()),
        user_id: params.user_id,
    };

    let records = state.service.recent_signals(&filter, limit).await?;
    Ok(Json(records))
}

async fn circuit_breaker_state(State(state): State<AppState>) -> Json<Value> {
    let breaker = state.service.breaker();
    Json(json!({
        "state": breaker.snapshot().await,
        "config": breaker.config().await,
    }))
}

async fn record_pnl(
    State(state): State<AppState>,
    Json(request): Json<PnlRequest>,
) -> Result<Json<CircuitBreakerState>, ApiError> {
    if !request.pnl.is_finite() {
        return Err(EngineError::InvalidParameter {
            name: "pnl",
            value: request.pnl.to_string(),
        }
        .into());
    }
    if !request.equity.is_finite() {
        return Err(EngineError::InvalidParameter {
            name: "equity",
            value: request.equity.to_string(),
        }
        .into());
    }

    Ok(Json(state.service.record_pnl(request.pnl, request.equity).await))
}

async fn reset_circuit_breaker(State(state): State<AppState>) -> Json<CircuitBreakerState> {
    Json(state.service.reset_breaker().await)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/predict/{symbol}", get(predict))
        .route("/api/signals", get(list_signals))
        .route("/api/circuit-breaker", get(circuit_breaker_state))
        .route("/api/circuit-breaker/pnl", post(record_pnl))
        .route("/api/circuit-breaker/reset", post(reset_circuit_breaker))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Signal store for the server: QuestDB when reachable, in-memory otherwise
async fn connect_store() -> Arc<dyn SignalStore> {
    match QuestDatabase::connect(&config::get_questdb_url()).await {
        Ok(db) => {
            info!("QuestDB connected for signal logs");
            Arc::new(db)
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to QuestDB - signal logs kept in memory");
            Arc::new(InMemorySignalStore::new())
        }
    }
}

pub async fn start_server(port: u16, engine: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    let provider = Arc::new(YahooChartProvider::new(config::get_market_data_base_url())?);
    let store = connect_store().await;
    let service = Arc::new(SignalService::new(engine, provider, store, metrics.clone())?);

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        service,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
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
use tracing::{error, info, Level};

use crate::backtest::{BacktestConfig, BacktestReport, Backtester};
use crate::models::signal::SignalOutcome;
use crate::services::binance::MAX_KLINES_LIMIT;
use crate::services::market_data::MarketDataProvider;
use crate::signals::{SignalConfig, SignalEngine};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub start_time: Arc<Instant>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub signal_config: SignalConfig,
    pub timeframe: String,
    pub candle_limit: usize,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        signal_config: SignalConfig,
        timeframe: impl Into<String>,
        candle_limit: usize,
    ) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            start_time: Arc::new(Instant::now()),
            provider,
            signal_config,
            timeframe: timeframe.into(),
            candle_limit,
        }
    }
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

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "rsi-signal-engine"
    })))
}

#[derive(Debug, Deserialize)]
struct SignalQuery {
    symbol: Option<String>,
    timeframe: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct BacktestQuery {
    symbol: Option<String>,
    timeframe: Option<String>,
    limit: Option<usize>,
    initial_balance: Option<f64>,
    risk_per_trade: Option<f64>,
    warmup: Option<usize>,
}

fn required_symbol(symbol: Option<String>) -> Result<String, (StatusCode, Json<Value>)> {
    symbol
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "query parameter 'symbol' is required" })),
            )
        })
}

/// Current signal outcome for one symbol
async fn get_signal(
    State(state): State<AppState>,
    Query(params): Query<SignalQuery>,
) -> Result<Json<SignalOutcome>, (StatusCode, Json<Value>)> {
    let symbol = required_symbol(params.symbol)?;
    let timeframe = params.timeframe.unwrap_or_else(|| state.timeframe.clone());
    let limit = params.limit.unwrap_or(state.candle_limit);

    let candles = state
        .provider
        .get_candles(&symbol, &timeframe, limit)
        .await
        .map_err(|e| {
            error!(symbol = %symbol, error = %e, "Failed to fetch candles");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("market data unavailable: {}", e) })),
            )
        })?;

    let outcome = SignalEngine::decide(&symbol, &candles, &state.signal_config).map_err(|e| {
        error!(error = %e, "Invalid signal configuration");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    Ok(Json(outcome))
}

/// Back-test the signal rule over recent history
async fn run_backtest(
    State(state): State<AppState>,
    Query(params): Query<BacktestQuery>,
) -> Result<Json<BacktestReport>, (StatusCode, Json<Value>)> {
    let symbol = required_symbol(params.symbol)?;
    let timeframe = params.timeframe.unwrap_or_else(|| state.timeframe.clone());
    let limit = params.limit.unwrap_or(MAX_KLINES_LIMIT);

    let defaults = BacktestConfig::default();
    let config = BacktestConfig {
        initial_balance: params.initial_balance.unwrap_or(defaults.initial_balance),
        risk_per_trade: params.risk_per_trade.unwrap_or(defaults.risk_per_trade),
        warmup: params.warmup.unwrap_or(defaults.warmup),
        signal: state.signal_config.clone(),
    };

    let candles = state
        .provider
        .get_candles(&symbol, &timeframe, limit)
        .await
        .map_err(|e| {
            error!(symbol = %symbol, error = %e, "Failed to fetch candles for backtest");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("market data unavailable: {}", e) })),
            )
        })?;

    let report = Backtester::new(config)
        .run(&symbol, &candles)
        .map_err(|e| {
            error!(error = %e, "Invalid signal configuration");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?;

    Ok(Json(report))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/signal", get(get_signal))
        .route("/api/backtest", get(run_backtest))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}

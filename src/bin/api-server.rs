//! Signal API Server
//!
//! HTTP API exposing health, on-demand signal analysis and back-tests.

use dotenvy::dotenv;
use rsi_signals::config::AppConfig;
use rsi_signals::core::http::{start_server, AppState};
use rsi_signals::logging;
use rsi_signals::services::{BinanceMarketDataProvider, MarketDataProvider};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::try_init_logging(&config.environment)?;

    info!("Starting Signal API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let provider: Arc<dyn MarketDataProvider> = Arc::new(
        BinanceMarketDataProvider::with_base_url(config.exchange_base_url.clone())?,
    );
    let state = AppState::new(
        provider,
        config.signal.clone(),
        config.timeframe.clone(),
        config.candle_limit,
    );

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}

//! Strikewise API Server
//!
//! HTTP API for signal evaluation, signal history and circuit breaker control.

use dotenvy::dotenv;
use strikewise::config::{self, EngineConfig};
use strikewise::core::http::start_server;
use strikewise::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = config::get_port();
    let engine = EngineConfig::from_env();

    let env = config::get_environment();
    info!("Starting Strikewise API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        fetch_timeout_secs = engine.fetch_timeout.as_secs(),
        account_balance = engine.risk.account_balance,
        max_daily_loss_pct = engine.breaker.max_daily_loss_pct,
        max_drawdown_pct = engine.breaker.max_drawdown_pct,
        consecutive_loss_limit = engine.breaker.consecutive_loss_limit,
        "Engine configuration"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, engine).await {
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

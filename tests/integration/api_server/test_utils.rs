//! Test utilities for API server integration tests

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use strikewise::config::EngineConfig;
use strikewise::core::http::{create_router, AppState, HealthStatus};
use strikewise::core::pipeline::SignalService;
use strikewise::db::InMemorySignalStore;
use strikewise::metrics::Metrics;
use strikewise::models::{PriceBar, RawBar};
use strikewise::services::yahoo::{validate_interval, validate_period};
use strikewise::services::{MarketDataProvider, ProviderError};
use tokio::sync::RwLock;

/// Canned market data source
#[allow(dead_code)]
pub enum StubProvider {
    Bars(Vec<RawBar>),
    NotFound,
    Slow(Duration),
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<RawBar>, ProviderError> {
        validate_period(period)?;
        validate_interval(interval)?;
        match self {
            StubProvider::Bars(bars) => Ok(bars.clone()),
            StubProvider::NotFound => Err(ProviderError::SymbolNotFound(symbol.to_string())),
            StubProvider::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Steady decline followed by a sharp drop; scores moderate bullish
pub fn oversold_bars() -> Vec<RawBar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap();
    let mut closes: Vec<f64> = (0..199).map(|i| 150.0 - 0.2 * i as f64).collect();
    closes.push(105.0);
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let ts = start + chrono::Duration::hours(i as i64);
            RawBar::from(PriceBar::new(c, c + 0.5, c - 0.5, c, 1000.0, ts))
        })
        .collect()
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub store: Arc<InMemorySignalStore>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        Self::with_provider(StubProvider::Bars(oversold_bars())).await
    }

    pub async fn with_provider(provider: StubProvider) -> Self {
        let config = EngineConfig {
            fetch_timeout: Duration::from_millis(200),
            ..EngineConfig::default()
        };
        Self::with_config(provider, config).await
    }

    pub async fn with_config(provider: StubProvider, config: EngineConfig) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let store = Arc::new(InMemorySignalStore::new());
        let service = SignalService::new(config, Arc::new(provider), store.clone(), metrics.clone())
            .expect("valid risk parameters");

        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            service: Arc::new(service),
        };

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            store,
        }
    }
}

//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, signal evaluation and
//! circuit breaker control.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use serde_json::{json, Value};

use test_utils::{StubProvider, TestApiServer};

const GENERIC_DETAIL: &str = "Prediction failed. Please try again later.";

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "strikewise-signal-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "signal_evaluation_failures_total",
        "circuit_breaker_trips_total",
    ] {
        assert!(body.contains(name), "Expected {name} metric");
    }
}

#[tokio::test]
async fn predict_returns_full_evaluation() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/predict/reliance").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "RELIANCE");
    assert_eq!(body["prediction"], "BULLISH");
    assert_eq!(body["strategy_label"]["label"], "moderate bullish");
    assert_eq!(body["strategy_label"]["suggestion"], "Buy ATM Call (CE)");
    assert_eq!(body["current_price"], 105.0);
    assert_eq!(body["option_type"], "CE");
    assert_eq!(body["strike"], 100.0);
    assert_eq!(body["payoff_graph"].as_array().unwrap().len(), 20);
    assert_eq!(body["risk_gated"], false);
    assert!(body["breaker_reason"].is_null());
    assert!(body["risk"]["quantity"].as_u64().unwrap() > 0);
    assert!(body["reasoning"]
        .as_str()
        .unwrap()
        .contains("Mean Reversion: Price below lower BB with oversold RSI."));
}

#[tokio::test]
async fn predict_counts_evaluations_by_direction() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/predict/RELIANCE").await;

    let body = app.metrics.export().unwrap();
    assert!(body.contains(r#"signal_evaluations_total{direction="BULLISH"} 1"#));
}

#[tokio::test]
async fn predict_rejects_malformed_symbol() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/predict/BAD%20SYMBOL").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Invalid stock symbol format"));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn predict_rejects_unknown_period() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/predict/RELIANCE")
        .add_query_param("period", "2w")
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("period"));
}

#[tokio::test]
async fn predict_hides_provider_failures() {
    let app = TestApiServer::with_provider(StubProvider::NotFound).await;
    let response = app.server.get("/api/predict/NOSUCH").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body, json!({ "detail": GENERIC_DETAIL }));
    assert!(app.store.is_empty().await);
    assert_eq!(app.metrics.signal_evaluation_failures_total.get(), 1);
}

#[tokio::test]
async fn predict_times_out_slow_provider() {
    let app = TestApiServer::with_provider(StubProvider::Slow(Duration::from_secs(5))).await;
    let response = app.server.get("/api/predict/RELIANCE").await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body["detail"], GENERIC_DETAIL);
}

#[tokio::test]
async fn predict_logs_signal_with_user() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/predict/TCS")
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("trader-1"),
        )
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(app.store.len().await, 1);

    let response = app
        .server
        .get("/api/signals")
        .add_query_param("user_id", "trader-1")
        .await;
    assert_eq!(response.status_code(), 200);

    let records: Value = response.json();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["symbol"], "TCS");
    assert_eq!(records[0]["predicted_direction"], "BULLISH");
    assert_eq!(records[0]["user_id"], "trader-1");
    assert_eq!(
        records[0]["suggested_strategy"],
        "moderate bullish - Buy ATM Call (CE)"
    );

    let response = app
        .server
        .get("/api/signals")
        .add_query_param("user_id", "someone-else")
        .await;
    let records: Value = response.json();
    assert!(records.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn signals_are_newest_first_and_limited() {
    let app = TestApiServer::new().await;
    for symbol in ["INFY", "TCS", "WIPRO"] {
        let response = app.server.get(&format!("/api/predict/{symbol}")).await;
        assert_eq!(response.status_code(), 200);
    }

    let response = app
        .server
        .get("/api/signals")
        .add_query_param("limit", "2")
        .await;
    let records: Value = response.json();
    let symbols: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["WIPRO", "TCS"]);

    let response = app
        .server
        .get("/api/signals")
        .add_query_param("symbol", "infy")
        .await;
    let records: Value = response.json();
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn circuit_breaker_gates_sizing_until_reset() {
    let app = TestApiServer::new().await;

    for (pnl, equity) in [(0.0, 10_000.0), (-200.0, 9_800.0), (-150.0, 9_650.0)] {
        let response = app
            .server
            .post("/api/circuit-breaker/pnl")
            .json(&json!({ "pnl": pnl, "equity": equity }))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    let response = app.server.get("/api/circuit-breaker").await;
    let body: Value = response.json();
    assert_eq!(body["state"]["is_triggered"], true);
    assert_eq!(body["state"]["trigger_reason"], "Daily Loss Limit Hit (-3.50%)");
    assert_eq!(body["config"]["consecutive_loss_limit"], 10);
    assert_eq!(app.metrics.circuit_breaker_trips_total.get(), 1);

    let body: Value = app.server.get("/api/predict/RELIANCE").await.json();
    assert_eq!(body["prediction"], "BULLISH");
    assert_eq!(body["risk_gated"], true);
    assert_eq!(body["breaker_reason"], "Daily Loss Limit Hit (-3.50%)");
    assert_eq!(body["risk"]["quantity"], 0);
    assert_eq!(body["risk"]["capital_fraction"], 0.0);

    let response = app.server.post("/api/circuit-breaker/reset").await;
    assert_eq!(response.status_code(), 200);
    let state: Value = response.json();
    assert_eq!(state["is_triggered"], false);
    assert_eq!(state["peak_equity"], 10_000.0);

    let body: Value = app.server.get("/api/predict/RELIANCE").await.json();
    assert_eq!(body["risk_gated"], false);
    assert!(body["risk"]["quantity"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn api_server_handles_sequential_requests() {
    let app = TestApiServer::new().await;

    for _ in 0..10 {
        let response = app.server.get("/health").await;
        assert_eq!(response.status_code(), 200);
    }
}

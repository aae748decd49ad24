//! Prometheus metrics for the API server and the signal pipeline

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::Direction;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub signal_evaluations_total: IntCounterVec,
    pub signal_evaluation_failures_total: IntCounter,
    pub circuit_breaker_trips_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let signal_evaluations_total = IntCounterVec::new(
            Opts::new("signal_evaluations_total", "Completed signal evaluations"),
            &["direction"],
        )?;
        let signal_evaluation_failures_total = IntCounter::new(
            "signal_evaluation_failures_total",
            "Signal evaluations that ended in an error",
        )?;
        let circuit_breaker_trips_total =
            IntCounter::new("circuit_breaker_trips_total", "Circuit breaker trips")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(signal_evaluations_total.clone()))?;
        registry.register(Box::new(signal_evaluation_failures_total.clone()))?;
        registry.register(Box::new(circuit_breaker_trips_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            signal_evaluations_total,
            signal_evaluation_failures_total,
            circuit_breaker_trips_total,
        })
    }

    pub fn record_evaluation(&self, direction: Direction) {
        self.signal_evaluations_total
            .with_label_values(&[direction.as_str()])
            .inc();
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `log_level`. With `json` set, every
/// line is a JSON object carrying the current span.
pub fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let layer = if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer().with_target(false).with_filter(env_filter).boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(log_level = log_level, json = json, "Logging initialized");
    Ok(())
}

/// Install the Prometheus recorder and describe the gateway metrics.
///
/// The returned handle renders the exposition text for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    describe_counter!(
        "radar_remote_sessions_total",
        "Remote sessions successfully opened"
    );
    describe_counter!(
        "radar_remote_faults_total",
        "Remote faults by kind (connect, auth, directory, listing, retrieve, read)"
    );
    describe_counter!(
        "radar_resolutions_total",
        "Resolution requests by intent and outcome"
    );
    describe_histogram!("radar_payload_bytes", "Size of retrieved radar files");

    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

#[inline]
pub fn record_session_opened() {
    counter!("radar_remote_sessions_total").increment(1);
}

#[inline]
pub fn record_remote_fault(kind: &'static str) {
    counter!("radar_remote_faults_total", "kind" => kind).increment(1);
}

#[inline]
pub fn record_resolution(intent: &'static str, outcome: &'static str) {
    counter!("radar_resolutions_total", "intent" => intent, "outcome" => outcome).increment(1);
}

#[inline]
pub fn record_payload_size(bytes: usize) {
    histogram!("radar_payload_bytes").record(bytes as f64);
}

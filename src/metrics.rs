use anyhow::{Context, Result};
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::info;

/// Install the Prometheus recorder and return a handle for rendering scrapes
pub fn init_metrics() -> Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Initialize router metrics to zero/default values
/// This ensures metrics always appear in Prometheus queries even if no events have occurred
pub fn initialize_router_metrics() {
    metrics::counter!("router.packets_received_total").absolute(0);
    metrics::gauge!("router.from_modem.depth").set(0.0);

    metrics::counter!("router.aprs_is.gated_total").absolute(0);
    metrics::counter!("router.aprs_is.suppressed_total", "reason" => "own_packet").absolute(0);
    metrics::counter!("router.aprs_is.suppressed_total", "reason" => "malformed").absolute(0);
    metrics::counter!("router.aprs_is.suppressed_total", "reason" => "rf_only").absolute(0);

    metrics::counter!("router.digi.repeated_total").absolute(0);
    for reason in ["disabled", "own_packet", "not_eligible"] {
        metrics::counter!("router.digi.dropped_total", "reason" => reason).absolute(0);
    }

    metrics::counter!("router.beacon.sent_total").absolute(0);
}

/// Background task updating uptime every 5 seconds
pub async fn process_metrics_task() {
    let start_time = Instant::now();

    loop {
        metrics::gauge!("process.uptime.seconds").set(start_time.elapsed().as_secs() as f64);
        metrics::gauge!("process.is_up").set(1.0);
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

/// Serve `/metrics` on the given port until the process exits
pub async fn start_metrics_server(port: u16) -> Result<()> {
    let handle = init_metrics()?;
    initialize_router_metrics();

    tokio::spawn(process_metrics_task());

    let app = Router::new().route("/metrics", get(move || async move { handle.render() }));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting metrics server on http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics server to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Metrics server failed")
}

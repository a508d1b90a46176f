//! Prometheus recorder for the chart service.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder and registers the chart metrics.
///
/// Only the first call in a process can succeed; later calls return an error
/// and leave the installed recorder untouched.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("Metrics handle already initialized"))
    })?;

    describe_counter!("charts_rendered_total", "Charts rendered successfully");
    describe_counter!(
        "chart_requests_rejected_total",
        "Chart requests that ended in an error, by reason"
    );
    describe_histogram!(
        "chart_render_duration_seconds",
        Unit::Seconds,
        "Time spent drawing and encoding one chart"
    );

    Ok(())
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// Liveness plus the figure every chart is drawn with.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let chart = &state.config.chart;

    Json(json!({
        "status": "ok",
        "service": "chart-service",
        "version": env!("CARGO_PKG_VERSION"),
        "chart": {
            "width": chart.width,
            "height": chart.height,
            "max_values": state.config.limits.max_values,
        }
    }))
}

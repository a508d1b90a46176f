use crate::error::ChartError;
use crate::models::ChartRequest;
use crate::startup::AppState;
use askama::Template;
use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State};
use base64::{engine::general_purpose, Engine as _};
use metrics::{counter, histogram};
use std::time::Instant;

pub const PAGE_TITLE: &str = "Gráfico";

/// HTML page embedding the chart as a `data:` URI.
///
/// The base64 payload is produced by this service and rendered unescaped;
/// every other field goes through HTML escaping.
#[derive(Template)]
#[template(path = "chart.html")]
pub struct ChartPage {
    pub page_title: &'static str,
    pub heading: String,
    pub image_base64: String,
    pub width: u32,
    pub height: u32,
}

pub async fn render_chart(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ChartPage, ChartError> {
    let result = build_page(&state, body).await;

    if let Err(e) = &result {
        counter!("chart_requests_rejected_total", "reason" => e.reason()).increment(1);
        tracing::info!(reason = e.reason(), status = %e.status(), "Chart request rejected");
    }

    result
}

async fn build_page(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<ChartPage, ChartError> {
    let body = body.map_err(|rejection| ChartError::Body {
        status: rejection.status(),
    })?;

    let request = ChartRequest::from_slice(&body, state.config.limits.max_values)?;
    let points = request.values.len();

    let start = Instant::now();
    let png = state.renderer.render_line_chart(request.values).await?;
    histogram!("chart_render_duration_seconds").record(start.elapsed().as_secs_f64());
    counter!("charts_rendered_total").increment(1);

    tracing::info!(
        points = points,
        png_bytes = png.len(),
        "Chart rendered"
    );

    let settings = &state.config.chart;
    Ok(ChartPage {
        page_title: PAGE_TITLE,
        heading: settings.title.clone(),
        image_base64: general_purpose::STANDARD.encode(&png),
        width: settings.width,
        height: settings.height,
    })
}

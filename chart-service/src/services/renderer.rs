//! Line chart rasterisation.
//!
//! Every call owns its pixel buffer and drawing area for the duration of the
//! render, so concurrent requests never share figure state.

use crate::config::ChartSettings;
use crate::error::ChartError;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Plots `values` against their index and returns the chart as PNG bytes.
    async fn render_line_chart(&self, values: Vec<f64>) -> Result<Vec<u8>, ChartError>;
}

/// Renders with plotters on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    settings: ChartSettings,
}

impl PlottersRenderer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ChartRenderer for PlottersRenderer {
    async fn render_line_chart(&self, values: Vec<f64>) -> Result<Vec<u8>, ChartError> {
        let settings = self.settings.clone();

        let handle = tokio::task::spawn_blocking(move || render_png(&settings, &values));

        let drawing_result = handle
            .await
            .context("blocking render task join failed (panic/cancelled)")
            .map_err(ChartError::Render)?;

        drawing_result.map_err(ChartError::Render)
    }
}

/// Draws the chart and encodes it as PNG.
///
/// Text needs a system font. When the labelled pass fails the chart is drawn
/// again without any text rather than failing the request.
pub fn render_png(settings: &ChartSettings, values: &[f64]) -> anyhow::Result<Vec<u8>> {
    render_with(settings, values, draw_pixels)
}

type DrawFn = fn(&ChartSettings, &[f64], bool) -> anyhow::Result<Vec<u8>>;

fn render_with(settings: &ChartSettings, values: &[f64], draw: DrawFn) -> anyhow::Result<Vec<u8>> {
    // plotters never finishes laying out an axis with an infinite span
    let (y_min, y_max) = y_range(values);
    if !(y_max - y_min).is_finite() {
        return Err(anyhow!("y axis span is not finite: {}..{}", y_min, y_max));
    }

    let pixels = match draw(settings, values, true) {
        Ok(pixels) => pixels,
        Err(e) => {
            tracing::warn!(error = %e, "Labelled chart drawing failed, drawing without text");
            draw(settings, values, false).context("plain chart drawing failed")?
        }
    };

    encode_png(settings.width, settings.height, pixels)
}

fn draw_pixels(settings: &ChartSettings, values: &[f64], labelled: bool) -> anyhow::Result<Vec<u8>> {
    let (width, height) = (settings.width, settings.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_max = x_upper_bound(values.len());
        let (y_min, y_max) = y_range(values);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if labelled {
            builder
                .caption(&settings.title, ("sans-serif", 24))
                .x_label_area_size(50)
                .y_label_area_size(70);
        }

        let mut chart = builder.build_cartesian_2d(0f64..x_max, y_min..y_max)?;

        if labelled {
            chart
                .configure_mesh()
                .x_desc(settings.x_label.as_str())
                .y_desc(settings.y_label.as_str())
                .x_labels((x_max as usize + 1).min(11))
                .y_labels(10)
                .light_line_style(&GRID_COLOR)
                .draw()?;
        } else {
            chart.plotting_area().draw(&Rectangle::new(
                [(0f64, y_min), (x_max, y_max)],
                BLACK.stroke_width(1),
            ))?;
        }

        chart.draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            LINE_COLOR.stroke_width(2),
        ))?;

        root.present()?;
    }

    Ok(buffer)
}

fn encode_png(width: u32, height: u32, pixels: Vec<u8>) -> anyhow::Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", width, height))?;

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .context("PNG encoding failed")?;

    Ok(buffer.into_inner())
}

/// Last x coordinate; a one-point or empty series still gets a unit-wide axis.
fn x_upper_bound(len: usize) -> f64 {
    len.saturating_sub(1).max(1) as f64
}

/// Y axis bounds with 10% padding on each side.
///
/// Padding is dropped wherever it would push a bound, or the span, past
/// `f64::MAX`.
fn y_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let padding = if span == 0.0 {
        (min.abs() * 0.1).max(1.0)
    } else {
        span * 0.1
    };

    let mut low = min - padding;
    let mut high = max + padding;
    if !low.is_finite() {
        low = min;
    }
    if !high.is_finite() {
        high = max;
    }
    if !(high - low).is_finite() {
        return (min, max);
    }

    (low, high)
}

#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use chart_service::config::ChartServiceConfig;
use chart_service::startup::Application;

pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub config: ChartServiceConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ChartServiceConfig::default()).await
    }

    pub async fn spawn_with(mut config: ChartServiceConfig) -> Self {
        config.common.port = 0; // Random port for testing

        let app = Application::build(config.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            config,
        }
    }

    pub async fn post_chart(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/grafico", self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Pulls the embedded PNG out of a chart page.
pub fn extract_png(html: &str) -> Vec<u8> {
    let start = html
        .find(DATA_URI_PREFIX)
        .expect("page has no PNG data URI")
        + DATA_URI_PREFIX.len();
    let end = start
        + html[start..]
            .find('"')
            .expect("unterminated data URI");

    general_purpose::STANDARD
        .decode(&html[start..end])
        .expect("data URI is not valid base64")
}

/// Width and height from the PNG IHDR chunk.
pub fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (width, height)
}

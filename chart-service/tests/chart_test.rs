mod common;

use chart_service::config::ChartServiceConfig;
use common::{extract_png, png_dimensions, TestApp, PNG_MAGIC};
use serde_json::json;

#[tokio::test]
async fn missing_values_key_returns_400() {
    let app = TestApp::spawn().await;

    let response = app.post_chart("{}").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "erro": "Os dados enviados devem conter a chave 'valores'." })
    );
}

#[tokio::test]
async fn valid_values_return_page_with_png() {
    let app = TestApp::spawn().await;

    let response = app.post_chart(r#"{"valores": [1, 2, 3]}"#).await;

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = response.text().await.unwrap();
    assert!(html.contains("Gráfico dos Valores Informados"));
    assert!(html.contains("data:image/png;base64,"));

    let png = extract_png(&html);
    assert!(png.len() > PNG_MAGIC.len());
    assert!(png.starts_with(PNG_MAGIC));
    assert_eq!(png_dimensions(&png), (1000, 500));
}

#[tokio::test]
async fn english_alias_is_accepted() {
    let app = TestApp::spawn().await;

    let response = app.post_chart(r#"{"values": [4, 8, 15, 16, 23, 42]}"#).await;

    assert_eq!(response.status().as_u16(), 200);
    let png = extract_png(&response.text().await.unwrap());
    assert!(png.starts_with(PNG_MAGIC));
}

#[tokio::test]
async fn empty_values_render_blank_chart() {
    let app = TestApp::spawn().await;

    let response = app.post_chart(r#"{"valores": []}"#).await;

    assert_eq!(response.status().as_u16(), 200);
    let png = extract_png(&response.text().await.unwrap());
    assert!(png.starts_with(PNG_MAGIC));
}

#[tokio::test]
async fn repeated_requests_produce_equivalent_pages() {
    let app = TestApp::spawn().await;
    let body = r#"{"valores": [3.5, -1, 7, 0]}"#;

    let first = app.post_chart(body).await.text().await.unwrap();
    let second = app.post_chart(body).await.text().await.unwrap();

    let heading = "<h1>Gráfico dos Valores Informados</h1>";
    assert!(first.contains(heading));
    assert!(second.contains(heading));
    assert_eq!(
        png_dimensions(&extract_png(&first)),
        png_dimensions(&extract_png(&second))
    );
}

#[tokio::test]
async fn malformed_json_returns_structured_400() {
    let app = TestApp::spawn().await;

    let response = app.post_chart(r#"{"valores": [1, 2"#).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "O corpo da requisição não é um JSON válido.");
}

#[tokio::test]
async fn non_numeric_value_returns_400_with_index() {
    let app = TestApp::spawn().await;

    let response = app.post_chart(r#"{"valores": [1, "dois", 3]}"#).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "O item 1 de 'valores' não é um número.");
}

#[tokio::test]
async fn non_object_payload_returns_400() {
    let app = TestApp::spawn().await;

    let response = app.post_chart("[1, 2, 3]").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "O corpo da requisição deve ser um objeto JSON.");
}

#[tokio::test]
async fn configured_figure_size_is_used() {
    let mut config = ChartServiceConfig::default();
    config.chart.width = 320;
    config.chart.height = 240;
    config.chart.title = "Série & Teste".to_string();
    let app = TestApp::spawn_with(config).await;

    let response = app.post_chart(r#"{"valores": [1, 4, 9]}"#).await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("<h1>Série &amp; Teste</h1>"));
    assert!(html.contains("width=\"320\""));
    assert_eq!(png_dimensions(&extract_png(&html)), (320, 240));
}

#[tokio::test]
async fn too_many_values_returns_400() {
    let mut config = ChartServiceConfig::default();
    config.limits.max_values = 3;
    let app = TestApp::spawn_with(config).await;

    let response = app.post_chart(r#"{"valores": [1, 2, 3, 4]}"#).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["erro"], "A chave 'valores' aceita no máximo 3 itens.");
}

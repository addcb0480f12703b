use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use media_studio_backend::config::StudioConfig;
use media_studio_backend::{AppState, create_app};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "---------------------------987654321098765432109876543";

fn setup(dir: &TempDir) -> Router {
    let state = AppState::new(StudioConfig::with_site_root(dir.path()));
    create_app(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_content_file_state() {
    let dir = TempDir::new().unwrap();
    let app = setup(&dir);

    let (status, health) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["contentFile"], "missing");
}

#[tokio::test]
async fn test_config_defaults_then_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = setup(&dir);

    let (status, config) = get_json(&app, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["city"], "Maricá");

    let mut updated = config.clone();
    updated["city"] = Value::from("Niterói");
    updated["clinicName"] = Value::from("CEIO Implantes");
    updated["doctors"] = serde_json::json!([{
        "fullName": "Dr. Wanderson Lugão",
        "license": "CRO/RJ 21.871",
        "education": "Implant dentistry specialist",
        "experience": "30 years of oral rehabilitation work"
    }]);

    let (status, saved) = post_json(&app, "/api/config/save", updated).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["success"], true);
    assert!(dir.path().join("src/config/siteConfig.json").exists());

    let (_, reloaded) = get_json(&app, "/api/config").await;
    assert_eq!(reloaded["city"], "Niterói");
    assert_eq!(reloaded["clinicName"], "CEIO Implantes");
    assert_eq!(reloaded["doctors"][0]["fullName"], "Dr. Wanderson Lugão");
}

#[tokio::test]
async fn test_config_with_empty_city_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = setup(&dir);

    let (_, mut config) = get_json(&app, "/api/config").await;
    config["city"] = Value::from("");

    let (status, body) = post_json(&app, "/api/config/save", config).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("city"));

    // The stored document was not touched.
    let (_, reloaded) = get_json(&app, "/api/config").await;
    assert_eq!(reloaded["city"], "Maricá");
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 30])
    });
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .unwrap();
    out
}

#[tokio::test]
async fn test_logo_upload_stores_capped_webp() {
    let dir = TempDir::new().unwrap();
    let app = setup(&dir);

    let png = png_bytes(600, 200);
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"logo\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&png);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logo/upload")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    let logo_url = json["logoUrl"].as_str().unwrap();
    assert!(logo_url.starts_with("/images/logo/logo-marica-"));
    assert!(logo_url.ends_with(".webp"));

    let stored =
        std::fs::read(dir.path().join("public").join(logo_url.trim_start_matches('/'))).unwrap();
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!(image::GenericImageView::dimensions(&decoded), (300, 100));
}

#[tokio::test]
async fn test_logo_upload_without_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = setup(&dir);

    let body = format!("--{BOUNDARY}--\r\n");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logo/upload")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

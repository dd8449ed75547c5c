//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use cci_server::{app, AppState, ServerConfig};
use rand::prelude::*;
use rand_distr::Normal;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "cci-test-boundary";

fn workbook_csv(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(5);
    let dist = Normal::new(0.0, 0.3).unwrap();
    let mut noise = move || dist.sample(&mut rng);

    let mut text = String::from("날짜,재료,노무,통합\n");
    let (mut m, mut l, mut c) = (100.0, 90.0, 95.0);
    for i in 0..rows {
        m = 10.0 + 0.9 * m + noise();
        l = 9.0 + 0.9 * l + noise();
        c = 5.0 + 0.2 * m + 0.2 * l + 0.55 * c + noise();
        text.push_str(&format!(
            "{}-{:02}-01,{:.3},{:.3},{:.3}\n",
            2012 + i / 12,
            i % 12 + 1,
            m,
            l,
            c
        ));
    }
    text
}

fn setup() -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tar1.csv"), workbook_csv(96)).unwrap();
    let config = ServerConfig {
        data_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    (dir, AppState::new(config))
}

/// `(name, file name, content)` parts as a multipart/form-data body.
fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Body {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match file_name {
            Some(file) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n",
                name, file
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    Body::from(body)
}

fn form_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/forecast")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart(parts))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_lists_available_datasets() {
    let (_dir, state) = setup();
    let response = app(state).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<option value=\"integrated\">Integrated</option>"));
    assert!(html.contains("<option value=\"labor\">Labor (missing)</option>"));
    assert!(html.contains("enctype=\"multipart/form-data\""));
}

#[tokio::test]
async fn builtin_forecast_then_download() {
    let (_dir, state) = setup();
    let router = app(state);

    let response = router
        .clone()
        .oneshot(form_request(&[
            ("source", None, "builtin"),
            ("dataset", None, "integrated"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Optimal lag (AIC)"));
    assert!(html.contains("<svg"));
    assert!(html.contains("2020-01-01"));

    let start = html.find("/forecast/").unwrap();
    let end = start + html[start..].find("\"").unwrap();
    let link = &html[start..end];
    assert!(link.ends_with("/forecast.csv"));

    let response = router.oneshot(get(link)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"forecast.csv\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "date,integrated");
    // 96 months from 2012-01 ends 2019-12
    assert!(lines[1].starts_with("2020-01-01,"));
}

#[tokio::test]
async fn missing_builtin_file_is_404() {
    let (_dir, state) = setup();
    let response = app(state)
        .oneshot(form_request(&[
            ("source", None, "builtin"),
            ("dataset", None, "frame"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("File not found"));
    assert!(html.contains("tar4.csv"));
}

#[tokio::test]
async fn uploaded_csv_is_forecast() {
    let (_dir, state) = setup();
    let csv = workbook_csv(48);
    let response = app(state)
        .oneshot(form_request(&[
            ("source", None, "upload"),
            ("file", Some("site-costs.csv"), csv.as_str()),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h2>site-costs.csv</h2>"));
    // 48 months from 2012-01 ends 2015-12
    assert!(html.contains("2016-01-01"));
}

#[tokio::test]
async fn missing_dataset_chosen_from_form_is_404() {
    let (_dir, state) = setup();
    let router = app(state);

    let html = body_text(router.clone().oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("<option value=\"labor\">"));

    let response = router
        .oneshot(form_request(&[
            ("source", None, "builtin"),
            ("dataset", None, "labor"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("File not found"));
    assert!(html.contains("tar3.csv"));
}

#[tokio::test]
async fn upload_without_date_column_is_422() {
    let (_dir, state) = setup();
    let response = app(state)
        .oneshot(form_request(&[
            ("source", None, "upload"),
            ("file", Some("bad.csv"), "month,a\n1,2\n2,3\n"),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Missing 'date' column"));
}

#[tokio::test]
async fn upload_choice_without_file_is_400() {
    let (_dir, state) = setup();
    let response = app(state)
        .oneshot(form_request(&[("source", None, "upload")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_download_is_404() {
    let (_dir, state) = setup();
    let response = app(state)
        .oneshot(get("/forecast/999/forecast.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], "No forecast with id 999");
}

#[tokio::test]
async fn api_lists_datasets() {
    let (_dir, state) = setup();
    let response = app(state).oneshot(get("/api/v1/datasets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let datasets = json.as_array().unwrap();
    assert_eq!(datasets.len(), 8);
    assert_eq!(datasets[0]["key"], "integrated");
    assert_eq!(datasets[0]["file"], "tar1.csv");
    assert_eq!(datasets[0]["available"], true);
    assert_eq!(datasets[7]["available"], false);
}

#[tokio::test]
async fn api_forecast_from_inline_csv() {
    let (_dir, state) = setup();
    let response = app(state)
        .oneshot(post_json(
            "/api/v1/forecast",
            serde_json::json!({ "csv": workbook_csv(60), "steps": 6, "criterion": "bic" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["target"], "integrated");
    assert_eq!(json["criterion"], "bic");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 6);
    assert_eq!(json["lag_order"], json["selection"]["bic"]);
}

#[tokio::test]
async fn api_rejects_oversized_horizon() {
    let (_dir, state) = setup();
    let router = app(state);

    for steps in [1_099_511_627_776u64, 1 << 62] {
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/forecast",
                serde_json::json!({ "csv": workbook_csv(60), "steps": steps }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().contains("steps"));
    }

    // The server keeps answering after the rejected requests
    let response = router.oneshot(get("/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_forecast_builtin_and_errors() {
    let (_dir, state) = setup();
    let router = app(state);

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/forecast", serde_json::json!({ "dataset": "integrated" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/forecast", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(post_json("/api/v1/forecast", serde_json::json!({ "dataset": "steel" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_probes() {
    let (dir, state) = setup();
    let router = app(state);

    let response = router.clone().oneshot(get("/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "alive");

    let response = router.clone().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    drop(dir);
    let response = router.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

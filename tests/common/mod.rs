#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use job_board_backend::{
    config::Config, database::memory::MemoryStore, routes::app_router,
    utils::crypto::hash_password, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const EDITOR_EMAIL: &str = "editor@biva.vn";
pub const EDITOR_PASSWORD: &str = "correct horse";

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "memory:".into(),
        jwt_secret: "test_secret_key".into(),
        jwt_ttl_minutes: 60,
        public_rps: 1000,
        cms_rps: 1000,
        allowed_editor_emails: vec![EDITOR_EMAIL.into()],
        editor_password_hash: hash_password(EDITOR_PASSWORD).expect("hash"),
        sheet_webhook_url: None,
        company_name: "BIVA".into(),
        log_json: false,
    }
}

pub fn test_app() -> Router {
    test_app_with(test_config())
}

pub fn test_app_with(config: Config) -> Router {
    let state = AppState::new(config, Arc::new(MemoryStore::new())).expect("state");
    app_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

pub async fn sign_in(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": EDITOR_EMAIL, "password": EDITOR_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("token").to_string()
}

pub async fn create_department(app: &Router, token: &str, name: &str, order: i32) -> JsonValue {
    let (status, body) = send(
        app,
        "POST",
        "/api/cms/departments",
        Some(token),
        Some(json!({ "name": name, "displayOrder": order })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create department: {}", body);
    body["items"]
        .as_array()
        .and_then(|items| items.iter().find(|d| d["name"] == name))
        .cloned()
        .expect("created department in re-list")
}

pub fn job_payload(title: &str, department_id: Option<&str>) -> JsonValue {
    json!({
        "jobInfo": {
            "title": title,
            "company": "BIVA",
            "salary": "15-20 triệu",
            "workType": "Full-time",
            "reportsTo": "Head of Marketing",
            "email": "hr@biva.vn",
            "phone": "0905 495 130",
            "linkedin": "https://linkedin.com/company/biva"
        },
        "sections": [
            { "id": "gioi-thieu", "title": "Giới thiệu", "content": "<p>Về BIVA</p>", "isCollapsible": false },
            { "id": "mo-ta", "title": "Mô tả công việc", "content": "<ul><li>Viết nội dung</li></ul>", "isCollapsible": true },
            { "id": "quyen-loi", "title": "Quyền lợi", "content": "<p>Lương thưởng</p>", "isCollapsible": true }
        ],
        "departmentId": department_id
    })
}

/// Publishes a posting and returns it from the re-listed items.
pub async fn create_job(app: &Router, token: &str, payload: JsonValue) -> JsonValue {
    let title = payload["jobInfo"]["title"].clone();
    let (status, body) = send(app, "POST", "/api/cms/jobs", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create job: {}", body);
    assert_eq!(body["success"], json!(true));
    body["items"]
        .as_array()
        .and_then(|items| items.iter().find(|p| p["jobInfo"]["title"] == title))
        .cloned()
        .unwrap_or(JsonValue::Null)
}

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use common::{
    create_department, create_job, job_payload, send, sign_in, test_app, EDITOR_EMAIL,
    EDITOR_PASSWORD,
};

#[tokio::test]
async fn cms_requires_a_valid_token() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/cms/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, _) = send(&app, "GET", "/api/cms/jobs", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = sign_in(&app).await;
    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], EDITOR_EMAIL);
    assert_eq!(body["role"], "editor");
}

#[tokio::test]
async fn login_checks_whitelist_then_password() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "stranger@example.com", "password": EDITOR_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "access denied");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": EDITOR_EMAIL, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "not-an-email", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("password"), "{}", body);
}

#[tokio::test]
async fn department_slugs_are_unique() {
    let app = test_app();
    let token = sign_in(&app).await;
    let marketing = create_department(&app, &token, "Phòng Marketing", 1).await;
    assert_eq!(marketing["slug"], "phong-marketing");

    let (status, _) = send(
        &app,
        "POST",
        "/api/cms/departments",
        Some(&token),
        Some(json!({ "name": "Marketing 2", "slug": "Phong Marketing" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/cms/departments/{}", marketing["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "name": "Marketing", "slug": "mkt", "description": "Brand & growth" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["items"][0]["slug"], "mkt");
    assert_eq!(body["items"][0]["description"], "Brand & growth");
}

#[tokio::test]
async fn update_without_channels_keeps_stored_configuration() {
    let app = test_app();
    let token = sign_in(&app).await;
    let mut payload = job_payload("Video Editor", None);
    payload["channels"] = json!({
        "zalo": { "enabled": true, "priority": 0, "phone": "0905 495 130" },
        "primaryChannel": "zalo"
    });
    let created = create_job(&app, &token, payload).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut update = job_payload("Video Editor", None);
    update["jobInfo"]["salary"] = json!("Thoả thuận");
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/cms/jobs/{}", id),
        Some(&token),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/cms/jobs/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobInfo"]["salary"], "Thoả thuận");
    assert_eq!(body["channels"]["zalo"]["enabled"], json!(true));
    assert_eq!(body["channels"]["zalo"]["phone"], "0905 495 130");
    assert_eq!(body["channels"]["primaryChannel"], "zalo");
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = test_app();
    let token = sign_in(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/cms/jobs",
        Some(&token),
        Some(job_payload("", None)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_sheet = job_payload("Researcher", None);
    bad_sheet["channels"] = json!({
        "google_form": { "enabled": true, "sheet_url": "https://example.com/form" }
    });
    let (status, _) = send(&app, "POST", "/api/cms/jobs", Some(&token), Some(bad_sheet)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("POST")
        .uri("/api/cms/jobs")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"jobInfo\": "))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], json!(false));

    let mut unknown_primary = job_payload("Researcher", None);
    unknown_primary["channels"] = json!({
        "zalo": { "enabled": true, "priority": 0, "phone": "0905 495 130" },
        "primaryChannel": "telegram"
    });
    let created = create_job(&app, &token, unknown_primary).await;
    assert!(created["channels"].get("primaryChannel").is_none());

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, _) = send(
        &app,
        "POST",
        "/api/cms/jobs",
        Some(&token),
        Some(job_payload("Researcher", Some(missing.as_str()))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/cms/jobs/{}", missing),
        Some(&token),
        Some(job_payload("Researcher", None)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_titles_get_distinct_slugs() {
    let app = test_app();
    let token = sign_in(&app).await;
    create_job(&app, &token, job_payload("Designer", None)).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/cms/jobs",
        Some(&token),
        Some(job_payload("Designer", None)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let slugs: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(slugs.len(), 2);
    assert_ne!(slugs[0], slugs[1]);
    assert!(slugs[0].starts_with("designer-"));
}

#[tokio::test]
async fn sections_move_and_persist() {
    let app = test_app();
    let token = sign_in(&app).await;
    let created = create_job(&app, &token, job_payload("Copywriter", None)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/cms/jobs/{}/sections/2/move", id),
        Some(&token),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["gioi-thieu", "quyen-loi", "mo-ta"]);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/cms/jobs/{}/sections/2/move", id),
        Some(&token),
        Some(json!({ "direction": "down" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"][2]["id"], "mo-ta");

    let (_, body) = send(&app, "GET", "/api/public/jobs/job/copywriter", None, None).await;
    assert_eq!(body["posting"]["sections"][1]["id"], "quyen-loi");
}

#[tokio::test]
async fn dashboard_lists_inactive_postings_with_labels() {
    let app = test_app();
    let token = sign_in(&app).await;
    let hr = create_department(&app, &token, "Nhân sự", 1).await;
    create_job(&app, &token, job_payload("Recruiter", hr["id"].as_str())).await;
    let mut draft = job_payload("Draft Role", None);
    draft["isActive"] = json!(false);
    create_job(&app, &token, draft).await;

    let (status, body) = send(&app, "GET", "/api/cms/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departments"][0]["postingCount"], 1);

    let labels: Vec<_> = body["postings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["departmentLabel"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["Chưa phân loại", "Nhân sự"]);
    assert_eq!(body["postings"][1]["publicPath"], "/nhan-su/recruiter");

    let (_, body) = send(&app, "GET", "/api/cms/jobs", Some(&token), None).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn export_downloads_editor_state() {
    let app = test_app();
    let token = sign_in(&app).await;
    let created = create_job(&app, &token, job_payload("Data Analyst", None)).await;
    let id = created["id"].as_str().unwrap();

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/cms/jobs/{}/export", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"job-posting-data.json\""
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let export: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(export["slug"], "data-analyst");
    assert_eq!(export["jobInfo"]["title"], "Data Analyst");
    assert_eq!(export["sections"].as_array().unwrap().len(), 3);
    assert_eq!(export["channels"]["gmail"]["enabled"], json!(true));
    assert_eq!(export["departmentId"], json!(null));
}

#[tokio::test]
async fn deleting_a_posting_twice_is_not_found() {
    let app = test_app();
    let token = sign_in(&app).await;
    let created = create_job(&app, &token, job_payload("Temp", None)).await;
    let uri = format!("/api/cms/jobs/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

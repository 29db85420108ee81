#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use recruitment_portal::{
    build_router,
    config::Config,
    database::store::MemoryStore,
    models::candidate::CandidateRecord,
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

pub const BOUNDARY: &str = "----portal-test-boundary";

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        public_rps: 1_000,
        admin_rps: 1_000,
        ..Config::default()
    }
}

/// Sample roster in the shape the admin screens were first built against.
pub fn mock_candidates() -> Vec<CandidateRecord> {
    let rows = [
        ("John Doe", 25, "john@example.com", "Graduate", "New Delhi", "Available", "2023-08-15"),
        ("Jane Smith", 28, "jane@example.com", "Post Graduate", "Mumbai", "Working", "2023-08-10"),
        ("Robert Johnson", 22, "robert@example.com", "Diploma", "Bangalore", "Available", "2023-08-18"),
        ("Sarah Williams", 30, "sarah@example.com", "Doctorate", "Chennai", "Working", "2023-08-05"),
        ("Michael Brown", 26, "michael@example.com", "Graduate", "Hyderabad", "Available", "2023-08-20"),
        ("Emily Davis", 24, "emily@example.com", "Post Graduate", "Kolkata", "Not Looking", "2023-08-12"),
        ("David Wilson", 29, "david@example.com", "High School", "Pune", "Working", "2023-08-08"),
        ("Lisa Miller", 27, "lisa@example.com", "Graduate", "Ahmedabad", "Available", "2023-08-22"),
        ("James Taylor", 31, "james@example.com", "Post Graduate", "New Delhi", "Working", "2023-08-25"),
        ("Maria Garcia", 23, "maria@example.com", "Graduate", "Mumbai", "Available", "2023-08-30"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, age, email, qualification, location, status, date))| CandidateRecord {
            id: Uuid::from_u128(101 + i as u128),
            name: name.to_string(),
            age: *age,
            email: email.to_string(),
            mobile: format!("98765432{:02}", i),
            qualification: qualification.to_string(),
            location: location.to_string(),
            occupation_status: status.to_string(),
            resume: None,
            id_proof: None,
            registration_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            updated_at: None,
            password_hash: String::new(),
        })
        .collect()
}

pub fn app_with(records: Vec<CandidateRecord>) -> Router {
    let store = Arc::new(MemoryStore::with_records(records));
    build_router(AppState::new(test_config(), store))
}

pub fn empty_app() -> Router {
    app_with(Vec::new())
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: JsonValue) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%test\n";
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub fn registration_fields<'a>(email: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Priya Sharma"),
        ("age", "29"),
        ("email", email),
        ("password", "Secret123"),
        ("mobile", "9876543210"),
        ("qualification", "Postgraduate"),
        ("location", "maharashtra"),
        ("occupationStatus", "Available"),
    ]
}

pub fn registration_files() -> Vec<FilePart<'static>> {
    vec![
        FilePart {
            field: "resume",
            file_name: "priya cv.pdf",
            content_type: "application/pdf",
            data: PDF_BYTES,
        },
        FilePart {
            field: "idProof",
            file_name: "aadhaar.png",
            content_type: "image/png",
            data: PNG_BYTES,
        },
    ]
}

/// Registers the standard applicant and returns the session token.
pub async fn register(app: &Router, email: &str) -> String {
    let body = multipart_body(&registration_fields(email), &registration_files());
    let (status, json) = send(app, multipart_request("POST", "/api/candidate/register", None, body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", json);
    json["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "email": "admin@example.com", "password": "adminPass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_string()
}

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use stride::api::{self, AppState};
use stride::config::StrideConfig;
use stride::db;
use stride::streak::calendar::DayBoundary;
use tower::ServiceExt;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&mut conn).unwrap();
    conn
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Today under the default (UTC) day boundary, as the API sees it.
pub fn today() -> NaiveDate {
    DayBoundary::utc().today()
}

pub fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

/// Write a session row the way the external issuer would.
pub fn insert_session(conn: &Connection, token: &str, user_id: &str, role: Option<&str>) {
    conn.execute(
        "INSERT INTO sessions (token, user_id, role, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![token, user_id, role, Utc::now().to_rfc3339()],
    )
    .unwrap();
}

/// Build handler state over `conn` with default config.
pub fn test_state(conn: Connection) -> AppState {
    AppState::new(Arc::new(Mutex::new(conn)), StrideConfig::default())
}

pub fn test_router(conn: Connection) -> (Router, Arc<Mutex<Connection>>) {
    let state = test_state(conn);
    let db = Arc::clone(&state.db);
    (api::router(state), db)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn put_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// PUT with a raw body and no `Content-Type` header.
pub fn put_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

/// Send one request through the router and return status and raw body.
pub async fn send_raw(router: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send one request and parse the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = send_raw(router, request).await;
    let value = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("response body is not JSON: {e}; body={body}"));
    (status, value)
}

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use chrono::{Duration, NaiveDate};
use salaah_web::models::{PrayerLog, PrayerName};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const SESSION_COOKIE: &str = "session=alice-session";

/// Prayer backend stand-in. Records every request as `"METHOD /path?query"`.
#[derive(Default)]
pub struct MockData {
    pub requests: Vec<String>,
    pub today: Vec<PrayerLog>,
    pub history: Vec<PrayerLog>,
    pub fail_updates: bool,
    pub fail_summaries: bool,
    pub telegram_offline: bool,
    pub registered: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    pub base_url: String,
    data: Arc<Mutex<MockData>>,
}

impl MockBackend {
    /// Serves on the caller's runtime.
    pub async fn start() -> MockBackend {
        let data = Arc::new(Mutex::new(MockData::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let app = mock_router(data.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        MockBackend { base_url, data }
    }

    /// Serves on its own thread so it outlives any single test runtime.
    pub fn start_in_thread() -> MockBackend {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let backend = MockBackend::start().await;
                tx.send(backend).unwrap();
                std::future::pending::<()>().await;
            });
        });
        rx.recv().unwrap()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        let mut data = self.data.lock().unwrap();
        f(&mut data)
    }

    pub fn requests(&self) -> Vec<String> {
        self.with(|data| data.requests.clone())
    }

    pub fn clear_requests(&self) {
        self.with(|data| data.requests.clear());
    }

    pub fn reset(&self) {
        self.with(|data| *data = MockData::default());
    }
}

pub fn entry(id: i64, prayer: PrayerName, date: NaiveDate, completed: bool) -> PrayerLog {
    PrayerLog {
        id,
        prayer_name: prayer,
        prayer_date: date,
        completed,
    }
}

/// Five entries for `date`, the first `completed` of them done.
pub fn day(first_id: i64, date: NaiveDate, completed: usize) -> Vec<PrayerLog> {
    PrayerName::ALL
        .iter()
        .enumerate()
        .map(|(position, prayer)| entry(first_id + position as i64, *prayer, date, position < completed))
        .collect()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

type Shared = Arc<Mutex<MockData>>;

fn mock_router(data: Shared) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/logout", post(logout))
        .route("/api/prayers/today", get(today))
        .route("/api/prayers/:id", put(update))
        .route("/api/summary/monthly", get(monthly))
        .route("/api/summary/weekly", get(weekly))
        .route("/api/telegram/link", post(link))
        .route("/api/telegram/test", post(test_message))
        .layer(middleware::from_fn_with_state(data.clone(), record))
        .with_state(data)
}

async fn record(State(data): State<Shared>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri());
    data.lock().unwrap().requests.push(line);
    next.run(req).await
}

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.split(';').any(|pair| pair.trim() == SESSION_COOKIE))
}

fn summary_unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Summary unavailable" })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Not logged in" }))).into_response()
}

#[derive(Deserialize)]
struct Creds {
    username: String,
    password: String,
}

async fn login(Form(creds): Form<Creds>) -> Response {
    if creds.username == "alice" && creds.password == "secret" {
        (
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
            Json(json!({ "status": "success", "username": "alice" })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid username or password" })),
        )
            .into_response()
    }
}

async fn register(State(data): State<Shared>, Form(creds): Form<Creds>) -> Response {
    let mut data = data.lock().unwrap();
    if creds.username == "alice" || data.registered.contains(&creds.username) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Username already exists" })),
        )
            .into_response();
    }
    data.registered.push(creds.username);
    Json(json!({ "status": "success", "message": "Registration successful! Please log in." }))
        .into_response()
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}

async fn today(State(data): State<Shared>, headers: HeaderMap) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    Json(data.lock().unwrap().today.clone()).into_response()
}

#[derive(Deserialize)]
struct Completion {
    completed: bool,
}

async fn update(
    State(data): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<Completion>,
) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    let mut data = data.lock().unwrap();
    if data.fail_updates {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Database unavailable" })),
        )
            .into_response();
    }
    match data.today.iter_mut().find(|entry| entry.id == id) {
        Some(entry) => {
            entry.completed = query.completed;
            Json(json!({ "message": "Prayer updated" })).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Prayer not found" }))).into_response(),
    }
}

#[derive(Deserialize)]
struct MonthQuery {
    year: i32,
    month: u32,
}

async fn monthly(State(data): State<Shared>, headers: HeaderMap, Query(query): Query<MonthQuery>) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    if data.lock().unwrap().fail_summaries {
        return summary_unavailable();
    }
    let Some(first) = NaiveDate::from_ymd_opt(query.year, query.month, 1) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid month" }))).into_response();
    };
    let entries: Vec<PrayerLog> = data
        .lock()
        .unwrap()
        .history
        .iter()
        .filter(|entry| entry.prayer_date.format("%Y-%m").to_string() == first.format("%Y-%m").to_string())
        .cloned()
        .collect();
    Json(entries).into_response()
}

#[derive(Deserialize)]
struct WeekQuery {
    start: NaiveDate,
}

async fn weekly(State(data): State<Shared>, headers: HeaderMap, Query(query): Query<WeekQuery>) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    if data.lock().unwrap().fail_summaries {
        return summary_unavailable();
    }
    let end = query.start + Duration::days(6);
    let entries: Vec<PrayerLog> = data
        .lock()
        .unwrap()
        .history
        .iter()
        .filter(|entry| entry.prayer_date >= query.start && entry.prayer_date <= end)
        .cloned()
        .collect();
    Json(entries).into_response()
}

#[derive(Deserialize)]
struct Link {
    #[serde(rename = "chatId")]
    chat_id: String,
}

async fn link(headers: HeaderMap, Form(form): Form<Link>) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    if form.chat_id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "Chat ID is required" })),
        )
            .into_response();
    }
    Json(json!({ "status": "success", "message": "Telegram linked successfully" })).into_response()
}

async fn test_message(State(data): State<Shared>, headers: HeaderMap) -> Response {
    if !signed_in(&headers) {
        return unauthorized();
    }
    if data.lock().unwrap().telegram_offline {
        return Json(json!({ "status": "error", "message": "Telegram bot is not configured" }))
            .into_response();
    }
    Json(json!({ "status": "success", "message": "Test message sent" })).into_response()
}

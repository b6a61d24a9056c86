//! Integration tests for the HTTP service
//!
//! Each test builds the real router over a seeded in-memory database and
//! drives it with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use confsite_common::db::{events, init_schema, talks, users, Event, Room, Talk, TalkFormat, User};
use confsite_common::Language;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

use confsite_web::{build_router, AppState};

const BASE_URI: &str = "http://conf.test";

/// Single-connection pool so every query sees the same in-memory database
async fn mem_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    init_schema(&pool).await.expect("Should create schema");
    pool
}

fn ts(day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        firstname: login.to_string(),
        lastname: "Speaker".to_string(),
        company: None,
        photo_url: None,
        description: Some("Writes *code*".to_string()),
    }
}

fn talk(slug: &str, speakers: &[&str]) -> Talk {
    Talk {
        id: 0,
        slug: slug.to_string(),
        event: "confsite17".to_string(),
        title: format!("Title of {}", slug),
        summary: "Learn *Rust*".to_string(),
        description: None,
        format: TalkFormat::Talk,
        speaker_ids: speakers.iter().map(|s| s.to_string()).collect(),
        language: Language::En,
        added_at: ts(1, 0, 0),
        video: None,
        topic: None,
        room: None,
        start: None,
        end: None,
    }
}

/// Seed one 2017 edition with two speakers and three talks:
/// - `intro-rust`: Amphi1, day 1 09:00, speakers alice + missing "ghost"
/// - `advanced-rust`: Amphi1, day 1 10:00, speaker bob
/// - `hallway-track`: unscheduled, topic "community"
async fn seed(pool: &SqlitePool) {
    events::insert(pool, &Event { id: "confsite17".into(), year: 2017 })
        .await
        .unwrap();
    users::insert(pool, &user("alice")).await.unwrap();
    users::insert(pool, &user("bob")).await.unwrap();

    let mut intro = talk("intro-rust", &["alice", "ghost"]);
    intro.room = Some(Room::Amphi1);
    intro.start = Some(ts(1, 9, 0));
    intro.end = Some(ts(1, 9, 45));
    talks::insert(pool, &intro).await.unwrap();

    let mut advanced = talk("advanced-rust", &["bob"]);
    advanced.room = Some(Room::Amphi1);
    advanced.start = Some(ts(1, 10, 0));
    advanced.end = Some(ts(1, 10, 45));
    talks::insert(pool, &advanced).await.unwrap();

    let mut hallway = talk("hallway-track", &[]);
    hallway.topic = Some("community".to_string());
    talks::insert(pool, &hallway).await.unwrap();
}

async fn setup_app() -> axum::Router {
    let pool = mem_pool().await;
    seed(&pool).await;
    let state = AppState::new(pool, BASE_URI).expect("Should build state");
    build_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get_with_lang(uri: &str, lang: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::ACCEPT_LANGUAGE, lang)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "confsite-web");
    assert!(body["version"].is_string());
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_list_talks_by_year() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/2017/talks")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let talks = body.as_array().unwrap();
    assert_eq!(talks.len(), 3);
}

#[tokio::test]
async fn test_api_talk_dto_shaping() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/2017/talks/intro-rust")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["slug"], "intro-rust");
    assert_eq!(body["language"], "en");
    assert_eq!(body["room"], "rooms.amphi1");
    assert_eq!(body["start"], "09:00");
    assert_eq!(body["end"], "09:45");
    assert_eq!(body["date"], "Thursday June 1, 2017");
    assert_eq!(body["summary"], "<p>Learn <em>Rust</em></p>\n");

    // "ghost" has no user record and is silently dropped
    let speakers = body["speakers"].as_array().unwrap();
    assert_eq!(speakers.len(), 1);
    assert_eq!(speakers[0]["login"], "alice");
}

#[tokio::test]
async fn test_api_talk_localized_french() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_with_lang("/api/2017/talks/intro-rust", "fr-FR,fr;q=0.9"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["date"], "jeudi 1 juin 2017");
    assert_eq!(body["start"], "9h00");
}

#[tokio::test]
async fn test_api_topic_filter() {
    let app = setup_app().await;
    let response = app
        .oneshot(get("/api/2017/talks?topic=community"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let talks = body.as_array().unwrap();
    assert_eq!(talks.len(), 1);
    assert_eq!(talks[0]["slug"], "hallway-track");
}

#[tokio::test]
async fn test_api_unknown_talk_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/2017/talks/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_api_unknown_year_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/1999/talks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_speaker_lookup() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/speaker/alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["login"], "alice");
    assert_eq!(body["description"], "<p>Writes <em>code</em></p>\n");
}

#[tokio::test]
async fn test_api_unknown_speaker_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/speaker/ghost")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// HTML views
// ============================================================================

#[tokio::test]
async fn test_talks_list_view_renders() {
    let app = setup_app().await;
    let response = app.oneshot(get("/2017")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Title of intro-rust"));
    assert!(html.contains("Title of hallway-track"));
    // summaries arrive as rendered HTML
    assert!(html.contains("<em>Rust</em>"));
}

#[tokio::test]
async fn test_talk_detail_view_renders() {
    let app = setup_app().await;
    let response = app.oneshot(get("/2017/intro-rust")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Title of intro-rust"));
    // speaker bio Markdown is rendered
    assert!(html.contains("Writes <em>code</em>"));
}

#[tokio::test]
async fn test_talk_detail_unknown_slug_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/2017/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_planning_view_renders_in_schedule_order() {
    let app = setup_app().await;
    let response = app.oneshot(get("/2017/planning")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;

    // day label and every room present
    assert!(html.contains("J1"));
    assert!(html.contains("rooms.amphi1"));
    assert!(html.contains("rooms.room6"));

    // 09:00 talk listed before the 10:00 talk
    let intro = html.find("Title of intro-rust").unwrap();
    let advanced = html.find("Title of advanced-rust").unwrap();
    assert!(intro < advanced);

    // unscheduled talk excluded from the planning view
    assert!(!html.contains("Title of hallway-track"));
}

// ============================================================================
// Legacy permalink redirects
// ============================================================================

#[tokio::test]
async fn test_redirect_from_id() {
    let app = setup_app().await;
    // seeded first, so it gets rowid 1
    let response = app.oneshot(get("/talk/id/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(location, format!("{}/2017/intro-rust", BASE_URI));
}

#[tokio::test]
async fn test_redirect_from_slug() {
    let app = setup_app().await;
    let response = app.oneshot(get("/talk/advanced-rust")).await.unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(location, format!("{}/2017/advanced-rust", BASE_URI));
}

#[tokio::test]
async fn test_redirect_unknown_id_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/talk/id/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

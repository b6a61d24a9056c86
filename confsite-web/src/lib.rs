//! confsite-web library - HTTP service for the conference website
//!
//! Serves server-rendered HTML views (talk lists, talk detail, planning) and
//! a parallel JSON API over the shared SQLite store.

use axum::routing::get;
use axum::Router;
use confsite_common::{Error, MarkdownRenderer, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tera::Tera;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod templates;
pub mod views;
pub mod web;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Compiled HTML templates
    pub templates: Arc<Tera>,
    /// Markdown renderer for talk summaries/descriptions
    pub markdown: Arc<MarkdownRenderer>,
    /// Absolute base URI for redirect targets
    pub base_uri: String,
}

impl AppState {
    /// Create application state, compiling the embedded templates
    pub fn new(db: SqlitePool, base_uri: impl Into<String>) -> Result<Self> {
        let templates = templates::build()
            .map_err(|e| Error::Internal(format!("Template compilation failed: {}", e)))?;

        Ok(Self {
            db,
            templates: Arc::new(templates),
            markdown: Arc::new(MarkdownRenderer::new()),
            base_uri: base_uri.into(),
        })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // JSON API
        .route("/health", get(api::health::health_check))
        .route("/api/:year/talks", get(api::talks::list_by_year))
        .route("/api/:year/talks/:slug", get(api::talks::find_one))
        .route("/api/speaker/:login", get(api::speakers::find_one))
        // Legacy permalinks, redirected to the canonical /:year/:slug URL
        .route("/talk/id/:id", get(web::talks::redirect_from_id))
        .route("/talk/:slug", get(web::talks::redirect_from_slug))
        // HTML views
        .route("/:year", get(web::talks::list_view))
        .route("/:year/planning", get(web::planning::planning_view))
        .route("/:year/:slug", get(web::talks::detail_view))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! HTML view handlers and shared request helpers

use crate::error::HttpError;
use axum::http::{header, HeaderMap};
use confsite_common::db::events;
use confsite_common::{Error, Language};
use serde::Deserialize;
use sqlx::SqlitePool;

pub mod planning;
pub mod talks;

/// Optional `?topic=` filter shared by the list view and the list API
#[derive(Debug, Deserialize)]
pub struct TalksQuery {
    pub topic: Option<String>,
}

/// Display language for a request, from its `Accept-Language` header
pub fn request_language(headers: &HeaderMap) -> Language {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_tag)
        .unwrap_or(Language::DEFAULT)
}

/// Resolve a year path segment to its event edition id, 404 on unknown years
pub async fn event_for_year(pool: &SqlitePool, year: i32) -> Result<String, HttpError> {
    let id = events::year_to_id(pool, year)
        .await
        .map_err(HttpError::from)?
        .ok_or_else(|| Error::NotFound(format!("No event for year {}", year)))?;
    Ok(id)
}

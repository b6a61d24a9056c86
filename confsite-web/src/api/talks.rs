//! Talk JSON endpoints
//!
//! Same DTOs as the HTML views, serialized directly.

use crate::error::HttpError;
use crate::views::{self, TalkDto};
use crate::web::{event_for_year, request_language, TalksQuery};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use confsite_common::db::{talks, users};
use confsite_common::Error;

/// GET /api/:year/talks
///
/// Every talk of the event edition, optionally filtered by `?topic=`.
pub async fn list_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<TalksQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<TalkDto>>, HttpError> {
    let lang = request_language(&headers);
    let event_id = event_for_year(&state.db, year).await?;

    let talks = talks::find_by_event(&state.db, &event_id, query.topic.as_deref()).await?;
    let speakers = views::resolve_speakers(&state.db, &talks).await?;
    let dtos = views::project_all(&talks, lang, &speakers, &state.markdown);

    Ok(Json(dtos))
}

/// GET /api/:year/talks/:slug
pub async fn find_one(
    State(state): State<AppState>,
    Path((year, slug)): Path<(i32, String)>,
    headers: HeaderMap,
) -> Result<Json<TalkDto>, HttpError> {
    let lang = request_language(&headers);
    let event_id = event_for_year(&state.db, year).await?;

    let talk = talks::find_by_event_and_slug(&state.db, &event_id, &slug)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No talk '{}' in {}", slug, year)))?;

    let index = users::find_by_logins(&state.db, &talk.speaker_ids).await?;
    let speakers = views::speakers_of(&talk, &index);
    let dto = TalkDto::project(&talk, lang, speakers, &state.markdown);

    Ok(Json(dto))
}

//! Talk HTML views and legacy permalink redirects

use crate::error::HttpError;
use crate::views::{self, SpeakerDto, TalkDto};
use crate::web::{event_for_year, request_language, TalksQuery};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use confsite_common::db::models::Talk;
use confsite_common::db::{events, talks, users};
use confsite_common::Error;
use tera::Context;

/// GET /:year
///
/// Talk list for one event edition, optionally filtered by `?topic=`.
pub async fn list_view(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<TalksQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, HttpError> {
    let lang = request_language(&headers);
    let event_id = event_for_year(&state.db, year).await?;

    let talks = talks::find_by_event(&state.db, &event_id, query.topic.as_deref()).await?;
    let speakers = views::resolve_speakers(&state.db, &talks).await?;
    let dtos = views::project_all(&talks, lang, &speakers, &state.markdown);

    let mut context = Context::new();
    context.insert("talks", &dtos);
    context.insert("year", &year);
    context.insert("topic", &query.topic);
    context.insert("base_uri", &state.base_uri);

    let html = state.templates.render("talks.html", &context)?;
    Ok(Html(html))
}

/// GET /:year/:slug
///
/// Canonical talk detail page: the talk plus its speaker profiles.
pub async fn detail_view(
    State(state): State<AppState>,
    Path((year, slug)): Path<(i32, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, HttpError> {
    let lang = request_language(&headers);
    let event_id = event_for_year(&state.db, year).await?;

    let talk = talks::find_by_event_and_slug(&state.db, &event_id, &slug)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No talk '{}' in {}", slug, year)))?;

    let index = users::find_by_logins(&state.db, &talk.speaker_ids).await?;
    let speakers = views::speakers_of(&talk, &index);
    let speaker_dtos: Vec<SpeakerDto> = speakers
        .iter()
        .map(|user| SpeakerDto::project(user, &state.markdown))
        .collect();
    let dto = TalkDto::project(&talk, lang, speakers, &state.markdown);

    let mut context = Context::new();
    context.insert("talk", &dto);
    context.insert("speakers", &speaker_dtos);
    context.insert("year", &year);
    context.insert("base_uri", &state.base_uri);

    let html = state.templates.render("talk.html", &context)?;
    Ok(Html(html))
}

/// GET /talk/id/:id
///
/// Legacy numeric-id permalink; permanent redirect to the canonical URL.
pub async fn redirect_from_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, HttpError> {
    let talk = talks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No talk with id {}", id)))?;

    canonical_redirect(&state, &talk).await
}

/// GET /talk/:slug
///
/// Legacy slug permalink; permanent redirect to the canonical URL.
pub async fn redirect_from_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Redirect, HttpError> {
    let talk = talks::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No talk '{}'", slug)))?;

    canonical_redirect(&state, &talk).await
}

async fn canonical_redirect(state: &AppState, talk: &Talk) -> Result<Redirect, HttpError> {
    let year = events::year_of(&state.db, &talk.event)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Unknown event '{}'", talk.event)))?;

    let target = format!("{}/{}/{}", state.base_uri, year, talk.slug);
    Ok(Redirect::permanent(&target))
}

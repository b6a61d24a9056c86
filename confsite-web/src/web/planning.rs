//! Schedule (planning) HTML view

use crate::error::HttpError;
use crate::views;
use crate::web::{event_for_year, request_language};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use confsite_common::db::talks;
use tera::Context;

/// GET /:year/planning
///
/// Day → room schedule grid for one event edition. Speakers are resolved
/// once for the whole talk set before grouping.
pub async fn planning_view(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    headers: HeaderMap,
) -> Result<Html<String>, HttpError> {
    let lang = request_language(&headers);
    let event_id = event_for_year(&state.db, year).await?;

    let talks = talks::find_by_event(&state.db, &event_id, None).await?;
    let speakers = views::resolve_speakers(&state.db, &talks).await?;
    let tree = views::build_planning(&talks, lang, &speakers, &state.markdown);
    let days = views::planning_days(tree);

    let mut context = Context::new();
    context.insert("days", &days);
    context.insert("year", &year);
    context.insert("base_uri", &state.base_uri);

    let html = state.templates.render("planning.html", &context)?;
    Ok(Html(html))
}

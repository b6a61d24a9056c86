//! Speaker JSON endpoint

use crate::error::HttpError;
use crate::views::SpeakerDto;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use confsite_common::db::users;
use confsite_common::Error;

/// GET /api/speaker/:login
pub async fn find_one(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<SpeakerDto>, HttpError> {
    let user = users::find_by_login(&state.db, &login)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No speaker '{}'", login)))?;

    Ok(Json(SpeakerDto::project(&user, &state.markdown)))
}

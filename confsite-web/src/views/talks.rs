//! Talk projection and batch speaker resolution
//!
//! The projection is a pure transform: Markdown fields become HTML, the
//! language becomes a lowercase tag, the room becomes a localization key,
//! and timestamps become locale-formatted strings. Speaker logins that do
//! not resolve to a user are silently dropped.

use chrono::NaiveDateTime;
use confsite_common::db::models::{Talk, TalkFormat, User};
use confsite_common::db::users;
use confsite_common::locale::{format_talk_date, format_talk_time};
use confsite_common::{Language, MarkdownRenderer, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::{BTreeSet, HashMap};

/// Presentation projection of a talk
#[derive(Debug, Clone, Serialize)]
pub struct TalkDto {
    pub id: i64,
    pub slug: String,
    pub format: TalkFormat,
    pub event: String,
    pub title: String,
    /// Rendered HTML
    pub summary: String,
    pub speakers: Vec<User>,
    /// Lowercase language tag
    pub language: String,
    pub added_at: NaiveDateTime,
    /// Rendered HTML
    pub description: Option<String>,
    pub topic: Option<String>,
    pub video: Option<String>,
    /// Localization key, e.g. `rooms.amphi1`
    pub room: Option<String>,
    /// Locale-formatted start time
    pub start: Option<String>,
    /// Locale-formatted end time
    pub end: Option<String>,
    /// Locale-formatted calendar date of `start`
    pub date: Option<String>,
}

impl TalkDto {
    /// Project a talk into its presentation form
    pub fn project(
        talk: &Talk,
        lang: Language,
        speakers: Vec<User>,
        markdown: &MarkdownRenderer,
    ) -> TalkDto {
        TalkDto {
            id: talk.id,
            slug: talk.slug.clone(),
            format: talk.format,
            event: talk.event.clone(),
            title: talk.title.clone(),
            summary: markdown.render(&talk.summary),
            speakers,
            language: talk.language.as_tag().to_string(),
            added_at: talk.added_at,
            description: talk.description.as_deref().map(|d| markdown.render(d)),
            topic: talk.topic.clone(),
            video: talk.video.clone(),
            room: talk.room.map(|r| r.locale_key()),
            start: talk.start.map(|s| format_talk_time(s, lang)),
            end: talk.end.map(|e| format_talk_time(e, lang)),
            date: talk.start.map(|s| format_talk_date(s, lang)),
        }
    }
}

/// Presentation projection of a speaker profile
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerDto {
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub photo_url: Option<String>,
    /// Rendered HTML
    pub description: Option<String>,
}

impl SpeakerDto {
    pub fn project(user: &User, markdown: &MarkdownRenderer) -> SpeakerDto {
        SpeakerDto {
            login: user.login.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            company: user.company.clone(),
            photo_url: user.photo_url.clone(),
            description: user.description.as_deref().map(|d| markdown.render(d)),
        }
    }
}

/// Deduplicated union of speaker logins across a talk slice
pub fn speaker_logins(talks: &[Talk]) -> Vec<String> {
    talks
        .iter()
        .flat_map(|talk| talk.speaker_ids.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Batch-resolve every speaker referenced by `talks` in a single storage
/// round-trip. Logins with no matching user are absent from the map.
pub async fn resolve_speakers(
    pool: &SqlitePool,
    talks: &[Talk],
) -> Result<HashMap<String, User>> {
    let logins = speaker_logins(talks);
    users::find_by_logins(pool, &logins).await
}

/// Speakers of one talk, in the talk's own listing order, skipping logins
/// that did not resolve
pub fn speakers_of(talk: &Talk, index: &HashMap<String, User>) -> Vec<User> {
    talk.speaker_ids
        .iter()
        .filter_map(|login| index.get(login).cloned())
        .collect()
}

/// Project a talk slice against a pre-resolved speaker index
pub fn project_all(
    talks: &[Talk],
    lang: Language,
    index: &HashMap<String, User>,
    markdown: &MarkdownRenderer,
) -> Vec<TalkDto> {
    talks
        .iter()
        .map(|talk| TalkDto::project(talk, lang, speakers_of(talk, index), markdown))
        .collect()
}

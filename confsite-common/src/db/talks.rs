//! Talk repository queries

use crate::db::models::Talk;
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TALK_COLUMNS: &str = "id, slug, event, title, summary, description, format, \
     speaker_ids, language, added_at, video, topic, room, start_time, end_time";

/// All talks for an event edition, optionally restricted to one topic,
/// ordered by the time they were added.
pub async fn find_by_event(
    pool: &SqlitePool,
    event_id: &str,
    topic: Option<&str>,
) -> Result<Vec<Talk>> {
    let rows = match topic {
        Some(topic) => {
            sqlx::query(&format!(
                "SELECT {TALK_COLUMNS} FROM talks WHERE event = ?1 AND topic = ?2 ORDER BY added_at, id"
            ))
            .bind(event_id)
            .bind(topic)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {TALK_COLUMNS} FROM talks WHERE event = ?1 ORDER BY added_at, id"
            ))
            .bind(event_id)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(talk_from_row).collect()
}

/// Look up a talk by its canonical (event, slug) pair
pub async fn find_by_event_and_slug(
    pool: &SqlitePool,
    event_id: &str,
    slug: &str,
) -> Result<Option<Talk>> {
    let row = sqlx::query(&format!(
        "SELECT {TALK_COLUMNS} FROM talks WHERE event = ?1 AND slug = ?2"
    ))
    .bind(event_id)
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(talk_from_row).transpose()
}

/// Look up a talk by numeric id (legacy permalink support)
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Talk>> {
    let row = sqlx::query(&format!("SELECT {TALK_COLUMNS} FROM talks WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(talk_from_row).transpose()
}

/// Look up a talk by slug alone (legacy permalink support). If the slug was
/// reused across editions the most recent edition wins.
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Talk>> {
    let row = sqlx::query(&format!(
        "SELECT {TALK_COLUMNS} FROM talks WHERE slug = ?1 ORDER BY event DESC LIMIT 1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(talk_from_row).transpose()
}

/// Insert a talk, returning its generated id. Used by data loading and tests;
/// the web layer is read-only.
pub async fn insert(pool: &SqlitePool, talk: &Talk) -> Result<i64> {
    let speaker_ids = serde_json::to_string(&talk.speaker_ids)
        .map_err(|e| Error::Internal(format!("Failed to encode speaker ids: {}", e)))?;

    let result = sqlx::query(
        r#"
        INSERT INTO talks (slug, event, title, summary, description, format,
            speaker_ids, language, added_at, video, topic, room, start_time, end_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        "#,
    )
    .bind(&talk.slug)
    .bind(&talk.event)
    .bind(&talk.title)
    .bind(&talk.summary)
    .bind(&talk.description)
    .bind(talk.format.as_str())
    .bind(speaker_ids)
    .bind(talk.language.as_tag())
    .bind(talk.added_at)
    .bind(&talk.video)
    .bind(&talk.topic)
    .bind(talk.room.map(|r| r.name()))
    .bind(talk.start)
    .bind(talk.end)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

fn talk_from_row(row: &SqliteRow) -> Result<Talk> {
    let speaker_ids: String = row.try_get("speaker_ids")?;
    let speaker_ids: Vec<String> = serde_json::from_str(&speaker_ids)
        .map_err(|e| Error::Internal(format!("Corrupt speaker_ids column: {}", e)))?;

    let format: String = row.try_get("format")?;
    let language: String = row.try_get("language")?;
    let room: Option<String> = row.try_get("room")?;

    Ok(Talk {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        event: row.try_get("event")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        description: row.try_get("description")?,
        format: format.parse()?,
        speaker_ids,
        language: language.parse()?,
        added_at: row.try_get("added_at")?,
        video: row.try_get("video")?,
        topic: row.try_get("topic")?,
        room: room.as_deref().map(str::parse).transpose()?,
        start: row.try_get("start_time")?,
        end: row.try_get("end_time")?,
    })
}

//! Event repository queries

use crate::db::models::Event;
use crate::Result;
use sqlx::{Row, SqlitePool};

/// Resolve a calendar year to its event edition id
pub async fn year_to_id(pool: &SqlitePool, year: i32) -> Result<Option<String>> {
    let row = sqlx::query("SELECT id FROM events WHERE year = ?1")
        .bind(year)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Resolve an event edition id back to its calendar year
pub async fn year_of(pool: &SqlitePool, event_id: &str) -> Result<Option<i32>> {
    let row = sqlx::query("SELECT year FROM events WHERE id = ?1")
        .bind(event_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("year")))
}

/// Insert an event edition. Used by data loading and tests.
pub async fn insert(pool: &SqlitePool, event: &Event) -> Result<()> {
    sqlx::query("INSERT INTO events (id, year) VALUES (?1, ?2)")
        .bind(&event.id)
        .bind(event.year)
        .execute(pool)
        .await?;
    Ok(())
}

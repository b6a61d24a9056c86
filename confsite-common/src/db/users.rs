//! User repository queries

use crate::db::models::User;
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Batch-fetch users by login.
///
/// Returns a login → user map; logins with no matching user are simply
/// absent. One query regardless of how many logins are requested.
pub async fn find_by_logins(pool: &SqlitePool, logins: &[String]) -> Result<HashMap<String, User>> {
    if logins.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; logins.len()].join(", ");
    let sql = format!(
        "SELECT login, firstname, lastname, company, photo_url, description \
         FROM users WHERE login IN ({placeholders})"
    );

    let mut query = sqlx::query(&sql);
    for login in logins {
        query = query.bind(login);
    }

    let rows = query.fetch_all(pool).await?;

    rows.iter()
        .map(|row| {
            let user = user_from_row(row)?;
            Ok((user.login.clone(), user))
        })
        .collect()
}

/// Look up a single user by login
pub async fn find_by_login(pool: &SqlitePool, login: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT login, firstname, lastname, company, photo_url, description \
         FROM users WHERE login = ?1",
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Insert a user. Used by data loading and tests.
pub async fn insert(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (login, firstname, lastname, company, photo_url, description)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&user.login)
    .bind(&user.firstname)
    .bind(&user.lastname)
    .bind(&user.company)
    .bind(&user.photo_url)
    .bind(&user.description)
    .execute(pool)
    .await?;
    Ok(())
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        login: row.try_get("login")?,
        firstname: row.try_get("firstname")?,
        lastname: row.try_get("lastname")?,
        company: row.try_get("company")?,
        photo_url: row.try_get("photo_url")?,
        description: row.try_get("description")?,
    })
}

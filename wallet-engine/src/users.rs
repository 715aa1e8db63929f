//! User directory: account creation and username <-> id resolution.
//!
//! Backs the identity-resolver interface consumed by the transfer engine and
//! by the (out-of-scope) authentication layer. Users are created on first
//! successful authentication and never deleted in normal operation.

use crate::errors::Result;
use crate::models::User;
use sqlx::PgExecutor;
use std::collections::HashMap;

/// Create a user with the configured opening balance and return its id.
pub async fn create<'e, E>(
    exec: E,
    username: &str,
    password_hash: &str,
    opening_balance: i64,
) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (username, password_hash, balance)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(opening_balance)
    .fetch_one(exec)
    .await?;

    Ok(id)
}

/// Full account row, password hash included, for the authentication layer.
pub async fn by_username<'e, E>(exec: E, username: &str) -> Result<Option<User>>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, balance, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(exec)
    .await?;

    Ok(user)
}

pub async fn id_by_username<'e, E>(exec: E, username: &str) -> Result<Option<i64>>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(exec)
        .await?;

    Ok(id)
}

pub async fn username_of<'e, E>(exec: E, user_id: i64) -> Result<Option<String>>
where
    E: PgExecutor<'e>,
{
    let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(exec)
        .await?;

    Ok(username)
}

/// Batch resolution for history shaping. Ids that no longer resolve are
/// simply absent from the returned map.
pub async fn usernames_of<'e, E>(exec: E, user_ids: &[i64]) -> Result<HashMap<i64, String>>
where
    E: PgExecutor<'e>,
{
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, username FROM users WHERE id = ANY($1)",
    )
    .bind(user_ids)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().collect())
}

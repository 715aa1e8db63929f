//! Balance store: per-user integer coin balance.
//!
//! Mutations go through the conditional-update primitives below, always
//! inside a transaction opened by the transfer engine. The `balance >= $1`
//! guard is the single serialization point that keeps concurrent debits from
//! driving a balance negative.

use crate::errors::Result;
use sqlx::PgExecutor;

pub async fn balance_of<'e, E>(exec: E, user_id: i64) -> Result<Option<i64>>
where
    E: PgExecutor<'e>,
{
    let balance = sqlx::query_scalar::<_, i64>("SELECT balance FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(exec)
        .await?;

    Ok(balance)
}

/// Conditionally debit `amount` from the user's balance in a single atomic
/// read-modify-write. Returns `false` when the guard did not hold (the row
/// is absent or the balance is short), leaving the row untouched.
pub async fn try_debit<'e, E>(exec: E, user_id: i64, amount: i64) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET balance = balance - $1, updated_at = now()
        WHERE id = $2 AND balance >= $1
        "#,
    )
    .bind(amount)
    .bind(user_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Additive credit. Safe to race with other units touching the same row: the
/// increment is applied atomically by the store, so no update is lost.
pub async fn credit<'e, E>(exec: E, user_id: i64, amount: i64) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET balance = balance + $1, updated_at = now()
        WHERE id = $2
        "#,
    )
    .bind(amount)
    .bind(user_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() > 0)
}

//! Inventory store: per-user per-item owned quantity.

use crate::errors::Result;
use crate::models::InventoryEntry;
use sqlx::PgExecutor;
use std::collections::HashMap;

/// Grant one unit of `item_name` to the user: insert at quantity 1 or bump
/// the existing row. Runs inside the purchase's atomic unit.
pub async fn grant<'e, E>(exec: E, user_id: i64, item_name: &str) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO inventory (user_id, item_name)
        VALUES ($1, $2)
        ON CONFLICT (user_id, item_name)
        DO UPDATE SET quantity = inventory.quantity + 1
        "#,
    )
    .bind(user_id)
    .bind(item_name)
    .execute(exec)
    .await?;

    Ok(())
}

/// Owned quantities keyed by item name; one entry per item.
pub async fn of_user<'e, E>(exec: E, user_id: i64) -> Result<HashMap<String, i64>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, InventoryEntry>(
        "SELECT user_id, item_name, quantity FROM inventory WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(|e| (e.item_name, e.quantity)).collect())
}

//! Catalog store: priced item list, seeded by migration, read-only at
//! runtime.

use crate::errors::Result;
use crate::models::CatalogItem;
use sqlx::PgExecutor;

pub async fn price_of<'e, E>(exec: E, item_name: &str) -> Result<Option<i64>>
where
    E: PgExecutor<'e>,
{
    let price = sqlx::query_scalar::<_, i64>("SELECT price FROM catalog_items WHERE name = $1")
        .bind(item_name)
        .fetch_optional(exec)
        .await?;

    Ok(price)
}

pub async fn all<'e, E>(exec: E) -> Result<Vec<CatalogItem>>
where
    E: PgExecutor<'e>,
{
    let items = sqlx::query_as::<_, CatalogItem>(
        "SELECT name, price FROM catalog_items ORDER BY name",
    )
    .fetch_all(exec)
    .await?;

    Ok(items)
}

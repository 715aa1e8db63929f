//! Standalone migration runner: applies the embedded schema migrations and
//! the catalog seed to the configured database.

use anyhow::Context;
use dotenv::dotenv;
use wallet_engine::{Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let db = Database::connect(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;

    tracing::info!("applying pending migrations");
    db.run_migrations().await.context("migration failed")?;
    tracing::info!("migrations up to date");

    Ok(())
}

use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

pub mod repositories;

pub type PgPool = sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("postgres_connect")
}

/// Applies the schema patches embedded from ./migrations, in version order.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("schema_patches")?;
    tracing::info!("schema_patches_applied");
    Ok(())
}

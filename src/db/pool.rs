use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    info!("Database connection established");

    Ok(pool)
}

const PLUGIN_STORAGE_SCHEMA: &str = include_str!("../../migrations/001_plugin_storage.sql");

/// Create the storage table. Safe to run on every start.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    sqlx::query(PLUGIN_STORAGE_SCHEMA).execute(pool).await?;

    info!("Migrations completed successfully");
    Ok(())
}

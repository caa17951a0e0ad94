use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

pub use config::DbConfig;
pub use error::DbError;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool for the configured SQLite file, creating the
/// file if it does not exist.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    tracing::debug!(url = %config.database_url, max = config.max_connections, "Opening SQLite pool");
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::debug!("Student migrations applied");
    Ok(())
}

/// Open the pool, check it answers, and bring the schema up to date.
pub async fn connect(config: &DbConfig) -> Result<DbPool, DbError> {
    let pool = create_pool(config).await?;
    health_check(&pool).await?;
    run_migrations(&pool).await?;
    tracing::info!(url = %config.database_url, "Student datastore ready");
    Ok(pool)
}

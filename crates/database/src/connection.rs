use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at startup and handed to everything that needs
/// storage; [`close`] releases it on shutdown.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = settings
        .url
        .as_deref()
        .ok_or_else(|| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(database_url)
        .await?;

    tracing::info!(
        max_connections = settings.max_connections,
        "Database connection pool established."
    );
    Ok(pool)
}

/// Applies the embedded migrations so the `schools` table exists before the
/// first request.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Waits for checked-out connections to return, then closes the pool.
pub async fn close(pool: &PgPool) {
    pool.close().await;
    tracing::info!("Database connection pool closed.");
}

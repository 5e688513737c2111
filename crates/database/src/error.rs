use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database connection is not configured: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A school with the same name and address is already stored.
    #[error("A school with this name and address already exists.")]
    Duplicate,
}

impl DbError {
    /// Maps a unique-constraint violation to [`DbError::Duplicate`].
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbError::Duplicate,
            _ => DbError::QueryError(err),
        }
    }
}

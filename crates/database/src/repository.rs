use crate::store::SchoolStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{NewSchool, SchoolRecord};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SchoolStore for DbRepository {
    async fn school_exists(&self, name: &str, address: &str) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM schools WHERE name = $1 AND address = $2)",
        )
        .bind(name)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_school(&self, school: &NewSchool) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO schools
                (name, address, city, state, contact, email_id, board, website, image, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(&school.city)
        .bind(&school.state)
        .bind(school.contact)
        .bind(&school.email_id)
        .bind(school.board.as_str())
        .bind(&school.website)
        .bind(&school.image)
        .bind(&school.description)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_insert)?;
        Ok(id)
    }

    async fn get_all_schools(&self) -> Result<Vec<SchoolRecord>, DbError> {
        let schools = sqlx::query_as::<_, SchoolRecord>(
            r#"
            SELECT id, name, address, city, state, contact, email_id, board, image, website, description
            FROM schools
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(schools)
    }
}

use crate::DbError;
use async_trait::async_trait;
use core_types::{NewSchool, SchoolRecord};

/// Everything the handlers need from the storage collaborator.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Whether a school with exactly this name and address is stored.
    async fn school_exists(&self, name: &str, address: &str) -> Result<bool, DbError>;

    /// Inserts one school and returns its assigned id.
    ///
    /// Fails with [`DbError::Duplicate`] when (name, address) is taken, even if
    /// a concurrent insert got there after [`SchoolStore::school_exists`] said no.
    async fn insert_school(&self, school: &NewSchool) -> Result<i64, DbError>;

    /// All schools, newest (highest id) first.
    async fn get_all_schools(&self) -> Result<Vec<SchoolRecord>, DbError>;
}

use crate::store::SchoolStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{NewSchool, SchoolRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// A process-local [`SchoolStore`] with the same contract as the `schools`
/// table: ids count up from 1 and (name, address) is unique.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<SchoolRecord>>,
    /// When set, every insert fails as if the database were unreachable.
    pub fail_inserts: AtomicBool,
    /// When set, every read fails as if the database were unreachable.
    pub fail_reads: AtomicBool,
    /// When set, `school_exists` always answers `false`, as it does for a
    /// request that checked just before a concurrent insert of the same school.
    pub skip_exists_check: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    fn unavailable() -> DbError {
        DbError::QueryError(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl SchoolStore for InMemoryStore {
    async fn school_exists(&self, name: &str, address: &str) -> Result<bool, DbError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(Self::unavailable());
        }
        if self.skip_exists_check.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let rows = self.rows.lock().await;
        Ok(rows.iter().any(|r| r.name == name && r.address == address))
    }

    async fn insert_school(&self, school: &NewSchool) -> Result<i64, DbError> {
        if self.fail_inserts.load(Ordering::Relaxed) {
            return Err(Self::unavailable());
        }
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|r| r.name == school.name && r.address == school.address)
        {
            return Err(DbError::Duplicate);
        }
        let id = rows.last().map_or(1, |r| r.id + 1);
        rows.push(SchoolRecord {
            id,
            name: school.name.clone(),
            address: school.address.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            contact: school.contact,
            email_id: school.email_id.clone(),
            board: school.board.as_str().to_string(),
            image: school.image.clone(),
            website: school.website.clone(),
            description: school.description.clone(),
        });
        Ok(id)
    }

    async fn get_all_schools(&self) -> Result<Vec<SchoolRecord>, DbError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(Self::unavailable());
        }
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }
}

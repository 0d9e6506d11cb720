//! Persistence of résumé records and the active-record pointer.
//!
//! The engine never touches storage; handlers go through [`ResumeLibrary`],
//! which enforces record lifecycle rules on top of a [`ResumeStore`] backend.

pub mod library;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ResumeRecord;

pub use library::{ImportReport, ResumeLibrary};
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Pool and I/O failures map to `Unavailable`; anything else is a query failure.
impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(
            e,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            StoreError::Unavailable(e.to_string())
        } else {
            StoreError::Database(e)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Record store keyed by id. Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All records, most recently updated first.
    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;

    /// Insert or replace by id.
    async fn put(&self, record: &ResumeRecord) -> Result<(), StoreError>;

    /// Upserts every record or none of them.
    async fn put_many(&self, records: &[ResumeRecord]) -> Result<(), StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    async fn active_id(&self) -> Result<Option<Uuid>, StoreError>;

    async fn set_active_id(&self, id: Uuid) -> Result<(), StoreError>;
}

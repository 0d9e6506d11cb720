use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::ResumeRecord;
use crate::store::{ResumeStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Uuid, ResumeRecord>,
    active: Option<Uuid>,
}

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut records: Vec<ResumeRecord> = inner.records.values().cloned().collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn put(&self, record: &ResumeRecord) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .records
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn put_many(&self, records: &[ResumeRecord]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for record in records {
            inner.records.insert(record.id, record.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.records.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.records.len())
    }

    async fn active_id(&self) -> Result<Option<Uuid>, StoreError> {
        Ok(self.inner.read().await.active)
    }

    async fn set_active_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.write().await.active = Some(id);
        Ok(())
    }
}

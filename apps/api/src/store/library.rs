//! Record lifecycle on top of a [`ResumeStore`].
//!
//! # Rules
//! - At least one record always exists: the library seeds one from the template
//!   when the store is empty and refuses to delete the last one.
//! - The active pointer always names an existing record once seeded.
//! - Saves bump `updatedAt`; a failed save leaves the caller's document as it was.
//! - Bulk import parses and validates the whole envelope before writing anything.
//! - Writes run one at a time: every operation that reads and then writes the
//!   store holds the library's write lock for its whole duration.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::editor::{EditAction, EditorController};
use crate::errors::AppError;
use crate::models::record::{now_millis, EXPORT_VERSION};
use crate::models::{Document, ExportEnvelope, ResumeRecord, ResumeSummary};
use crate::store::ResumeStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub ids: Vec<Uuid>,
}

#[derive(Clone)]
pub struct ResumeLibrary {
    store: Arc<dyn ResumeStore>,
    default_name: String,
    /// Shared by every clone, so handlers on different tasks serialize too.
    writes: Arc<Mutex<()>>,
}

impl ResumeLibrary {
    pub fn new(store: Arc<dyn ResumeStore>, default_name: impl Into<String>) -> Self {
        ResumeLibrary {
            store,
            default_name: default_name.into(),
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Creates the first record if the store is empty and repairs a missing or
    /// dangling active pointer. Returns the active record.
    pub async fn ensure_seeded(&self) -> Result<ResumeRecord, AppError> {
        let _guard = self.writes.lock().await;
        self.ensure_seeded_locked().await
    }

    pub async fn list(&self) -> Result<Vec<ResumeSummary>, AppError> {
        Ok(self
            .store
            .list()
            .await?
            .iter()
            .map(ResumeRecord::summary)
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ResumeRecord, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
    }

    /// New record from a deep copy of the template; it becomes the active one.
    pub async fn create_resume(&self, name: Option<String>) -> Result<ResumeRecord, AppError> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.default_name.clone());
        let record = ResumeRecord::new(name, Document::template());

        let _guard = self.writes.lock().await;
        self.store.put(&record).await?;
        self.store.set_active_id(record.id).await?;
        info!(id = %record.id, name = %record.name, "Created resume");
        Ok(record)
    }

    /// Replaces the document (and optionally the name) of an existing record.
    pub async fn save_resume(
        &self,
        id: Uuid,
        name: Option<String>,
        data: Document,
    ) -> Result<ResumeRecord, AppError> {
        let _guard = self.writes.lock().await;
        self.save_locked(id, name, data).await
    }

    /// Loads the record, applies one edit through the controller and saves the result.
    pub async fn edit_resume(&self, id: Uuid, action: EditAction) -> Result<ResumeRecord, AppError> {
        let _guard = self.writes.lock().await;
        let record = self.get(id).await?;
        let mut editor = EditorController::new(record.data);
        editor.apply(action);
        self.save_locked(id, None, editor.into_document()).await
    }

    pub async fn delete_resume(&self, id: Uuid) -> Result<(), AppError> {
        let _guard = self.writes.lock().await;
        self.get(id).await?;
        if self.store.count().await? <= 1 {
            return Err(AppError::Validation(
                "Cannot delete the last remaining resume".to_string(),
            ));
        }
        self.store.delete(id).await?;
        info!(%id, "Deleted resume");

        if self.store.active_id().await? == Some(id) {
            self.repoint_active().await?;
        }
        Ok(())
    }

    /// The active record, falling back to the most recently updated one when the
    /// pointer is unset or names a record that no longer exists.
    pub async fn active(&self) -> Result<ResumeRecord, AppError> {
        let _guard = self.writes.lock().await;
        self.active_locked().await
    }

    /// Saves the outgoing document (when given) before loading the incoming record.
    pub async fn switch_active(
        &self,
        outgoing: Option<(Uuid, Document)>,
        incoming: Uuid,
    ) -> Result<ResumeRecord, AppError> {
        let _guard = self.writes.lock().await;
        let target = self.get(incoming).await?;
        if let Some((id, data)) = outgoing {
            self.save_locked(id, None, data).await?;
        }
        self.store.set_active_id(target.id).await?;
        info!(id = %target.id, "Switched active resume");
        // Re-read in case outgoing and incoming are the same record.
        self.get(incoming).await
    }

    pub async fn export_all(&self) -> Result<ExportEnvelope, AppError> {
        Ok(ExportEnvelope {
            version: EXPORT_VERSION.to_string(),
            timestamp: now_millis(),
            resumes: self.store.list().await?,
        })
    }

    /// Parses `bytes` as an export envelope and upserts every record by id.
    pub async fn import_envelope(&self, bytes: &[u8]) -> Result<ImportReport, AppError> {
        let envelope: ExportEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Invalid export file: {e}")))?;
        if envelope.version != EXPORT_VERSION {
            return Err(AppError::UnprocessableEntity(format!(
                "Unsupported export version '{}' (expected {EXPORT_VERSION})",
                envelope.version
            )));
        }

        let records: Vec<ResumeRecord> = envelope
            .resumes
            .into_iter()
            .map(|mut r| {
                r.data = r.data.normalized();
                r
            })
            .collect();

        let _guard = self.writes.lock().await;
        self.store.put_many(&records).await?;
        info!(count = records.len(), "Imported resumes");

        self.ensure_seeded_locked().await?;
        Ok(ImportReport {
            imported: records.len(),
            ids: records.iter().map(|r| r.id).collect(),
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Callers must hold `writes`
    // ────────────────────────────────────────────────────────────────────────

    async fn ensure_seeded_locked(&self) -> Result<ResumeRecord, AppError> {
        if self.store.count().await? == 0 {
            return self.seed().await;
        }
        self.active_locked().await
    }

    async fn seed(&self) -> Result<ResumeRecord, AppError> {
        let record = ResumeRecord::new(self.default_name.clone(), Document::template());
        self.store.put(&record).await?;
        self.store.set_active_id(record.id).await?;
        info!(id = %record.id, "Seeded empty store with template resume");
        Ok(record)
    }

    async fn save_locked(
        &self,
        id: Uuid,
        name: Option<String>,
        data: Document,
    ) -> Result<ResumeRecord, AppError> {
        let mut record = self.get(id).await?;
        if let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            record.name = name;
        }
        record.data = data.normalized();
        record.touch();
        self.store.put(&record).await?;
        info!(id = %record.id, updated_at = record.updated_at, "Saved resume");
        Ok(record)
    }

    async fn active_locked(&self) -> Result<ResumeRecord, AppError> {
        if let Some(id) = self.store.active_id().await? {
            if let Some(record) = self.store.get(id).await? {
                return Ok(record);
            }
            warn!(%id, "Active resume pointer is dangling");
        }
        self.repoint_active().await
    }

    async fn repoint_active(&self) -> Result<ResumeRecord, AppError> {
        let record = match self.store.list().await?.into_iter().next() {
            Some(record) => record,
            None => return self.seed().await,
        };
        self.store.set_active_id(record.id).await?;
        Ok(record)
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::document::Document;

/// Version tag written into (and required from) bulk export envelopes.
pub const EXPORT_VERSION: &str = "1.0";

/// A persisted, named snapshot of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub name: String,
    /// Last explicit save, epoch milliseconds.
    pub updated_at: i64,
    pub data: Document,
}

impl ResumeRecord {
    /// A fresh record with a new v4 id, stamped now.
    pub fn new(name: impl Into<String>, data: Document) -> Self {
        ResumeRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            updated_at: now_millis(),
            data,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            id: self.id,
            name: self.name.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Listing entry without the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub name: String,
    pub updated_at: i64,
}

/// Bulk export/import wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportEnvelope {
    pub version: String,
    pub timestamp: i64,
    pub resumes: Vec<ResumeRecord>,
}

/// Database row for the `resumes` table. `data` holds the document as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub name: String,
    pub updated_at: i64,
    pub data: Value,
}

impl TryFrom<ResumeRow> for ResumeRecord {
    type Error = serde_json::Error;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        Ok(ResumeRecord {
            id: row.id,
            name: row.name,
            updated_at: row.updated_at,
            data: serde_json::from_value(row.data)?,
        })
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format_is_camel_case() {
        let record = ResumeRecord::new("Mi CV", Document::default());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert!(json["data"].get("columnLayout").is_some());
        assert_eq!(json["name"], "Mi CV");
    }

    #[test]
    fn test_envelope_rejects_unknown_shape() {
        let bad = r#"{"version": "1.0", "timestamp": 1, "records": []}"#;
        assert!(serde_json::from_str::<ExportEnvelope>(bad).is_err());
    }

    #[test]
    fn test_row_converts_into_record() {
        let doc = Document::default();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            name: "x".to_string(),
            updated_at: 5,
            data: serde_json::to_value(&doc).unwrap(),
        };
        let record = ResumeRecord::try_from(row).unwrap();
        assert_eq!(record.data, doc);
        assert_eq!(record.updated_at, 5);
    }
}

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::record::ResumeRow;
use crate::models::ResumeRecord;
use crate::store::{ResumeStore, StoreError};

const ACTIVE_KEY: &str = "active_resume_id";

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        updated_at  BIGINT NOT NULL,
        data        JSONB NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS resumes_updated_at_idx ON resumes (updated_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS app_settings (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    )
    "#,
];

const UPSERT: &str = r#"
    INSERT INTO resumes (id, name, updated_at, data)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name,
            updated_at = EXCLUDED.updated_at,
            data = EXCLUDED.data
"#;

/// Records as JSONB rows in Postgres; the active pointer lives in `app_settings`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps the pool and creates the schema if it does not exist yet.
    pub async fn connect(pool: PgPool) -> Result<Self, StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        info!("Resume store schema ready");
        Ok(PgStore { pool })
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn list(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT id, name, updated_at, data FROM resumes ORDER BY updated_at DESC, name",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| ResumeRecord::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let row: Option<ResumeRow> =
            sqlx::query_as("SELECT id, name, updated_at, data FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(ResumeRecord::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn put(&self, record: &ResumeRecord) -> Result<(), StoreError> {
        let data = serde_json::to_value(&record.data)?;
        sqlx::query(UPSERT)
            .bind(record.id)
            .bind(&record.name)
            .bind(record.updated_at)
            .bind(data)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn put_many(&self, records: &[ResumeRecord]) -> Result<(), StoreError> {
        // Serialize everything before opening the transaction.
        let rows = records
            .iter()
            .map(|r| Ok((r, serde_json::to_value(&r.data)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut tx = self.pool.begin().await?;
        for (record, data) in rows {
            sqlx::query(UPSERT)
                .bind(record.id)
                .bind(&record.name)
                .bind(record.updated_at)
                .bind(data)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resumes")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn active_id(&self) -> Result<Option<Uuid>, StoreError> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM app_settings WHERE key = $1")
                .bind(ACTIVE_KEY)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    async fn set_active_id(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(ACTIVE_KEY)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

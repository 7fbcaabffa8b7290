use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{KvStore, StoreError, Versioned, WriteMode};
use crate::models::job::{Application, ApplicationRow};

/// PostgreSQL-backed store. Documents live in `documents`, applications in
/// the append-only `applications` table.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgStore {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<Versioned<Value>>, StoreError> {
        let row: Option<(Value, i64)> =
            sqlx::query_as("SELECT value, version FROM documents WHERE user_id = $1 AND key = $2")
                .bind(user_id)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value, version)| Versioned { value, version }))
    }

    async fn put(
        &self,
        user_id: Uuid,
        key: &str,
        value: &Value,
        mode: WriteMode,
    ) -> Result<i64, StoreError> {
        let version: Option<i64> = match mode {
            WriteMode::Overwrite => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO documents (user_id, key, value, version)
                    VALUES ($1, $2, $3, 1)
                    ON CONFLICT (user_id, key) DO UPDATE
                        SET value = EXCLUDED.value,
                            version = documents.version + 1,
                            updated_at = now()
                    RETURNING version
                    "#,
                )
                .bind(user_id)
                .bind(key)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            WriteMode::IfVersion(0) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO documents (user_id, key, value, version)
                    VALUES ($1, $2, $3, 1)
                    ON CONFLICT (user_id, key) DO NOTHING
                    RETURNING version
                    "#,
                )
                .bind(user_id)
                .bind(key)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            WriteMode::IfVersion(expected) => {
                sqlx::query_scalar(
                    r#"
                    UPDATE documents
                    SET value = $3, version = version + 1, updated_at = now()
                    WHERE user_id = $1 AND key = $2 AND version = $4
                    RETURNING version
                    "#,
                )
                .bind(user_id)
                .bind(key)
                .bind(value)
                .bind(expected)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        version.ok_or_else(|| StoreError::VersionConflict {
            key: key.to_string(),
        })
    }

    async fn append_application(
        &self,
        user_id: Uuid,
        application: &Application,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO applications (user_id, job_id, status, applied_at, automated)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(&application.job_id)
        .bind(application.status.as_str())
        .bind(application.date)
        .bind(application.automated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT job_id, status, applied_at, automated
            FROM applications
            WHERE user_id = $1
            ORDER BY applied_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Application::from).collect())
    }
}

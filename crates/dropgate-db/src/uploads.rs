use dropgate_core::models::UploadRecord;
use dropgate_core::AppError;
use sqlx::PgPool;

/// Trait for the upload metadata sink.
///
/// Abstracts the database implementation so callers (and tests) depend on the
/// capability, not on Postgres. Inserts are issued once per successful commit
/// and never retried; a failure is the caller's to log and swallow.
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    async fn insert_upload(&self, record: &UploadRecord) -> Result<(), AppError>;
}

/// Postgres-backed upload metadata repository.
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UploadStore for UploadRepository {
    #[tracing::instrument(skip(self, record), fields(
        db.system = "postgresql",
        db.table = "uploads",
        db.operation = "insert",
        key = %record.object_key
    ))]
    async fn insert_upload(&self, record: &UploadRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO uploads (
                object_key, project_id, size_bytes, filename, ttl_days, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.object_key)
        .bind(&record.project_id)
        .bind(record.size_bytes)
        .bind(&record.filename)
        .bind(record.ttl_days)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = ?e,
                key = %record.object_key,
                project_id = %record.project_id,
                "Failed to insert upload record"
            );
            AppError::from(e)
        })?;

        Ok(())
    }
}

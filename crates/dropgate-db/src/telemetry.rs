use chrono::Utc;
use dropgate_core::models::UploadDataPoint;
use dropgate_core::AppError;
use sqlx::PgPool;

/// Trait for the upload accounting sink.
///
/// Points are fire-and-forget: the response path spawns the write and moves
/// on, so implementations must tolerate being dropped mid-flight.
#[async_trait::async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn write_data_point(&self, point: &UploadDataPoint) -> Result<(), AppError>;
}

/// Postgres-backed telemetry repository.
///
/// Rows in `upload_events` are append-only and aggregated out-of-band; the
/// gateway only ever inserts.
#[derive(Clone)]
pub struct TelemetryRepository {
    pool: PgPool,
}

impl TelemetryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TelemetrySink for TelemetryRepository {
    #[tracing::instrument(skip(self, point), fields(
        db.system = "postgresql",
        db.table = "upload_events",
        db.operation = "insert",
        project_id = %point.project_id
    ))]
    async fn write_data_point(&self, point: &UploadDataPoint) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO upload_events (
                project_id, colo, country, ttl_days, size_bytes, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&point.project_id)
        .bind(&point.colo)
        .bind(&point.country)
        .bind(point.ttl_days)
        .bind(point.size_bytes)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = ?e,
                project_id = %point.project_id,
                "Failed to insert upload event"
            );
            AppError::from(e)
        })?;

        Ok(())
    }
}

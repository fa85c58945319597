//! Repository for the `script_jobs` table.

use async_trait::async_trait;
use scriptstore_core::error::CoreError;
use scriptstore_core::jobs::{Job, JobRequest, JobSubmitter};
use sqlx::PgPool;

use crate::map_db_error;
use crate::models::job::JobRow;

/// Column list for `script_jobs` queries (the rendered body is write-only here).
const COLUMNS: &str = "id, owner_id, script_name, script_version, status, submitted_at";

/// [`JobSubmitter`] that enqueues jobs as `submitted` rows in `script_jobs`
/// for an external runner to claim. Returns as soon as the row is written.
#[derive(Clone)]
pub struct PgJobQueue {
    pool: PgPool,
}

impl PgJobQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobSubmitter for PgJobQueue {
    async fn submit(&self, request: JobRequest) -> Result<Job, CoreError> {
        let job = request.submitted_job();
        let parameters = serde_json::to_value(&request.parameters)
            .map_err(|e| CoreError::Internal(format!("Failed to encode job parameters: {e}")))?;

        let query = format!(
            "INSERT INTO script_jobs
                (id, owner_id, script_id, script_name, script_version,
                 resolved_body, parameters, status, submitted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(job.id)
            .bind(request.owner)
            .bind(request.script_id)
            .bind(&request.script_name)
            .bind(&request.script_version)
            .bind(&request.resolved_body)
            .bind(&parameters)
            .bind(job.status.as_str())
            .bind(job.submitted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Job::try_from(row)
    }
}

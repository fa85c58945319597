use scriptstore_core::error::CoreError;
use scriptstore_core::jobs::{Job, JobStatus};
use scriptstore_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `script_jobs` table, without the rendered body.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub owner_id: DbId,
    pub script_name: String,
    pub script_version: String,
    pub status: String,
    pub submitted_at: Timestamp,
}

impl TryFrom<JobRow> for Job {
    type Error = CoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = JobStatus::parse(&row.status).map_err(CoreError::Internal)?;
        Ok(Job {
            id: row.id,
            status,
            owner: row.owner_id,
            script_name: row.script_name,
            script_version: row.script_version,
            submitted_at: row.submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(status: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            owner_id: 3,
            script_name: "deploy".to_string(),
            script_version: "1".to_string(),
            status: status.to_string(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn known_status_converts() {
        let job = Job::try_from(row("running")).unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.owner, 3);
    }

    #[test]
    fn unknown_status_is_internal() {
        assert_matches!(Job::try_from(row("paused")), Err(CoreError::Internal(_)));
    }
}

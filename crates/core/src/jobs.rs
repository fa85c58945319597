//! Job submission seam.
//!
//! Executing a script hands a fully rendered [`JobRequest`] to a
//! [`JobSubmitter`] and returns the [`Job`] handle it produces. What runs
//! the job afterwards is outside this crate.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const JOB_STATUS_SUBMITTED: &str = "submitted";
pub const JOB_STATUS_RUNNING: &str = "running";
pub const JOB_STATUS_COMPLETED: &str = "completed";
pub const JOB_STATUS_FAILED: &str = "failed";
pub const JOB_STATUS_CANCELLED: &str = "cancelled";

/// Lifecycle status of a job as reported by the job subsystem.
///
/// Only `Submitted` is ever produced here; the others are read back from
/// job records the external runner has advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Submitted,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => JOB_STATUS_SUBMITTED,
            Self::Running => JOB_STATUS_RUNNING,
            Self::Completed => JOB_STATUS_COMPLETED,
            Self::Failed => JOB_STATUS_FAILED,
            Self::Cancelled => JOB_STATUS_CANCELLED,
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            JOB_STATUS_SUBMITTED => Ok(Self::Submitted),
            JOB_STATUS_RUNNING => Ok(Self::Running),
            JOB_STATUS_COMPLETED => Ok(Self::Completed),
            JOB_STATUS_FAILED => Ok(Self::Failed),
            JOB_STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(format!("Unknown job status '{s}'")),
        }
    }
}

/// Tracking handle returned to the caller of `POST /script/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub owner: DbId,
    pub script_name: String,
    pub script_version: String,
    pub submitted_at: Timestamp,
}

/// A rendered script ready for the job subsystem.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub owner: DbId,
    pub script_id: DbId,
    pub script_name: String,
    pub script_version: String,
    /// Script body with every placeholder substituted.
    pub resolved_body: String,
    pub parameters: BTreeMap<String, String>,
}

impl JobRequest {
    /// Build the `submitted` handle for this request with a fresh id.
    pub fn submitted_job(&self) -> Job {
        Job {
            id: Uuid::new_v4(),
            status: JobStatus::Submitted,
            owner: self.owner,
            script_name: self.script_name.clone(),
            script_version: self.script_version.clone(),
            submitted_at: Utc::now(),
        }
    }
}

/// Hands rendered scripts to whatever runs them. Must not wait for the job
/// to finish.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, request: JobRequest) -> Result<Job, CoreError>;
}

/// A job accepted by [`InMemoryJobQueue`].
#[derive(Debug, Clone)]
pub struct QueuedJob {
    pub job: Job,
    pub request: JobRequest,
}

/// Submitter that keeps accepted jobs in memory, in submission order.
#[derive(Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<QueuedJob>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every job accepted so far.
    pub async fn queued(&self) -> Vec<QueuedJob> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait]
impl JobSubmitter for InMemoryJobQueue {
    async fn submit(&self, request: JobRequest) -> Result<Job, CoreError> {
        let job = request.submitted_job();
        tracing::debug!(job_id = %job.id, script = %job.script_name, "Job queued in memory");
        self.jobs.lock().await.push(QueuedJob {
            job: job.clone(),
            request,
        });
        Ok(job)
    }
}

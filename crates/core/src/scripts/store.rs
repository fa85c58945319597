//! The script store service.
//!
//! [`ScriptStore`] enforces per-owner isolation, versioning and delete
//! policy over a [`ScriptRepository`], and dispatches rendered scripts to a
//! [`JobSubmitter`]. Held in the API state as an `Arc<ScriptStore>`.

use std::sync::Arc;

use serde_json::Value;

use crate::error::CoreError;
use crate::jobs::{Job, JobRequest, JobSubmitter};
use crate::scripts::delete::{DeleteSummary, DeleteTarget};
use crate::scripts::model::{validate_create, CreateScript, NewScript, Script};
use crate::scripts::placeholder;
use crate::scripts::repository::ScriptRepository;
use crate::types::DbId;

pub struct ScriptStore {
    repo: Arc<dyn ScriptRepository>,
    jobs: Arc<dyn JobSubmitter>,
}

impl ScriptStore {
    pub fn new(repo: Arc<dyn ScriptRepository>, jobs: Arc<dyn JobSubmitter>) -> Self {
        Self { repo, jobs }
    }

    /// Every script version owned by `owner`. Unknown owners get an empty list.
    pub async fn list(&self, owner: DbId) -> Result<Vec<Script>, CoreError> {
        self.repo.list_by_owner(owner).await
    }

    /// Validate and persist a new script version.
    pub async fn create(&self, owner: DbId, input: CreateScript) -> Result<Script, CoreError> {
        validate_create(&input)?;
        let script = self
            .repo
            .insert(&NewScript::from_request(owner, input))
            .await?;
        tracing::info!(
            owner,
            script = %script.name,
            version = %script.version,
            "Script version created"
        );
        Ok(script)
    }

    /// Fetch an exact version, or the current version when `version` is `None`.
    pub async fn get(
        &self,
        owner: DbId,
        name: &str,
        version: Option<&str>,
    ) -> Result<Script, CoreError> {
        let found = match version {
            Some(v) => self.repo.find_version(owner, name, v).await?,
            None => self.repo.find_current(owner, name).await?,
        };
        found.ok_or_else(|| CoreError::script_not_found(name, version))
    }

    /// Delete the versions selected by `target`.
    ///
    /// Deleting something that is already gone is `NotFound`, not a no-op.
    pub async fn delete(
        &self,
        owner: DbId,
        name: &str,
        target: &DeleteTarget,
    ) -> Result<DeleteSummary, CoreError> {
        let deleted_versions = match target {
            DeleteTarget::Version(version) => {
                if !self.repo.delete_version(owner, name, version).await? {
                    return Err(CoreError::script_not_found(name, Some(version)));
                }
                vec![version.clone()]
            }
            DeleteTarget::AllVersions => {
                let deleted = self.repo.delete_all(owner, name).await?;
                if deleted.is_empty() {
                    return Err(CoreError::script_not_found(name, None));
                }
                deleted
            }
            DeleteTarget::Unspecified => {
                let current = self.get(owner, name, None).await?;
                // A concurrent delete may win between the lookup and here.
                if !self
                    .repo
                    .delete_version(owner, name, &current.version)
                    .await?
                {
                    return Err(CoreError::script_not_found(name, Some(&current.version)));
                }
                vec![current.version]
            }
        };

        tracing::info!(owner, script = name, versions = ?deleted_versions, "Script versions deleted");
        Ok(DeleteSummary {
            name: name.to_string(),
            deleted_versions,
        })
    }

    /// Render a script with `payload` and submit it as a job.
    ///
    /// `payload` is the raw JSON body; see [`placeholder::parse_values`].
    pub async fn execute(
        &self,
        owner: DbId,
        name: &str,
        version: Option<&str>,
        payload: &Value,
    ) -> Result<Job, CoreError> {
        let script = self.get(owner, name, version).await?;
        let parameters = placeholder::parse_values(payload)?;
        let resolved_body = placeholder::render(&script.body, &parameters)?;

        let job = self
            .jobs
            .submit(JobRequest {
                owner,
                script_id: script.id,
                script_name: script.name,
                script_version: script.version,
                resolved_body,
                parameters,
            })
            .await?;

        tracing::info!(
            owner,
            job_id = %job.id,
            script = %job.script_name,
            version = %job.script_version,
            "Script submitted for execution"
        );
        Ok(job)
    }

    /// Whether the storage backend is reachable.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.repo.health_check().await
    }
}

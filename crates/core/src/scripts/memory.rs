//! In-process [`ScriptRepository`] used when no database is configured and
//! by tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::scripts::model::{NewScript, Script};
use crate::scripts::repository::ScriptRepository;
use crate::scripts::version::next_version;
use crate::types::DbId;

#[derive(Default)]
struct MemoryState {
    last_id: DbId,
    /// Kept in insertion order, so ids are ascending.
    scripts: Vec<Script>,
}

/// Script storage held behind a single `RwLock`.
///
/// Inserts take the write lock for the uniqueness check and the push, which
/// serializes racing creates the same way a unique constraint would.
#[derive(Default)]
pub struct InMemoryScriptRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryScriptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_name(script: &Script, owner: DbId, name: &str) -> bool {
    script.owner == owner && script.name == name
}

#[async_trait]
impl ScriptRepository for InMemoryScriptRepository {
    async fn insert(&self, new: &NewScript) -> Result<Script, CoreError> {
        let mut state = self.state.write().await;

        let version = match &new.version {
            Some(version) => {
                let taken = state
                    .scripts
                    .iter()
                    .any(|s| same_name(s, new.owner, &new.name) && &s.version == version);
                if taken {
                    return Err(CoreError::Conflict(format!(
                        "Script '{}' version '{version}' already exists",
                        new.name
                    )));
                }
                version.clone()
            }
            None => next_version(
                state
                    .scripts
                    .iter()
                    .filter(|s| same_name(s, new.owner, &new.name))
                    .map(|s| s.version.as_str()),
            ),
        };

        state.last_id += 1;
        let script = Script {
            id: state.last_id,
            owner: new.owner,
            name: new.name.clone(),
            version,
            body: new.body.clone(),
            description: new.description.clone(),
            created_at: Utc::now(),
        };
        state.scripts.push(script.clone());
        Ok(script)
    }

    async fn list_by_owner(&self, owner: DbId) -> Result<Vec<Script>, CoreError> {
        let state = self.state.read().await;
        let mut scripts: Vec<Script> = state
            .scripts
            .iter()
            .filter(|s| s.owner == owner)
            .cloned()
            .collect();
        scripts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(scripts)
    }

    async fn find_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<Option<Script>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .scripts
            .iter()
            .find(|s| same_name(s, owner, name) && s.version == version)
            .cloned())
    }

    async fn find_current(&self, owner: DbId, name: &str) -> Result<Option<Script>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .scripts
            .iter()
            .filter(|s| same_name(s, owner, name))
            .max_by_key(|s| s.id)
            .cloned())
    }

    async fn delete_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        let before = state.scripts.len();
        state
            .scripts
            .retain(|s| !(same_name(s, owner, name) && s.version == version));
        Ok(state.scripts.len() < before)
    }

    async fn delete_all(&self, owner: DbId, name: &str) -> Result<Vec<String>, CoreError> {
        let mut state = self.state.write().await;
        let mut deleted = Vec::new();
        state.scripts.retain(|s| {
            if same_name(s, owner, name) {
                deleted.push(s.version.clone());
                false
            } else {
                true
            }
        });
        Ok(deleted)
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

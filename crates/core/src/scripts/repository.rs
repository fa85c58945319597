//! Storage seam for scripts.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::scripts::model::{NewScript, Script};
use crate::types::DbId;

/// Storage backend for scripts keyed by (owner, name, version).
///
/// Implementations must make [`insert`](Self::insert) atomic with respect to
/// the uniqueness of (owner, name, version): of two racing inserts for the
/// same identity exactly one succeeds and the other fails with
/// [`CoreError::Conflict`]. "Current" means the surviving version with the
/// highest id.
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Insert a new version, assigning the next numeric version when
    /// `new.version` is `None`.
    async fn insert(&self, new: &NewScript) -> Result<Script, CoreError>;

    /// All scripts of `owner`, ordered by name then creation order.
    async fn list_by_owner(&self, owner: DbId) -> Result<Vec<Script>, CoreError>;

    async fn find_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<Option<Script>, CoreError>;

    async fn find_current(&self, owner: DbId, name: &str) -> Result<Option<Script>, CoreError>;

    /// Returns `true` if a row was removed.
    async fn delete_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<bool, CoreError>;

    /// Remove every version of `name`, returning the removed versions in
    /// creation order (empty if there were none).
    async fn delete_all(&self, owner: DbId, name: &str) -> Result<Vec<String>, CoreError>;

    async fn health_check(&self) -> Result<(), CoreError>;
}

//! Repository for the `scripts` table.

use async_trait::async_trait;
use scriptstore_core::error::CoreError;
use scriptstore_core::scripts::{NewScript, Script, ScriptRepository};
use scriptstore_core::types::DbId;
use sqlx::PgPool;

use crate::map_db_error;
use crate::models::script::ScriptRow;

/// Column list for `scripts` queries.
const COLUMNS: &str = "id, owner_id, name, version, body, description, created_at";

/// [`ScriptRepository`] over PostgreSQL.
///
/// Identity uniqueness is enforced by `uq_scripts_owner_name_version`, so
/// concurrent creates of the same version resolve to one winner and a
/// [`CoreError::Conflict`] for the rest.
#[derive(Clone)]
pub struct PgScriptRepository {
    pool: PgPool,
}

impl PgScriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScriptRepository for PgScriptRepository {
    /// Insert a new script version. When no version is given it is computed
    /// in the same statement as `1 + MAX` over the purely numeric versions
    /// of this (owner, name).
    async fn insert(&self, new: &NewScript) -> Result<Script, CoreError> {
        let query = format!(
            "INSERT INTO scripts (owner_id, name, version, body, description)
             VALUES ($1, $2,
                     COALESCE($3, (SELECT (COALESCE(MAX(CASE WHEN version ~ '^[0-9]{{1,18}}$'
                                                         THEN version::BIGINT END), 0) + 1)::TEXT
                                   FROM scripts
                                   WHERE owner_id = $1 AND name = $2)),
                     $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(new.owner)
            .bind(&new.name)
            .bind(&new.version)
            .bind(&new.body)
            .bind(&new.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match map_db_error(e) {
                CoreError::Conflict(_) => CoreError::Conflict(match &new.version {
                    Some(v) => format!("Script '{}' version '{v}' already exists", new.name),
                    None => format!(
                        "Script '{}' received a concurrent create, retry the request",
                        new.name
                    ),
                }),
                other => other,
            })?;
        Ok(row.into())
    }

    async fn list_by_owner(&self, owner: DbId) -> Result<Vec<Script>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE owner_id = $1 ORDER BY name, id");
        let rows = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Script::from).collect())
    }

    async fn find_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<Option<Script>, CoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts WHERE owner_id = $1 AND name = $2 AND version = $3"
        );
        let row = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(owner)
            .bind(name)
            .bind(version)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Script::from))
    }

    /// The most recently created surviving version.
    async fn find_current(&self, owner: DbId, name: &str) -> Result<Option<Script>, CoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts WHERE owner_id = $1 AND name = $2 \
             ORDER BY id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, ScriptRow>(&query)
            .bind(owner)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Script::from))
    }

    async fn delete_version(
        &self,
        owner: DbId,
        name: &str,
        version: &str,
    ) -> Result<bool, CoreError> {
        let rows = sqlx::query("DELETE FROM scripts WHERE owner_id = $1 AND name = $2 AND version = $3")
            .bind(owner)
            .bind(name)
            .bind(version)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn delete_all(&self, owner: DbId, name: &str) -> Result<Vec<String>, CoreError> {
        let mut deleted: Vec<(DbId, String)> = sqlx::query_as(
            "DELETE FROM scripts WHERE owner_id = $1 AND name = $2 RETURNING id, version",
        )
        .bind(owner)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // RETURNING order is unspecified.
        deleted.sort_by_key(|(id, _)| *id);
        Ok(deleted.into_iter().map(|(_, version)| version).collect())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(map_db_error)
    }
}

use scriptstore_core::scripts::Script;
use scriptstore_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `scripts` table.
#[derive(Debug, Clone, FromRow)]
pub struct ScriptRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub version: String,
    pub body: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

impl From<ScriptRow> for Script {
    fn from(row: ScriptRow) -> Self {
        Script {
            id: row.id,
            owner: row.owner_id,
            name: row.name,
            version: row.version,
            body: row.body,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

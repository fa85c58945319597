//! Storage backend selection at startup.

use std::sync::Arc;

use scriptstore_core::jobs::InMemoryJobQueue;
use scriptstore_core::scripts::{InMemoryScriptRepository, ScriptStore};
use scriptstore_db::{PgJobQueue, PgScriptRepository};

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageInitError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database health check failed: {0}")]
    HealthCheck(#[source] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Build the [`ScriptStore`] for this process.
///
/// With `DATABASE_URL` set, scripts and jobs go to PostgreSQL after
/// migrations are applied. Without it, both live in memory and are lost on
/// restart.
pub async fn build_store(config: &ServerConfig) -> Result<ScriptStore, StorageInitError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage (data is not persisted)");
        return Ok(in_memory_store());
    };

    let pool = scriptstore_db::create_pool(database_url)
        .await
        .map_err(StorageInitError::Connect)?;
    tracing::info!("Database connection pool created");

    scriptstore_db::health_check(&pool)
        .await
        .map_err(StorageInitError::HealthCheck)?;
    tracing::info!("Database health check passed");

    scriptstore_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(ScriptStore::new(
        Arc::new(PgScriptRepository::new(pool.clone())),
        Arc::new(PgJobQueue::new(pool)),
    ))
}

/// A store backed entirely by memory.
pub fn in_memory_store() -> ScriptStore {
    ScriptStore::new(
        Arc::new(InMemoryScriptRepository::new()),
        Arc::new(InMemoryJobQueue::new()),
    )
}

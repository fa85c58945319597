//! PostgreSQL storage for the script store.
//!
//! Provides the pool, embedded migrations, and sqlx-backed implementations
//! of the core storage and job-submission traits.

pub mod models;
pub mod repositories;

use scriptstore_core::error::CoreError;
use sqlx::postgres::PgPoolOptions;

pub use repositories::{PgJobQueue, PgScriptRepository};

pub type DbPool = sqlx::PgPool;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Map a sqlx error onto the domain error taxonomy.
///
/// - Unique violations on a `uq_` constraint become [`CoreError::Conflict`].
/// - Everything else is logged and becomes a sanitized
///   [`CoreError::Internal`].
pub fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("Database error".to_string())
}

//! Integration tests for the PostgreSQL script and job repositories.
//!
//! These need a reachable PostgreSQL (`DATABASE_URL`), so they are ignored
//! by default. Run with `cargo test -p scriptstore-db -- --ignored`.

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use scriptstore_core::error::CoreError;
use scriptstore_core::jobs::{JobRequest, JobStatus, JobSubmitter};
use scriptstore_core::scripts::{NewScript, ScriptRepository};
use scriptstore_db::{PgJobQueue, PgScriptRepository};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_script(owner: i64, name: &str, version: Option<&str>) -> NewScript {
    NewScript {
        owner,
        name: name.to_string(),
        version: version.map(str::to_string),
        body: "echo ${target}".to_string(),
        description: Some("test script".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn assigns_numeric_versions_per_owner_and_name(pool: PgPool) {
    let repo = PgScriptRepository::new(pool);

    let first = repo.insert(&new_script(1, "deploy", None)).await.unwrap();
    repo.insert(&new_script(1, "deploy", Some("beta"))).await.unwrap();
    let second = repo.insert(&new_script(1, "deploy", None)).await.unwrap();
    let other_owner = repo.insert(&new_script(2, "deploy", None)).await.unwrap();

    assert_eq!(first.version, "1");
    assert_eq!(second.version, "2");
    assert_eq!(other_owner.version, "1");
    assert_eq!(first.description.as_deref(), Some("test script"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_version_is_conflict(pool: PgPool) {
    let repo = PgScriptRepository::new(pool);

    repo.insert(&new_script(1, "deploy", Some("1"))).await.unwrap();
    let err = repo
        .insert(&new_script(1, "deploy", Some("1")))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Conflict(msg) if msg.contains("deploy"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn current_version_and_deletes(pool: PgPool) {
    let repo = PgScriptRepository::new(pool);

    repo.insert(&new_script(1, "deploy", None)).await.unwrap();
    repo.insert(&new_script(1, "deploy", Some("beta"))).await.unwrap();

    let current = repo.find_current(1, "deploy").await.unwrap().unwrap();
    assert_eq!(current.version, "beta");

    assert!(repo.delete_version(1, "deploy", "beta").await.unwrap());
    assert!(!repo.delete_version(1, "deploy", "beta").await.unwrap());

    let current = repo.find_current(1, "deploy").await.unwrap().unwrap();
    assert_eq!(current.version, "1");

    repo.insert(&new_script(1, "deploy", None)).await.unwrap();
    let deleted = repo.delete_all(1, "deploy").await.unwrap();
    assert_eq!(deleted, vec!["1", "2"]);
    assert!(repo.find_current(1, "deploy").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_is_scoped_to_owner(pool: PgPool) {
    let repo = PgScriptRepository::new(pool);

    repo.insert(&new_script(1, "zeta", None)).await.unwrap();
    repo.insert(&new_script(1, "alpha", None)).await.unwrap();
    repo.insert(&new_script(2, "beta", None)).await.unwrap();

    let listed = repo.list_by_owner(1).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert!(repo.list_by_owner(99).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn submit_writes_submitted_row(pool: PgPool) {
    let queue = PgJobQueue::new(pool.clone());

    let mut parameters = BTreeMap::new();
    parameters.insert("target".to_string(), "prod".to_string());

    let job = queue
        .submit(JobRequest {
            owner: 1,
            script_id: 10,
            script_name: "deploy".to_string(),
            script_version: "1".to_string(),
            resolved_body: "echo prod".to_string(),
            parameters,
        })
        .await
        .unwrap();
    assert_eq!(job.status, JobStatus::Submitted);

    let (body, params): (String, serde_json::Value) =
        sqlx::query_as("SELECT resolved_body, parameters FROM script_jobs WHERE id = $1")
            .bind(job.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(body, "echo prod");
    assert_eq!(params["target"], "prod");
}

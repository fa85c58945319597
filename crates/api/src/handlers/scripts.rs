//! Handlers for `/script`.
//!
//! Every endpoint requires a bearer token; the token's user id is the owner
//! for every store call.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use scriptstore_core::jobs::Job;
use scriptstore_core::scripts::{CreateScript, DeleteSummary, DeleteTarget, Script};
use scriptstore_events::bus::{
    StoreEvent, EVENT_SCRIPT_CREATED, EVENT_SCRIPT_DELETED, EVENT_SCRIPT_EXECUTED,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{DeleteParams, VersionParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an execute body. An empty body means "no placeholder values".
fn parse_execute_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// GET /script
///
/// List every script version owned by the caller.
pub async fn list_scripts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Script>>>> {
    let scripts = state.store.list(user.user_id).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// POST /script
///
/// Register a new script version for the caller.
pub async fn create_script(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateScript>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Script>>)> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let script = state.store.create(user.user_id, input).await?;

    state.event_bus.publish(
        StoreEvent::new(EVENT_SCRIPT_CREATED, user.user_id, &script.name)
            .with_version(&script.version),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: script })))
}

// ---------------------------------------------------------------------------
// Single script
// ---------------------------------------------------------------------------

/// GET /script/{name}?version=
///
/// Fetch an exact version, or the current one when `version` is omitted.
pub async fn get_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Query(params): Query<VersionParams>,
) -> AppResult<Json<DataResponse<Script>>> {
    let script = state
        .store
        .get(user.user_id, &name, params.version.as_deref())
        .await?;
    Ok(Json(DataResponse { data: script }))
}

/// POST /script/{name}?version=
///
/// Execute a script. The body is an arbitrary JSON object of placeholder
/// values; an empty body supplies none.
pub async fn execute_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Query(params): Query<VersionParams>,
    body: Bytes,
) -> AppResult<Json<DataResponse<Job>>> {
    let payload = parse_execute_body(&body)?;

    let job = state
        .store
        .execute(user.user_id, &name, params.version.as_deref(), &payload)
        .await?;

    state.event_bus.publish(
        StoreEvent::new(EVENT_SCRIPT_EXECUTED, user.user_id, &job.script_name)
            .with_version(&job.script_version)
            .with_payload(serde_json::json!({ "job_id": job.id })),
    );

    Ok(Json(DataResponse { data: job }))
}

/// DELETE /script/{name}?version=&delete_all=
///
/// Delete one version, all versions, or (with neither flag) the current
/// version. Supplying both flags is rejected before the store is touched.
pub async fn delete_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<DataResponse<DeleteSummary>>> {
    let target = DeleteTarget::from_query(params.version, params.delete_all.as_deref())
        .map_err(AppError::BadRequest)?;

    let summary = state.store.delete(user.user_id, &name, &target).await?;

    state.event_bus.publish(
        StoreEvent::new(EVENT_SCRIPT_DELETED, user.user_id, &name)
            .with_payload(serde_json::json!({ "versions": summary.deleted_versions })),
    );

    Ok(Json(DataResponse { data: summary }))
}

pub mod health;
pub mod scripts;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /health                   health check
/// /script                   list, create
/// /script/{name}            get, execute, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(scripts::router())
}

//! Route definitions for script endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Script routes. All require a bearer token (enforced by handler extractors).
///
/// ```text
/// GET    /script                -> list_scripts
/// POST   /script                -> create_script
/// GET    /script/{name}         -> get_script
/// POST   /script/{name}         -> execute_script
/// DELETE /script/{name}         -> delete_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/script",
            get(scripts::list_scripts).post(scripts::create_script),
        )
        .route(
            "/script/{name}",
            get(scripts::get_script)
                .post(scripts::execute_script)
                .delete(scripts::delete_script),
        )
}

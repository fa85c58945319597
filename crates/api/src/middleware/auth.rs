//! Caller identity for script handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use scriptstore_core::error::CoreError;
use scriptstore_core::types::DbId;

use crate::auth::jwt::{validate_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// The owner resolved from `Authorization: Bearer <token>`.
///
/// Taking `AuthUser` as a handler argument makes the route authenticated;
/// `user_id` is passed as the owner into every [`ScriptStore`] call.
///
/// [`ScriptStore`]: scriptstore_core::scripts::ScriptStore
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Pull the raw token out of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            match e {
                TokenError::Expired => unauthorized("Token has expired"),
                TokenError::InvalidSubject | TokenError::Invalid(_) => {
                    unauthorized("Invalid or expired token")
                }
            }
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

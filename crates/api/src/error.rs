use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scriptstore_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// of the form `{"error": ..., "code": ...}`, plus `"details"` where the
/// error carries structured data.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `scriptstore_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The caller broke an input contract detected at the HTTP boundary.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;

        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} {key} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::PlaceholderMismatch { missing, unknown } => {
                    details = Some(json!({ "missing": missing, "unknown": unknown }));
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        placeholder_message(missing, unknown),
                    )
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

fn placeholder_message(missing: &[String], unknown: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing values for: {}", missing.join(", ")));
    }
    if !unknown.is_empty() {
        parts.push(format!("unknown placeholders: {}", unknown.join(", ")));
    }
    format!("Placeholder mismatch ({})", parts.join("; "))
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) =
            render(CoreError::script_not_found("deploy", Some("2")).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "script deploy@2 not found");
    }

    #[tokio::test]
    async fn placeholder_mismatch_carries_details() {
        let err = CoreError::PlaceholderMismatch {
            missing: vec!["target".into()],
            unknown: vec!["extra".into()],
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["missing"][0], "target");
        assert_eq!(body["details"]["unknown"][0], "extra");
        assert_eq!(
            body["error"],
            "Placeholder mismatch (missing values for: target; unknown placeholders: extra)"
        );
    }

    #[tokio::test]
    async fn internal_errors_are_sanitized() {
        let (status, body) = render(CoreError::Internal("db exploded".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn conflict_and_bad_request() {
        let (status, _) = render(CoreError::Conflict("dup".into()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, body) = render(AppError::BadRequest("both".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `key` identifies the missing entity in human-readable form,
    /// e.g. `deploy@3` or `deploy`.
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Placeholder mismatch: missing {missing:?}, unknown {unknown:?}")]
    PlaceholderMismatch {
        /// Placeholders in the script body with no supplied value.
        missing: Vec<String>,
        /// Supplied keys that match no placeholder in the script body.
        unknown: Vec<String>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing script, optionally pinned to a version.
    pub fn script_not_found(name: &str, version: Option<&str>) -> Self {
        let key = match version {
            Some(v) => format!("{name}@{v}"),
            None => name.to_string(),
        };
        CoreError::NotFound {
            entity: "script",
            key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_not_found_includes_version() {
        let err = CoreError::script_not_found("deploy", Some("3"));
        assert_eq!(err.to_string(), "Entity not found: script deploy@3");
    }

    #[test]
    fn script_not_found_without_version() {
        let err = CoreError::script_not_found("deploy", None);
        assert_eq!(err.to_string(), "Entity not found: script deploy");
    }
}

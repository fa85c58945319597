//! Script entity and the create-request schema.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::scripts::version::{is_token_char, validate_version};
use crate::types::{DbId, Timestamp};

/// Maximum length for a script name in characters.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length for a script body in characters.
pub const MAX_BODY_LENGTH: usize = 262_144;

/// Maximum length for a script description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000;

/// A single stored version of a user's script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Storage-assigned id. Strictly increasing in creation order.
    pub id: DbId,
    pub owner: DbId,
    pub name: String,
    pub version: String,
    pub body: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for `POST /script`.
///
/// The owner is never taken from the payload; it comes from the caller's
/// identity. Unknown fields are rejected so a client cannot smuggle one in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateScript {
    #[validate(length(min = 1, max = 128, message = "name must be 1-128 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 262144, message = "body must be 1-262144 characters"))]
    pub body: String,
    #[validate(length(min = 1, max = 64, message = "version must be 1-64 characters"))]
    pub version: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// A validated script ready for insertion. `version` is `None` when the
/// repository should assign the next numeric version.
#[derive(Debug, Clone)]
pub struct NewScript {
    pub owner: DbId,
    pub name: String,
    pub version: Option<String>,
    pub body: String,
    pub description: Option<String>,
}

impl NewScript {
    pub fn from_request(owner: DbId, input: CreateScript) -> Self {
        Self {
            owner,
            name: input.name,
            version: input.version,
            body: input.body,
            description: input.description,
        }
    }
}

/// Validate a create request: field lengths, then name and version syntax.
pub fn validate_create(input: &CreateScript) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_script_name(&input.name)?;
    if let Some(version) = &input.version {
        validate_version(version)?;
    }
    Ok(())
}

/// Names appear as a URL path segment, so they are restricted to
/// `[A-Za-z0-9._-]` and may not be `.` or `..`.
pub fn validate_script_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Script name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Script name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    if name == "." || name == ".." {
        return Err(CoreError::Validation(format!(
            "Script name '{name}' is reserved"
        )));
    }
    if let Some(bad) = name.chars().find(|c| !is_token_char(*c)) {
        return Err(CoreError::Validation(format!(
            "Script name contains invalid character '{bad}'. Allowed: letters, digits, '.', '_', '-'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(name: &str, body: &str, version: Option<&str>) -> CreateScript {
        CreateScript {
            name: name.to_string(),
            body: body.to_string(),
            version: version.map(str::to_string),
            description: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_create(&request("deploy", "echo ${target}", None)).is_ok());
        assert!(validate_create(&request("deploy.v2_final-x", "true", Some("1.2.0"))).is_ok());
    }

    #[test]
    fn empty_body_rejected() {
        assert_matches!(
            validate_create(&request("deploy", "", None)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_name_rejected() {
        assert_matches!(
            validate_create(&request("", "echo", None)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn name_with_slash_rejected() {
        assert_matches!(
            validate_create(&request("a/b", "echo", None)),
            Err(CoreError::Validation(msg)) if msg.contains('/')
        );
    }

    #[test]
    fn dot_names_rejected() {
        assert!(validate_script_name(".").is_err());
        assert!(validate_script_name("..").is_err());
        assert!(validate_script_name("...").is_ok());
    }

    #[test]
    fn too_long_name_rejected() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_create(&request(&name, "echo", None)).is_err());
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert!(validate_create(&request(&name, "echo", None)).is_ok());
    }

    #[test]
    fn bad_version_rejected() {
        assert!(validate_create(&request("deploy", "echo", Some(""))).is_err());
        assert!(validate_create(&request("deploy", "echo", Some("v 1"))).is_err());
    }

    #[test]
    fn too_long_description_rejected() {
        let mut input = request("deploy", "echo", None);
        input.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn owner_field_in_payload_is_rejected() {
        let payload = serde_json::json!({"name": "deploy", "body": "echo", "owner": 99});
        let parsed: Result<CreateScript, _> = serde_json::from_value(payload);
        assert!(parsed.is_err());
    }
}

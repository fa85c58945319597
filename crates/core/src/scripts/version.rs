//! Script version syntax and server-side version assignment.
//!
//! Callers may pick any version token (`1.2.0`, `beta`, `7`). When they
//! don't, the store assigns `1 + max(numeric versions)` for that
//! (owner, name), starting at `"1"`. Non-numeric versions never affect the
//! assigned number.

use crate::error::CoreError;

/// Maximum length for a version token in characters.
pub const MAX_VERSION_LENGTH: usize = 64;

/// Numeric versions are 1 to this many ASCII digits, which always fits i64.
pub const MAX_NUMERIC_VERSION_DIGITS: usize = 18;

/// Characters allowed in script names and version tokens.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Validate a caller-supplied version token.
pub fn validate_version(version: &str) -> Result<(), CoreError> {
    if version.is_empty() {
        return Err(CoreError::Validation(
            "Version must not be empty".to_string(),
        ));
    }
    if version.chars().count() > MAX_VERSION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Version exceeds maximum length of {MAX_VERSION_LENGTH} characters"
        )));
    }
    if let Some(bad) = version.chars().find(|c| !is_token_char(*c)) {
        return Err(CoreError::Validation(format!(
            "Version contains invalid character '{bad}'. Allowed: letters, digits, '.', '_', '-'"
        )));
    }
    Ok(())
}

/// Parse a version as a number if it is purely numeric.
pub fn numeric_version(version: &str) -> Option<i64> {
    if version.is_empty()
        || version.len() > MAX_NUMERIC_VERSION_DIGITS
        || !version.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    version.parse().ok()
}

/// Compute the next server-assigned version given the existing versions of
/// one (owner, name).
pub fn next_version<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let max = existing
        .into_iter()
        .filter_map(numeric_version)
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

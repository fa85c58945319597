//! Delete targets for `DELETE /script/{name}`.

use serde::Serialize;

/// Which versions of a script a delete applies to.
///
/// Built once from the query string by [`DeleteTarget::from_query`], which
/// rejects the case where both `version` and `delete_all` are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Exactly this version.
    Version(String),
    /// Every version of the name.
    AllVersions,
    /// Neither flag given: the current version.
    Unspecified,
}

impl DeleteTarget {
    /// Combine the raw `version` and `delete_all` query values.
    ///
    /// Presence of both is an error whatever their values.
    pub fn from_query(version: Option<String>, delete_all: Option<&str>) -> Result<Self, String> {
        match (version, delete_all) {
            (Some(_), Some(_)) => {
                Err("Please specify only one of `version` or `delete_all`.".to_string())
            }
            (Some(version), None) => {
                if version.is_empty() {
                    Err("`version` must not be empty".to_string())
                } else {
                    Ok(Self::Version(version))
                }
            }
            (None, Some(flag)) => {
                if parse_flag(flag)? {
                    Ok(Self::AllVersions)
                } else {
                    Ok(Self::Unspecified)
                }
            }
            (None, None) => Ok(Self::Unspecified),
        }
    }
}

/// Parse a boolean query flag. A bare `?delete_all` (empty value) is true.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!(
            "Invalid boolean '{other}'. Must be one of: true, false, 1, 0, yes, no, on, off"
        )),
    }
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub name: String,
    /// Versions removed, in creation order.
    pub deleted_versions: Vec<String>,
}

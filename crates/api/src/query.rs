//! Query parameter types for the script endpoints.

use serde::Deserialize;

/// `?version=` on `GET` and `POST /script/{name}`.
#[derive(Debug, Deserialize)]
pub struct VersionParams {
    pub version: Option<String>,
}

/// `?version=&delete_all=` on `DELETE /script/{name}`.
///
/// Kept as raw strings: presence matters more than value, and the pair is
/// turned into a `DeleteTarget` in one place.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub version: Option<String>,
    pub delete_all: Option<String>,
}

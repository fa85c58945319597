//! `${name}` placeholder extraction and substitution.
//!
//! Substitution is strict: every placeholder in the body needs a value and
//! every supplied key must match a placeholder. Substitution is a single
//! pass, so a value that itself contains `${...}` is inserted verbatim.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::CoreError;

/// Regex pattern matching `${name}` tokens in script bodies.
pub const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Extract all placeholder names from a script body, de-duplicated and sorted.
pub fn extract_placeholders(body: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Turn an execute payload into placeholder values.
///
/// `null` means no values. Otherwise the payload must be an object whose
/// values are strings, numbers or booleans.
pub fn parse_values(payload: &Value) -> Result<BTreeMap<String, String>, CoreError> {
    let object = match payload {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(object) => object,
        _ => {
            return Err(CoreError::Validation(
                "Placeholder values must be a JSON object".to_string(),
            ))
        }
    };

    object
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(CoreError::Validation(format!(
                        "Placeholder '{key}' must be a string, number or boolean"
                    )))
                }
            };
            Ok((key.clone(), rendered))
        })
        .collect()
}

/// Substitute `values` into `body`, rejecting missing or unknown keys.
pub fn render(body: &str, values: &BTreeMap<String, String>) -> Result<String, CoreError> {
    let placeholders = extract_placeholders(body);

    let missing: Vec<String> = placeholders
        .iter()
        .filter(|name| !values.contains_key(*name))
        .cloned()
        .collect();
    let unknown: Vec<String> = values
        .keys()
        .filter(|key| !placeholders.contains(*key))
        .cloned()
        .collect();

    if !missing.is_empty() || !unknown.is_empty() {
        return Err(CoreError::PlaceholderMismatch { missing, unknown });
    }

    let rendered = PLACEHOLDER_RE.replace_all(body, |caps: &regex::Captures| {
        values
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(rendered.into_owned())
}

//! Best-effort projection of named fields out of a serialized event
//!
//! The lookup runs on the JSON text of the event, not on its structure: a
//! key is found wherever its text appears followed by a separator (`":"`,
//! `: `, ...) and the captured value is the text up to the next quote.
//! When the same key text also occurs inside a nested value or inside the
//! message, the last occurrence wins and may not be the top-level field.
//! Numeric values keep whatever trails them up to the next quote (`5,`).

use super::error::{LoggerError, Result};
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Upper bound on distinct field names kept compiled
const MAX_CACHED_PATTERNS: usize = 256;

static FIELD_PATTERNS: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();

/// Ambient field to surface as a top-level output key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeableField {
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ExposeableField {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            alias: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Key the captured value is exposed under
    pub fn output_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field_name)
    }
}

/// Extract `fields` from the serialized event text
///
/// Fields without a match are left out of the result.
pub fn extract_fields(
    serialized: &str,
    fields: &[ExposeableField],
) -> Result<Map<String, Value>> {
    let mut exposed = Map::new();

    for field in fields {
        let regex = field_regex(&field.field_name)?;
        if let Some(captured) = regex.captures(serialized).and_then(|c| c.get(1)) {
            exposed.insert(
                field.output_key().to_string(),
                Value::String(captured.as_str().to_string()),
            );
        }
    }

    Ok(exposed)
}

/// Compiled lookup pattern for `field_name`, reused across calls
fn field_regex(field_name: &str) -> Result<Regex> {
    let patterns = FIELD_PATTERNS.get_or_init(RwLock::default);
    if let Some(regex) = patterns.read().get(field_name) {
        return Ok(regex.clone());
    }

    let pattern = format!(
        r#"(?s)(?:.*{}"?[:\s]*["']?)([^"']*)"#,
        regex::escape(field_name)
    );
    let regex = Regex::new(&pattern).map_err(|e| LoggerError::pattern(pattern, e))?;

    let mut cache = patterns.write();
    if cache.len() < MAX_CACHED_PATTERNS {
        cache.insert(field_name.to_string(), regex.clone());
    }
    Ok(regex)
}

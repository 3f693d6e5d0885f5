//! Namespace matching against include/exclude pattern lists
//!
//! A pattern list is comma separated. Entries starting with `-` exclude,
//! every other entry includes. `*` matches anything. A pattern ending in
//! `/*` or `:*` also enables its exact parent, so `svc/*` enables `svc` as
//! well as `svc/db`. Matching is an unanchored search.
//!
//! ```
//! use chunked_event_logger::core::namespace::is_enabled;
//!
//! assert!(is_enabled("api:orders", Some("api*")));
//! assert!(!is_enabled("api:users", Some("api*,-api:users")));
//! assert!(!is_enabled("api", None));
//! ```

use super::error::{LoggerError, Result};
use regex::Regex;

/// Pre-compiled pattern list
#[derive(Debug, Clone, Default)]
pub struct NamespaceMatcher {
    source: Option<String>,
    including: Vec<Regex>,
    excluding: Vec<Regex>,
}

impl NamespaceMatcher {
    /// Matcher that enables nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Compile a comma separated pattern list
    pub fn parse(patterns: &str) -> Result<Self> {
        let mut matcher = Self {
            source: Some(patterns.to_string()),
            ..Self::default()
        };

        for entry in patterns.split(',').map(str::trim) {
            let (pattern, excluding) = match entry.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (entry, false),
            };

            // An empty pattern never matches anything
            if pattern.is_empty() {
                continue;
            }

            let regex = Regex::new(&translate(pattern))
                .map_err(|e| LoggerError::pattern(pattern, e))?;
            if excluding {
                matcher.excluding.push(regex);
            } else {
                matcher.including.push(regex);
            }
        }

        Ok(matcher)
    }

    /// Compile an optional pattern list; `None` enables nothing
    pub fn from_optional(patterns: Option<&str>) -> Result<Self> {
        match patterns {
            Some(p) => Self::parse(p),
            None => Ok(Self::disabled()),
        }
    }

    /// Exclusions win over inclusions; no inclusion match means disabled
    pub fn is_enabled(&self, namespace: &str) -> bool {
        if self.excluding.iter().any(|re| re.is_match(namespace)) {
            return false;
        }
        self.including.iter().any(|re| re.is_match(namespace))
    }

    /// The pattern list this matcher was compiled from
    pub fn patterns(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// One-shot check of `namespace` against a pattern list
pub fn is_enabled(namespace: &str, patterns: Option<&str>) -> bool {
    match patterns {
        None => false,
        Some(p) if p.is_empty() => false,
        Some(p) => NamespaceMatcher::parse(p)
            .map(|matcher| matcher.is_enabled(namespace))
            .unwrap_or(false),
    }
}

/// Translate a wildcard pattern into a regex, escaping everything but `*`
fn translate(pattern: &str) -> String {
    let mut regex = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    // A trailing `/*` or `:*` also enables the bare parent namespace
    let parent = pattern
        .strip_suffix('*')
        .and_then(|rest| rest.strip_suffix(['/', ':']))
        .filter(|parent| !parent.is_empty());
    if let Some(parent) = parent {
        regex.push_str("|^");
        regex.push_str(&regex::escape(parent));
        regex.push('$');
    }

    regex
}

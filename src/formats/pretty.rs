//! Human-readable rendering
//!
//! ```text
//!
//! [2025-01-08T10:30:45.123Z]: [user signed in]
//!     name: portal
//!     level: log
//!     namespace: auth
//!
//! ```
//!
//! The body is an indented, YAML-like view of every field except the
//! timestamp and message; arrays of scalars are rendered inline.

use crate::core::LogEvent;
use serde_json::Value;

#[cfg(feature = "console")]
use colored::Colorize;

const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrinter {
    indent: usize,
    colors: bool,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            colors: false,
        }
    }
}

impl PrettyPrinter {
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Colour keys; only effective with the `console` feature
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn render(&self, event: &LogEvent) -> String {
        let header = format!("[{}]: [{}]", event.timestamp, event.message_text());

        let details: serde_json::Map<String, Value> = event
            .to_record()
            .into_iter()
            .filter(|(key, _)| key != "timestamp" && key != "message")
            .collect();

        let mut lines = Vec::new();
        self.render_object(&details, 0, &mut lines);
        let body = lines.join("\n").replace('\n', "\n\t");

        format!("\n{}\n\t{}\n\n", header, body)
    }

    fn render_object(&self, object: &serde_json::Map<String, Value>, depth: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(depth * self.indent);
        for (key, value) in object {
            let key = self.paint_key(key);
            match value {
                Value::Object(nested) if !nested.is_empty() => {
                    lines.push(format!("{}{}:", pad, key));
                    self.render_object(nested, depth + 1, lines);
                }
                Value::Array(items) if !is_inline(items) => {
                    lines.push(format!("{}{}:", pad, key));
                    self.render_array(items, depth + 1, lines);
                }
                other => lines.push(format!("{}{}: {}", pad, key, scalar(other))),
            }
        }
    }

    fn render_array(&self, items: &[Value], depth: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(depth * self.indent);
        for item in items {
            match item {
                Value::Object(nested) if !nested.is_empty() => {
                    lines.push(format!("{}-", pad));
                    self.render_object(nested, depth + 1, lines);
                }
                Value::Array(inner) if !is_inline(inner) => {
                    lines.push(format!("{}-", pad));
                    self.render_array(inner, depth + 1, lines);
                }
                other => lines.push(format!("{}- {}", pad, scalar(other))),
            }
        }
    }

    #[cfg(feature = "console")]
    fn paint_key(&self, key: &str) -> String {
        if self.colors {
            key.green().to_string()
        } else {
            key.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_key(&self, key: &str) -> String {
        key.to_string()
    }
}

fn is_inline(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| !matches!(item, Value::Object(o) if !o.is_empty()) && !matches!(item, Value::Array(a) if !a.is_empty()))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "(empty array)".to_string(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => "(empty object)".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use serde_json::json;

    fn event() -> LogEvent {
        LogEvent {
            level: LogLevel::Warn,
            message: json!("cache miss"),
            timestamp: "2025-01-08T10:30:45.123Z".to_string(),
            namespace: "cache".to_string(),
            context: Fields::new().with_field("context", json!({"shard": 3, "tags": ["a", "b"]})),
            ambient: Fields::new(),
            additional: Fields::new().with_field("keys", json!([{"id": 1}])),
            uptime: 2.0,
        }
    }

    #[test]
    fn test_header_and_framing() {
        let text = PrettyPrinter::default().render(&event());

        assert!(text.starts_with("\n[2025-01-08T10:30:45.123Z]: [cache miss]\n\t"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_body_excludes_timestamp_and_message() {
        let text = PrettyPrinter::default().render(&event());

        assert!(text.contains("\tlevel: warn"));
        assert!(text.contains("\tnamespace: cache"));
        assert!(!text.contains("timestamp:"));
        assert!(!text.contains("message:"));
    }

    #[test]
    fn test_nested_values_are_indented() {
        let text = PrettyPrinter::default().render(&event());

        assert!(text.contains("\tcontext:\n\t    shard: 3"));
        assert!(text.contains("\t    tags: a, b"));
        assert!(text.contains("\tkeys:\n\t    -\n\t        id: 1"));
    }

    #[test]
    fn test_structured_message_in_header() {
        let mut event = event();
        event.message = json!({"code": 7});

        let text = PrettyPrinter::default().render(&event);
        assert!(text.contains(r#"]: [{"code":7}]"#));
    }

    #[test]
    fn test_custom_indent() {
        let text = PrettyPrinter::default().with_indent(2).render(&event());
        assert!(text.contains("\tcontext:\n\t  shard: 3"));
    }
}

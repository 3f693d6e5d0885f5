//! Logger configuration
//!
//! Resolved configuration as consumed by the logger. Loading it (files,
//! environment, command line) is left to the application; the struct
//! deserializes with serde and missing keys fall back to the defaults.
//!
//! ```
//! use chunked_event_logger::core::{LoggerConfig, LogLevel};
//!
//! let config: LoggerConfig = serde_json::from_str(
//!     r#"{ "level": "warn", "namespace_patterns": "api*,-api:health" }"#,
//! ).unwrap();
//!
//! assert_eq!(config.level, LogLevel::Warn);
//! assert_eq!(config.byte_limit, 7000);
//! ```

use super::chunking::flag_size;
use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default maximum encoded size of one output record, in bytes
pub const DEFAULT_BYTE_LIMIT: usize = 7000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Static context, exposed as the `context` key of every event
    pub context: Option<Value>,

    /// Application name, exposed as the `name` key of every event
    pub app_name: Option<String>,

    /// Severity threshold
    pub level: LogLevel,

    /// Maximum encoded record size; 0 disables chunking
    pub byte_limit: usize,

    /// Comma separated namespace patterns; `-` prefix excludes
    pub namespace_patterns: Option<String>,

    pub namespace: String,

    /// Regex matched against the encoded message; a match bypasses the filters
    pub flip_pattern: Option<String>,

    /// Encoder name (`graylog`, `prettyPrint`, ...); unknown names pass events through
    pub format: Option<String>,

    pub timestamp_format: TimestampFormat,

    /// Ambient field name -> top-level output key
    pub field_aliases: BTreeMap<String, String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            context: None,
            app_name: None,
            level: LogLevel::Error,
            byte_limit: DEFAULT_BYTE_LIMIT,
            namespace_patterns: None,
            namespace: String::new(),
            flip_pattern: None,
            format: None,
            timestamp_format: TimestampFormat::default(),
            field_aliases: BTreeMap::new(),
        }
    }
}

impl LoggerConfig {
    /// Static identity fields merged into every event
    pub fn static_context(&self) -> Fields {
        let mut fields = Fields::new();
        if let Some(context) = &self.context {
            fields.add_field("context", context.clone());
        }
        if let Some(name) = &self.app_name {
            fields.add_field("name", name.clone());
        }
        fields
    }

    /// Checks that do not depend on a particular event
    ///
    /// A non-zero byte limit must at least fit the chunk marker; whether it
    /// also fits a given header is only known per event.
    pub fn validate(&self) -> Result<()> {
        if self.byte_limit != 0 && self.byte_limit <= flag_size() {
            return Err(LoggerError::config(
                "byte_limit",
                format!(
                    "{} bytes cannot hold a chunk marker of {} bytes; use 0 to disable chunking",
                    self.byte_limit,
                    flag_size()
                ),
            ));
        }
        if let Some(pattern) = &self.flip_pattern {
            if pattern.is_empty() {
                return Err(LoggerError::config("flip_pattern", "pattern is empty"));
            }
        }
        Ok(())
    }
}

//! Log event structure

use super::fields::Fields;
use super::log_level::LogLevel;
use serde_json::{Map, Value};

/// The record produced for one log call
///
/// Built once per call by the serializer and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: Value,
    pub timestamp: String,
    pub namespace: String,
    /// Static identity data of the logger
    pub context: Fields,
    /// Fields of the current unit of work
    pub ambient: Fields,
    /// Per-call fields
    pub additional: Fields,
    /// Process uptime in seconds
    pub uptime: f64,
}

impl LogEvent {
    /// Flatten into one record
    ///
    /// Precedence, lowest first: ambient fields, per-call fields, static
    /// context, then `level`, `message`, `namespace`, `timestamp` and
    /// `uptime`, which always win on a key collision.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        self.ambient.merge_into(&mut record);
        self.additional.merge_into(&mut record);
        self.context.merge_into(&mut record);

        record.insert("level".to_string(), Value::String(self.level.to_str().to_string()));
        record.insert("message".to_string(), self.message.clone());
        record.insert("namespace".to_string(), Value::String(self.namespace.clone()));
        record.insert("timestamp".to_string(), Value::String(self.timestamp.clone()));
        record.insert("uptime".to_string(), uptime_value(self.uptime));
        record
    }

    /// Compact JSON text of the flattened record
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_record())
    }

    /// Message rendered as text: strings as-is, anything else as JSON
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn uptime_value(uptime: f64) -> Value {
    serde_json::Number::from_f64(uptime)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

//! Fluent construction of a single structured event

use super::error::Result;
use super::fields::Fields;
use super::log_level::LogLevel;
use super::logger::{Emission, Logger};
use serde::Serialize;
use serde_json::Value;

/// Builder for one log call with per-call fields
///
/// # Example
///
/// ```
/// use chunked_event_logger::prelude::*;
///
/// let sink = MemoryWriter::new();
/// let logger = Logger::builder()
///     .namespace_patterns("*")
///     .writer(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.event(LogLevel::Error)
///     .message("Request failed")
///     .field("status", 503)
///     .field("latency_ms", 42.5)
///     .emit();
///
/// assert_eq!(sink.values()[0]["status"], 503);
/// ```
pub struct EventBuilder<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: serde_json::Result<Value>,
    fields: Fields,
}

impl<'a> EventBuilder<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            message: Ok(Value::String(String::new())),
            fields: Fields::new(),
        }
    }

    /// Set the message; a serialization failure is reported on emit
    #[must_use]
    pub fn message<M: Serialize>(mut self, message: M) -> Self {
        self.message = serde_json::to_value(message);
        self
    }

    #[must_use]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.add_field(key, value);
        self
    }

    /// Add every field of `fields`; later keys replace earlier ones
    #[must_use]
    pub fn fields(mut self, fields: Fields) -> Self {
        for (key, value) in fields.iter() {
            self.fields.add_field(key.clone(), value.clone());
        }
        self
    }

    /// Set source location information
    #[must_use]
    pub fn location(self, file: &'static str, line: u32, module_path: &'static str) -> Self {
        self.field("file", file)
            .field("line", line)
            .field("module_path", module_path)
    }

    /// Emit and return the outcome
    pub fn try_emit(self) -> Result<Emission> {
        self.logger
            .try_emit_value(self.level, self.message, self.fields)
    }

    /// Emit, reporting failures on stderr
    pub fn emit(self) {
        let outcome = self
            .logger
            .try_emit_value(self.level, self.message, self.fields);
        self.logger.report(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::MemoryWriter;
    use crate::core::error::LoggerError;
    use serde::ser::{Error as _, Serializer};
    use serde_json::json;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("unencodable message"))
        }
    }

    fn logger(sink: &MemoryWriter) -> Logger {
        Logger::builder()
            .level(LogLevel::Debug)
            .namespace_patterns("*")
            .writer(sink.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_fields_reach_record() {
        let sink = MemoryWriter::new();
        let logger = logger(&sink);

        logger
            .event(LogLevel::Warn)
            .message(json!({"op": "sync"}))
            .field("retries", 2)
            .fields(Fields::new().with_field("peer", "10.0.0.7"))
            .emit();

        let record = &sink.values()[0];
        assert_eq!(record["message"], json!({"op": "sync"}));
        assert_eq!(record["retries"], 2);
        assert_eq!(record["peer"], "10.0.0.7");
        assert_eq!(record["level"], "warn");
    }

    #[test]
    fn test_location_fields() {
        let sink = MemoryWriter::new();
        let logger = logger(&sink);

        let outcome = logger
            .event(LogLevel::Debug)
            .message("here")
            .location("src/main.rs", 10, "app")
            .try_emit()
            .unwrap();

        assert_eq!(outcome.records(), 1);
        let record = &sink.values()[0];
        assert_eq!(record["file"], "src/main.rs");
        assert_eq!(record["line"], 10);
    }

    #[test]
    fn test_unserializable_message_is_an_error() {
        let sink = MemoryWriter::new();
        let logger = logger(&sink);

        let err = logger
            .event(LogLevel::Error)
            .message(Unencodable)
            .field("order_id", "o-18")
            .try_emit()
            .unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));

        let direct = logger.try_emit(LogLevel::Error, Unencodable, Fields::new());
        assert!(matches!(direct, Err(LoggerError::JsonError(_))));

        logger.event(LogLevel::Error).message(Unencodable).emit();
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().events_received(), 3);
    }
}

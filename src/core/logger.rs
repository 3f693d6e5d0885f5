//! Main logger implementation

use super::{
    ambient::{AmbientSource, TaskAmbient},
    config::LoggerConfig,
    error::{LoggerError, Result},
    event::LogEvent,
    event_builder::EventBuilder,
    extract::ExposeableField,
    fields::Fields,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    namespace::NamespaceMatcher,
    serializer::EventSerializer,
    timestamp::TimestampFormat,
    writer::{OutputRecord, RecordWriter},
};
use crate::formats::format_event;
use crate::writers::ConsoleWriter;
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Write collaborator shared by a logger and its children
pub type SharedWriter = Arc<Mutex<Box<dyn RecordWriter>>>;

/// Outcome of one log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Filtered out; the writer was not invoked
    Suppressed,
    /// Number of records handed to the writer (fragments count individually)
    Written { records: usize },
}

impl Emission {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Emission::Suppressed)
    }

    pub fn records(&self) -> usize {
        match self {
            Emission::Suppressed => 0,
            Emission::Written { records } => *records,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Emit,
    Flipped,
    Suppress,
}

struct LoggerInner {
    config: LoggerConfig,
    matcher: Arc<NamespaceMatcher>,
    flip: Option<Regex>,
    serializer: EventSerializer,
    writer: SharedWriter,
    metrics: Arc<LoggerMetrics>,
    ambient: Arc<dyn AmbientSource>,
}

/// Structured event logger
///
/// Cheap to clone; clones share configuration, writer and metrics.
///
/// # Example
///
/// ```
/// use chunked_event_logger::prelude::*;
///
/// let sink = MemoryWriter::new();
/// let logger = Logger::builder()
///     .level(LogLevel::Warn)
///     .namespace("api")
///     .namespace_patterns("api*")
///     .writer(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.debug("ignored");
/// logger.warn("disk almost full");
///
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a console logger from a resolved configuration
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new().config(config).build()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.inner.config
    }

    pub fn level(&self) -> LogLevel {
        self.inner.config.level
    }

    pub fn namespace(&self) -> &str {
        &self.inner.config.namespace
    }

    pub fn byte_limit(&self) -> usize {
        self.inner.config.byte_limit
    }

    pub fn context(&self) -> &Fields {
        self.inner.serializer.context()
    }

    /// Counters shared with every child of this logger
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Derive a logger for `name` below this one
    ///
    /// The child keeps the context, filters, format and writer of its parent
    /// and logs under `parent/name`, or `name` when the parent namespace is
    /// empty.
    pub fn child(&self, name: &str) -> Logger {
        let namespace = if self.inner.config.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.inner.config.namespace, name)
        };

        let mut config = self.inner.config.clone();
        config.namespace = namespace.clone();

        let serializer = EventSerializer::new(
            Arc::new(self.inner.serializer.context().clone()),
            namespace,
            config.timestamp_format,
            Arc::clone(&self.inner.ambient),
        );

        Logger {
            inner: Arc::new(LoggerInner {
                config,
                matcher: Arc::clone(&self.inner.matcher),
                flip: self.inner.flip.clone(),
                serializer,
                writer: Arc::clone(&self.inner.writer),
                metrics: Arc::clone(&self.inner.metrics),
                ambient: Arc::clone(&self.inner.ambient),
            }),
        }
    }

    /// Whether a call at `level` with this message would be written
    pub fn is_suppressed(&self, level: LogLevel, message: &Value) -> bool {
        self.decide(level, message) == Decision::Suppress
    }

    fn decide(&self, level: LogLevel, message: &Value) -> Decision {
        if let Some(flip) = &self.inner.flip {
            if flip.is_match(&message.to_string()) {
                return Decision::Flipped;
            }
        }

        if self.inner.config.level.allows(level)
            && self.inner.matcher.is_enabled(&self.inner.config.namespace)
        {
            Decision::Emit
        } else {
            Decision::Suppress
        }
    }

    /// Run the full pipeline for one call and report what happened
    ///
    /// Nothing is written when formatting fails, so a byte budget that
    /// cannot hold the header surfaces here as
    /// [`LoggerError::ByteBudgetUnderflow`].
    pub fn try_emit<M: Serialize>(
        &self,
        level: LogLevel,
        message: M,
        fields: Fields,
    ) -> Result<Emission> {
        self.try_emit_value(level, serde_json::to_value(message), fields)
    }

    /// Pipeline entry for a message that was converted ahead of time
    pub(crate) fn try_emit_value(
        &self,
        level: LogLevel,
        message: serde_json::Result<Value>,
        fields: Fields,
    ) -> Result<Emission> {
        let metrics = &self.inner.metrics;
        metrics.record_received();

        let message = message?;
        match self.decide(level, &message) {
            Decision::Suppress => {
                metrics.record_suppressed();
                return Ok(Emission::Suppressed);
            }
            Decision::Flipped => {
                metrics.record_flipped();
            }
            Decision::Emit => {}
        }

        let event = self.inner.serializer.serialize(message, fields, level);
        let exposed = self.exposed_fields(&event);

        let formatted = match format_event(
            &event,
            &exposed,
            self.inner.config.format.as_deref(),
            self.inner.config.byte_limit,
        ) {
            Ok(formatted) => formatted,
            Err(e) => {
                metrics.record_format_failure();
                return Err(e);
            }
        };

        if formatted.is_chunked() {
            metrics.record_chunked();
        }

        let records = self.write_records(&formatted.into_output())?;
        Ok(Emission::Written { records })
    }

    /// Ambient keys of this event, each under its configured alias
    fn exposed_fields(&self, event: &LogEvent) -> Vec<ExposeableField> {
        let aliases = &self.inner.config.field_aliases;
        event
            .ambient
            .keys()
            .map(|key| match aliases.get(key) {
                Some(alias) => ExposeableField::new(key.as_str()).with_alias(alias.as_str()),
                None => ExposeableField::new(key.as_str()),
            })
            .collect()
    }

    /// Hand records to the writer in order
    ///
    /// The writer lock is held for the whole sequence so fragments of one
    /// event are never interleaved with another event's records.
    fn write_records(&self, records: &[OutputRecord]) -> Result<usize> {
        let metrics = &self.inner.metrics;
        let mut writer = self.inner.writer.lock();
        let mut written = 0;

        for record in records {
            let result = catch_unwind(AssertUnwindSafe(|| writer.write(record)));

            match result {
                Ok(Ok(())) => {
                    metrics.record_written();
                    written += 1;
                }
                Ok(Err(e)) => {
                    metrics.record_write_failure();
                    return Err(e);
                }
                Err(panic_info) => {
                    metrics.record_write_failure();
                    return Err(LoggerError::writer(format!(
                        "writer '{}' panicked: {}",
                        writer.name(),
                        panic_message(panic_info.as_ref())
                    )));
                }
            }
        }

        Ok(written)
    }

    /// Emit and report failures on stderr instead of returning them
    pub fn emit<M: Serialize>(&self, level: LogLevel, message: M, fields: Fields) {
        self.report(self.try_emit(level, message, fields));
    }

    /// Print a failed emission on stderr
    pub(crate) fn report(&self, outcome: Result<Emission>) {
        if let Err(e) = outcome {
            match e {
                LoggerError::WriterError(_) => {
                    eprintln!("[LOGGER CRITICAL] Write failed for '{}': {}", self.namespace(), e)
                }
                other => {
                    eprintln!("[LOGGER ERROR] Event dropped for '{}': {}", self.namespace(), other)
                }
            }
        }
    }

    #[inline]
    pub fn log_at<M: Serialize>(&self, level: LogLevel, message: M) {
        self.emit(level, message, Fields::new());
    }

    /// Log with per-call fields
    #[inline]
    pub fn log_with_fields<M: Serialize>(&self, level: LogLevel, message: M, fields: Fields) {
        self.emit(level, message, fields);
    }

    #[inline]
    pub fn debug<M: Serialize>(&self, message: M) {
        self.emit(LogLevel::Debug, message, Fields::new());
    }

    #[inline]
    pub fn log<M: Serialize>(&self, message: M) {
        self.emit(LogLevel::Log, message, Fields::new());
    }

    /// Alias for [`Logger::log`]
    #[inline]
    pub fn info<M: Serialize>(&self, message: M) {
        self.emit(LogLevel::Log, message, Fields::new());
    }

    #[inline]
    pub fn warn<M: Serialize>(&self, message: M) {
        self.emit(LogLevel::Warn, message, Fields::new());
    }

    #[inline]
    pub fn error<M: Serialize>(&self, message: M) {
        self.emit(LogLevel::Error, message, Fields::new());
    }

    /// Start a structured event at `level`
    pub fn event(&self, level: LogLevel) -> EventBuilder<'_> {
        EventBuilder::new(self, level)
    }

    pub fn flush(&self) -> Result<()> {
        let mut writer = self.inner.writer.lock();
        match catch_unwind(AssertUnwindSafe(|| writer.flush())) {
            Ok(result) => result,
            Err(panic_info) => Err(LoggerError::writer(format!(
                "writer '{}' panicked during flush: {}",
                writer.name(),
                panic_message(panic_info.as_ref())
            ))),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        let config = LoggerConfig::default();
        let ambient: Arc<dyn AmbientSource> = Arc::new(TaskAmbient);
        let serializer = EventSerializer::new(
            Arc::new(config.static_context()),
            config.namespace.clone(),
            config.timestamp_format,
            Arc::clone(&ambient),
        );

        Logger {
            inner: Arc::new(LoggerInner {
                config,
                matcher: Arc::new(NamespaceMatcher::disabled()),
                flip: None,
                serializer,
                writer: Arc::new(Mutex::new(Box::new(ConsoleWriter::stdout()))),
                metrics: Arc::new(LoggerMetrics::new()),
                ambient,
            }),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.inner.config.namespace)
            .field("level", &self.inner.config.level)
            .field("byte_limit", &self.inner.config.byte_limit)
            .field("format", &self.inner.config.format)
            .finish()
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use chunked_event_logger::prelude::*;
/// use serde_json::json;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .app_name("billing")
///     .context(json!({"region": "eu-west-1"}))
///     .format("graylog")
///     .byte_limit(4096)
///     .expose_alias("request_id", "rid")
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.byte_limit(), 4096);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    writer: Option<Box<dyn RecordWriter>>,
    ambient: Option<Arc<dyn AmbientSource>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            writer: None,
            ambient: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Maximum encoded record size; 0 disables chunking
    #[must_use = "builder methods return a new value"]
    pub fn byte_limit(mut self, byte_limit: usize) -> Self {
        self.config.byte_limit = byte_limit;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Comma separated patterns, e.g. `api*,-api:health`
    #[must_use = "builder methods return a new value"]
    pub fn namespace_patterns(mut self, patterns: impl Into<String>) -> Self {
        self.config.namespace_patterns = Some(patterns.into());
        self
    }

    /// Messages matching `pattern` are written regardless of level and namespace
    #[must_use = "builder methods return a new value"]
    pub fn flip_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.flip_pattern = Some(pattern.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<Value>) -> Self {
        self.config.context = Some(context.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Expose ambient field `field` under the top-level key `alias`
    #[must_use = "builder methods return a new value"]
    pub fn expose_alias(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.config.field_aliases.insert(field.into(), alias.into());
        self
    }

    /// Write collaborator; stdout when not set
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: RecordWriter + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Ambient field source; the current tokio task when not set
    #[must_use = "builder methods return a new value"]
    pub fn ambient_source(mut self, source: Arc<dyn AmbientSource>) -> Self {
        self.ambient = Some(source);
        self
    }

    /// Validate the configuration and build the Logger
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        config.validate()?;

        let matcher = NamespaceMatcher::from_optional(config.namespace_patterns.as_deref())?;
        let flip = config
            .flip_pattern
            .as_deref()
            .map(|pattern| Regex::new(pattern).map_err(|e| LoggerError::pattern(pattern, e)))
            .transpose()?;

        let ambient = self.ambient.unwrap_or_else(|| Arc::new(TaskAmbient));
        let writer = self
            .writer
            .unwrap_or_else(|| Box::new(ConsoleWriter::stdout()));

        let serializer = EventSerializer::new(
            Arc::new(config.static_context()),
            config.namespace.clone(),
            config.timestamp_format,
            Arc::clone(&ambient),
        );

        Ok(Logger {
            inner: Arc::new(LoggerInner {
                config,
                matcher: Arc::new(matcher),
                flip,
                serializer,
                writer: Arc::new(Mutex::new(writer)),
                metrics: Arc::new(LoggerMetrics::new()),
                ambient,
            }),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

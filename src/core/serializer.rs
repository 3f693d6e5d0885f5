//! Event serializer: assembles a [`LogEvent`] from one log call

use super::ambient::AmbientSource;
use super::event::LogEvent;
use super::fields::Fields;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Mark the process start; the first call wins
///
/// Called when the first logger is built. Applications that want uptime
/// measured from `main` can call it themselves earlier.
pub fn mark_process_start() {
    PROCESS_START.get_or_init(Instant::now);
}

/// Seconds since [`mark_process_start`]
pub fn process_uptime() -> f64 {
    PROCESS_START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Builds events for one logger: static context and namespace are fixed,
/// ambient fields are read fresh on every call
#[derive(Clone)]
pub struct EventSerializer {
    context: Arc<Fields>,
    namespace: String,
    timestamp_format: TimestampFormat,
    ambient: Arc<dyn AmbientSource>,
}

impl EventSerializer {
    pub fn new(
        context: Arc<Fields>,
        namespace: impl Into<String>,
        timestamp_format: TimestampFormat,
        ambient: Arc<dyn AmbientSource>,
    ) -> Self {
        mark_process_start();
        Self {
            context,
            namespace: namespace.into(),
            timestamp_format,
            ambient,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn context(&self) -> &Fields {
        &self.context
    }

    /// Capture timestamp, uptime and ambient fields and assemble the event
    pub fn serialize(&self, message: Value, additional: Fields, level: LogLevel) -> LogEvent {
        LogEvent {
            level,
            message,
            timestamp: self.timestamp_format.now(),
            namespace: self.namespace.clone(),
            context: Fields::clone(&self.context),
            ambient: self.ambient.snapshot().fields().clone(),
            additional,
            uptime: process_uptime(),
        }
    }
}

impl std::fmt::Debug for EventSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSerializer")
            .field("context", &self.context)
            .field("namespace", &self.namespace)
            .field("timestamp_format", &self.timestamp_format)
            .finish_non_exhaustive()
    }
}

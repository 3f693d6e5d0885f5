//! # Chunked Event Logger
//!
//! Structured event logging with namespace filtering, task-scoped ambient
//! fields and byte-bounded output.
//!
//! ## Features
//!
//! - **Selective Output**: severity threshold plus wildcard namespace patterns,
//!   with a flip pattern that forces matching messages through
//! - **Ambient Fields**: per-task key/value store merged into every event
//! - **Chunking**: records larger than the byte limit are split into ordered
//!   fragments that reassemble to the original message
//! - **Pluggable Output**: graylog-style and pretty-printed encoders, any
//!   [`RecordWriter`] as the sink
//!
//! ## Example
//!
//! ```
//! use chunked_event_logger::prelude::*;
//!
//! let sink = MemoryWriter::new();
//! let logger = Logger::builder()
//!     .level(LogLevel::Log)
//!     .namespace("checkout")
//!     .namespace_patterns("checkout*")
//!     .format("graylog")
//!     .writer(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! ambient::sync_scope(AmbientFields::new().with_field("order_id", "o-991"), || {
//!     logger.info("order placed");
//! });
//!
//! let record = &sink.values()[0];
//! assert_eq!(record["order_id"], "o-991");
//! assert_eq!(record["log_message"], "order placed");
//! ```

pub mod core;
pub mod formats;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::ambient::{self, AmbientFields};
    pub use crate::core::{
        error_message, Emission, Fields, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, OutputRecord, RecordWriter, Result, TimestampFormat,
    };
    pub use crate::formats::OutputFormat;
    pub use crate::writers::{ConsoleWriter, MemoryWriter, StreamWriter};
}

pub use crate::core::{
    error_message, AmbientFields, Emission, EventBuilder, Fields, LogEvent, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputRecord, RecordWriter, Result,
    TimestampFormat,
};
pub use crate::formats::{format_event, FormattedRecord, OutputFormat};
pub use crate::writers::{ConsoleWriter, MemoryWriter, StreamWriter};

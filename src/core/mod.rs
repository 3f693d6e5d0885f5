//! Core logger types and traits

pub mod ambient;
pub mod chunking;
pub mod config;
pub mod current;
pub mod error;
pub mod event;
pub mod event_builder;
pub mod extract;
pub mod fields;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod namespace;
pub mod serializer;
pub mod timestamp;
pub mod writer;

pub use ambient::{AmbientFields, AmbientSource, TaskAmbient};
pub use chunking::{ChunkRecord, Encoded};
pub use config::{LoggerConfig, DEFAULT_BYTE_LIMIT};
pub use current::{current_logger, with_logger};
pub use error::{LoggerError, Result};
pub use event::LogEvent;
pub use event_builder::EventBuilder;
pub use extract::{extract_fields, ExposeableField};
pub use fields::{error_message, Fields};
pub use log_level::LogLevel;
pub use logger::{Emission, Logger, LoggerBuilder, SharedWriter};
pub use metrics::LoggerMetrics;
pub use namespace::NamespaceMatcher;
pub use serializer::EventSerializer;
pub use timestamp::TimestampFormat;
pub use writer::{OutputRecord, RecordWriter};

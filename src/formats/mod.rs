//! Output encoders and the format dispatcher
//!
//! Encoders are looked up by name in a fixed registry:
//! - `graylog`: structured record with byte-bounded chunking
//! - `prettyPrint`: human-readable text
//! - `prettyPrintColor`: human-readable text with coloured keys (`console` feature)
//!
//! An unknown or absent name passes the event through unchanged.

pub mod graylog;
pub mod pretty;

use crate::core::chunking::{ChunkRecord, Encoded};
use crate::core::extract::ExposeableField;
use crate::core::{LogEvent, OutputRecord, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub use graylog::graylog;
pub use pretty::PrettyPrinter;

/// Result of formatting one event
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedRecord {
    /// One structured record (also the pass-through shape)
    Record(Map<String, Value>),
    /// Ordered fragments of an oversized record
    Chunked(ChunkRecord),
    /// Rendered text
    Text(String),
}

impl FormattedRecord {
    pub fn is_chunked(&self) -> bool {
        matches!(self, FormattedRecord::Chunked(_))
    }

    /// Records to hand to the writer, in write order
    pub fn into_output(self) -> Vec<OutputRecord> {
        match self {
            FormattedRecord::Record(record) => vec![OutputRecord::Structured(record)],
            FormattedRecord::Chunked(chunks) => chunks
                .into_chunks()
                .into_iter()
                .map(OutputRecord::Encoded)
                .collect(),
            FormattedRecord::Text(text) => vec![OutputRecord::Text(text)],
        }
    }
}

impl From<Encoded> for FormattedRecord {
    fn from(encoded: Encoded) -> Self {
        match encoded {
            Encoded::Single(record) => FormattedRecord::Record(record),
            Encoded::Chunked(chunks) => FormattedRecord::Chunked(chunks),
        }
    }
}

/// Registered encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Graylog,
    PrettyPrint,
    #[cfg(feature = "console")]
    PrettyPrintColor,
}

impl OutputFormat {
    /// Registry lookup; `None` for names without an encoder
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "graylog" => Some(OutputFormat::Graylog),
            "prettyPrint" | "pretty_print" | "pretty" => Some(OutputFormat::PrettyPrint),
            #[cfg(feature = "console")]
            "prettyPrintColor" => Some(OutputFormat::PrettyPrintColor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Graylog => "graylog",
            OutputFormat::PrettyPrint => "prettyPrint",
            #[cfg(feature = "console")]
            OutputFormat::PrettyPrintColor => "prettyPrintColor",
        }
    }

    /// Encode `event` with this format
    pub fn format(
        &self,
        event: &LogEvent,
        fields_to_expose: &[ExposeableField],
        byte_limit: usize,
    ) -> Result<FormattedRecord> {
        match self {
            OutputFormat::Graylog => graylog(event, fields_to_expose, byte_limit),
            OutputFormat::PrettyPrint => Ok(FormattedRecord::Text(
                PrettyPrinter::default().render(event),
            )),
            #[cfg(feature = "console")]
            OutputFormat::PrettyPrintColor => Ok(FormattedRecord::Text(
                PrettyPrinter::default().with_colors(true).render(event),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("Unknown output format: '{}'", s))
    }
}

/// Format dispatcher
///
/// Looks `format_name` up in the registry; without an encoder the event is
/// returned unchanged as a structured record.
pub fn format_event(
    event: &LogEvent,
    fields_to_expose: &[ExposeableField],
    format_name: Option<&str>,
    byte_limit: usize,
) -> Result<FormattedRecord> {
    match format_name.and_then(OutputFormat::lookup) {
        Some(format) => format.format(event, fields_to_expose, byte_limit),
        None => Ok(FormattedRecord::Record(event.to_record())),
    }
}

//! Write collaborator for formatted records

use super::error::Result;
use serde_json::{Map, Value};

/// One unit handed to a writer: a whole record or a single chunk fragment
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord {
    /// Structured record
    Structured(Map<String, Value>),
    /// Already-encoded JSON document (chunk fragment)
    Encoded(String),
    /// Human-readable text
    Text(String),
}

impl OutputRecord {
    /// Text as it should appear on a line-oriented sink
    pub fn render(&self) -> Result<String> {
        match self {
            OutputRecord::Structured(record) => Ok(serde_json::to_string(record)?),
            OutputRecord::Encoded(text) | OutputRecord::Text(text) => Ok(text.clone()),
        }
    }

    /// Parsed JSON value; `None` for text records
    pub fn to_value(&self) -> Option<Value> {
        match self {
            OutputRecord::Structured(record) => Some(Value::Object(record.clone())),
            OutputRecord::Encoded(text) => serde_json::from_str(text).ok(),
            OutputRecord::Text(_) => None,
        }
    }
}

pub trait RecordWriter: Send {
    fn write(&mut self, record: &OutputRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

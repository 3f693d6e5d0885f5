//! Graylog-style structured encoder
//!
//! Output shape: the event's remaining fields (static context, per-call and
//! ambient fields, `namespace`, `uptime`), the exposed ambient fields, then
//! `log_level`, `log_timestamp` and `log_message`. Oversized messages are
//! split by the chunking encoder.

use super::FormattedRecord;
use crate::core::chunking;
use crate::core::extract::{extract_fields, ExposeableField};
use crate::core::{LogEvent, Result};
use serde_json::{Map, Value};

/// Encode `event` as a graylog record, chunked against `byte_limit`
pub fn graylog(
    event: &LogEvent,
    fields_to_expose: &[ExposeableField],
    byte_limit: usize,
) -> Result<FormattedRecord> {
    let record = event.to_record();
    let serialized = serde_json::to_string(&record)?;

    let mut header = Map::with_capacity(record.len());
    let (mut message, mut level, mut timestamp) = (Value::Null, Value::Null, Value::Null);
    for (key, value) in record {
        match key.as_str() {
            "message" => message = value,
            "level" => level = value,
            "timestamp" => timestamp = value,
            _ => {
                header.insert(key, value);
            }
        }
    }

    for (key, value) in extract_fields(&serialized, fields_to_expose)? {
        header.insert(key, value);
    }
    header.insert("log_level".to_string(), level);
    header.insert("log_timestamp".to_string(), timestamp);

    Ok(chunking::encode(header, message, byte_limit)?.into())
}

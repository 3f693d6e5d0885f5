//! Byte-bounded chunking of encoded messages
//!
//! A record whose encoded message does not fit the byte limit is split into
//! fragments. Every fragment repeats the header fields, carries a
//! `chunk: "i/n"` marker and holds one slice of the JSON encoding of the
//! message in `log_message`. Joining the `log_message` slices of all
//! fragments in index order gives back the encoded message byte for byte.
//!
//! Slice boundaries sit at multiples of the byte limit, moved back to the
//! nearest UTF-8 character boundary so every slice is valid text on its own.
//! Each fragment is itself a complete JSON document.

use super::error::{LoggerError, Result};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

/// Worst-case chunk marker used for sizing
pub const CHUNK_FLAG_SAMPLE: &str = "999/999";

const MESSAGE_KEY: &str = "log_message";
const CHUNK_KEY: &str = "chunk";
const PLACEHOLDER: &str = "@";

/// Output of the chunking encoder
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// Header plus `log_message` holding the original message value
    Single(Map<String, Value>),
    /// Ordered fragments
    Chunked(ChunkRecord),
}

/// `{ "chunked": true, "chunks": [ ... ] }`
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRecord {
    chunks: Vec<String>,
}

impl ChunkRecord {
    /// Encoded fragments, in order
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn into_chunks(self) -> Vec<String> {
        self.chunks
    }
}

impl Serialize for ChunkRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChunkRecord", 2)?;
        state.serialize_field("chunked", &true)?;
        state.serialize_field("chunks", &self.chunks)?;
        state.end()
    }
}

/// Sizes driving the split decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMeasure {
    pub flag_size: usize,
    pub header_size: usize,
    pub message_size: usize,
    pub buffer_size: usize,
    pub chunks: usize,
}

/// Encoded size of the worst-case chunk marker, `{"chunk":"999/999"}`
pub fn flag_size() -> usize {
    // {"chunk":"999/999"}
    CHUNK_KEY.len() + CHUNK_FLAG_SAMPLE.len() + 7
}

/// Measure `header` and `message` against `byte_limit`
///
/// Fails when the header and chunk marker leave no room for message bytes.
pub fn measure(header: &Map<String, Value>, message: &Value, byte_limit: usize) -> Result<ChunkMeasure> {
    let flag_size = flag_size();

    let mut placeholder_header = header.clone();
    placeholder_header.insert(MESSAGE_KEY.to_string(), Value::String(PLACEHOLDER.to_string()));
    let header_size = serde_json::to_vec(&placeholder_header)?.len();

    // The encoded message travels as a JSON string inside each fragment
    let encoded_message = serde_json::to_string(message)?;
    let message_size = serde_json::to_vec(&Value::String(encoded_message))?.len();

    let overhead = header_size + flag_size;
    if byte_limit <= overhead {
        return Err(LoggerError::byte_budget(byte_limit, header_size, flag_size));
    }
    let buffer_size = byte_limit - overhead;

    Ok(ChunkMeasure {
        flag_size,
        header_size,
        message_size,
        buffer_size,
        chunks: message_size.div_ceil(buffer_size).max(1),
    })
}

/// Encode `message` under `header`, splitting when it exceeds `byte_limit`
///
/// A `byte_limit` of zero disables chunking.
pub fn encode(header: Map<String, Value>, message: Value, byte_limit: usize) -> Result<Encoded> {
    if byte_limit == 0 {
        return Ok(Encoded::Single(single(header, message)));
    }

    let measure = measure(&header, &message, byte_limit)?;
    if measure.chunks == 1 {
        return Ok(Encoded::Single(single(header, message)));
    }

    let encoded_message = serde_json::to_string(&message)?;
    let slices = split_at_limit(&encoded_message, byte_limit, measure.chunks);

    let mut chunks = Vec::with_capacity(measure.chunks);
    for (idx, slice) in slices.into_iter().enumerate() {
        let mut fragment = header.clone();
        fragment.insert(MESSAGE_KEY.to_string(), Value::String(slice.to_string()));
        fragment.insert(
            CHUNK_KEY.to_string(),
            Value::String(format!("{}/{}", idx + 1, measure.chunks)),
        );
        chunks.push(serde_json::to_string(&fragment)?);
    }

    Ok(Encoded::Chunked(ChunkRecord { chunks }))
}

fn single(mut header: Map<String, Value>, message: Value) -> Map<String, Value> {
    header.insert(MESSAGE_KEY.to_string(), message);
    header
}

/// Cut `text` into `count` consecutive slices ending at multiples of
/// `limit`, each end moved back to a character boundary
///
/// Trailing slices are empty once the text is exhausted.
fn split_at_limit(text: &str, limit: usize, count: usize) -> Vec<&str> {
    let mut slices = Vec::with_capacity(count);
    let mut start = 0;

    for idx in 1..=count {
        let mut end = if idx == count {
            text.len()
        } else {
            idx.saturating_mul(limit).min(text.len())
        };
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let end = end.max(start);
        slices.push(&text[start..end]);
        start = end;
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header() -> Map<String, Value> {
        let mut header = Map::new();
        header.insert("name".to_string(), json!("api"));
        header.insert("log_level".to_string(), json!("error"));
        header.insert("log_timestamp".to_string(), json!("2025-01-08T10:30:45.123Z"));
        header
    }

    fn reassemble(record: &ChunkRecord) -> String {
        record
            .chunks()
            .iter()
            .map(|chunk| {
                let fragment: Value = serde_json::from_str(chunk).unwrap();
                fragment[MESSAGE_KEY].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_flag_size_matches_encoding() {
        let encoded = serde_json::to_string(&json!({ "chunk": CHUNK_FLAG_SAMPLE })).unwrap();
        assert_eq!(flag_size(), encoded.len());
    }

    #[test]
    fn test_zero_limit_never_chunks() {
        let message = json!("x".repeat(100_000));
        let encoded = encode(header(), message.clone(), 0).unwrap();

        match encoded {
            Encoded::Single(record) => assert_eq!(record[MESSAGE_KEY], message),
            Encoded::Chunked(_) => panic!("expected a single record"),
        }
    }

    #[test]
    fn test_small_message_stays_single() {
        let encoded = encode(header(), json!({"code": 7}), 7000).unwrap();

        match encoded {
            Encoded::Single(record) => {
                assert_eq!(record[MESSAGE_KEY], json!({"code": 7}));
                assert!(record.get(CHUNK_KEY).is_none());
            }
            Encoded::Chunked(_) => panic!("expected a single record"),
        }
    }

    #[test]
    fn test_large_message_reassembles() {
        let message = json!("lorem ipsum ".repeat(200));
        let byte_limit = 300;
        let measure = measure(&header(), &message, byte_limit).unwrap();
        assert!(measure.chunks > 1);

        let Encoded::Chunked(record) = encode(header(), message.clone(), byte_limit).unwrap() else {
            panic!("expected chunks");
        };

        assert_eq!(record.len(), measure.chunks);
        assert_eq!(reassemble(&record), serde_json::to_string(&message).unwrap());
    }

    #[test]
    fn test_fragments_carry_header_and_marker() {
        let message = json!("z".repeat(2_000));
        let Encoded::Chunked(record) = encode(header(), message, 200).unwrap() else {
            panic!("expected chunks");
        };

        let total = record.len();
        for (idx, chunk) in record.chunks().iter().enumerate() {
            let fragment: Value = serde_json::from_str(chunk).unwrap();
            assert_eq!(fragment["name"], "api");
            assert_eq!(fragment["log_level"], "error");
            assert_eq!(fragment[CHUNK_KEY], format!("{}/{}", idx + 1, total));
        }
    }

    #[test]
    fn test_multibyte_text_is_never_split() {
        let message = json!("héllo wörld ✓ ".repeat(100));
        let Encoded::Chunked(record) = encode(header(), message.clone(), 150).unwrap() else {
            panic!("expected chunks");
        };

        assert_eq!(reassemble(&record), serde_json::to_string(&message).unwrap());
    }

    #[test]
    fn test_structured_message_reassembles() {
        let message = json!({
            "items": (0..200).map(|i| json!({"id": i, "sku": format!("SKU-{i:05}")})).collect::<Vec<_>>()
        });
        let Encoded::Chunked(record) = encode(header(), message.clone(), 500).unwrap() else {
            panic!("expected chunks");
        };

        let text = reassemble(&record);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_underflowing_budget_fails_fast() {
        let err = encode(header(), json!("hello"), 40).unwrap_err();
        assert!(matches!(err, LoggerError::ByteBudgetUnderflow { byte_limit: 40, .. }));
    }

    #[test]
    fn test_chunk_record_serialization() {
        let record = ChunkRecord {
            chunks: vec!["{}".to_string()],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"chunked": true, "chunks": ["{}"]}));
    }

    #[test]
    fn test_split_at_limit() {
        let slices = split_at_limit("abcdefghij", 4, 5);
        assert_eq!(slices, vec!["abcd", "efgh", "ij", "", ""]);

        // 'é' is two bytes; a cut at byte 2 moves back to byte 1
        let slices = split_at_limit("aébc", 2, 3);
        assert_eq!(slices.concat(), "aébc");
        assert_eq!(slices[0], "a");
    }
}

//! Integration tests for the event logging pipeline
//!
//! These tests verify:
//! - Severity and namespace filtering
//! - Flip pattern overrides
//! - Chunked output and reassembly
//! - Child logger namespaces
//! - Format dispatch and identity fallback
//! - Configuration loading and file output

use chunked_event_logger::core::chunking::{self, Encoded};
use chunked_event_logger::prelude::*;
use serde_json::{json, Map, Value};
use std::fs;
use tempfile::TempDir;

fn reassemble(values: &[Value]) -> String {
    values
        .iter()
        .map(|fragment| fragment["log_message"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_threshold_warn_writes_two_records() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .level(LogLevel::Warn)
        .namespace_patterns("*")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.debug("debug");
    logger.log("log");
    logger.warn("warn");
    logger.error("error");

    let messages: Vec<Value> = sink.values().iter().map(|v| v["message"].clone()).collect();
    assert_eq!(messages, vec![json!("warn"), json!("error")]);
}

#[test]
fn test_excluded_namespace_is_disabled() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace("api:users")
        .namespace_patterns("api/*,-api:users")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    let outcome = logger
        .try_emit(LogLevel::Error, "lookup failed", Fields::new())
        .expect("Emission failed");

    assert_eq!(outcome, Emission::Suppressed);
    assert!(sink.is_empty());
}

#[test]
fn test_chunk_count_and_reassembly_at_50_bytes() {
    let message = json!("x".repeat(200));
    let measure = chunking::measure(&Map::new(), &message, 50).expect("Measure failed");
    let expected = measure.message_size.div_ceil(measure.buffer_size);

    let Encoded::Chunked(record) = chunking::encode(Map::new(), message.clone(), 50).expect("Encode failed")
    else {
        panic!("expected a chunked record");
    };

    assert_eq!(record.len(), expected);
    let fragments: Vec<Value> = record
        .chunks()
        .iter()
        .map(|chunk| serde_json::from_str(chunk).expect("Fragment is not JSON"))
        .collect();

    for (idx, fragment) in fragments.iter().enumerate() {
        assert_eq!(fragment["chunk"], format!("{}/{}", idx + 1, expected));
    }
    assert_eq!(reassemble(&fragments), serde_json::to_string(&message).unwrap());
}

#[test]
fn test_flip_pattern_forces_debug_through() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .level(LogLevel::Error)
        .flip_pattern("critical")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.debug("critical failure");
    logger.debug("all good");

    let values = sink.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["message"], "critical failure");
    assert_eq!(values[0]["level"], "debug");
}

#[test]
fn test_child_namespace_enabled_by_parent_wildcard() {
    let sink = MemoryWriter::new();
    let parent = Logger::builder()
        .namespace("svc")
        .namespace_patterns("svc/*")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");
    let child = parent.child("db");

    assert_eq!(child.namespace(), "svc/db");

    parent.error("parent event");
    child.error("child event");

    let namespaces: Vec<Value> = sink.values().iter().map(|v| v["namespace"].clone()).collect();
    assert_eq!(namespaces, vec![json!("svc"), json!("svc/db")]);
}

#[test]
fn test_chunked_fragments_written_in_order() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .byte_limit(400)
        .app_name("ingest")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    let payload = json!({
        "rows": (0..100).map(|i| json!({"id": i, "status": "ok"})).collect::<Vec<_>>()
    });
    let outcome = logger
        .try_emit(LogLevel::Error, payload.clone(), Fields::new())
        .expect("Emission failed");

    let values = sink.values();
    assert_eq!(values.len(), outcome.records());
    assert!(values.len() > 1);

    for (idx, fragment) in values.iter().enumerate() {
        assert_eq!(fragment["chunk"], format!("{}/{}", idx + 1, values.len()));
        assert_eq!(fragment["name"], "ingest");
        assert_eq!(fragment["log_level"], "error");
    }

    let text = reassemble(&values);
    let restored: Value = serde_json::from_str(&text).expect("Reassembled message is not JSON");
    assert_eq!(restored, payload);
}

#[test]
fn test_zero_byte_limit_never_chunks() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .byte_limit(0)
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.error("y".repeat(50_000));

    let values = sink.values();
    assert_eq!(values.len(), 1);
    assert!(values[0].get("chunk").is_none());
}

#[test]
fn test_underflowing_budget_reports_error() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .byte_limit(40)
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    let result = logger.try_emit(LogLevel::Error, "hello", Fields::new());

    assert!(matches!(result, Err(LoggerError::ByteBudgetUnderflow { .. })));
    assert!(sink.is_empty());
}

#[test]
fn test_unknown_format_passes_event_through() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("no-such-format")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.error(json!({"code": 500}));

    let record = &sink.values()[0];
    assert_eq!(record["message"], json!({"code": 500}));
    assert!(record.get("log_message").is_none());
}

#[test]
fn test_pretty_format_writes_text() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace("auth")
        .namespace_patterns("auth")
        .format("prettyPrint")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.error("token expired");

    let records = sink.records();
    let OutputRecord::Text(text) = &records[0] else {
        panic!("expected a text record");
    };
    assert!(text.contains("]: [token expired]"));
    assert!(text.contains("namespace: auth"));
}

#[test]
fn test_ambient_fields_exposed_by_graylog() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .expose_alias("trace_id", "trace")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    let fields = AmbientFields::new()
        .with_field("trace_id", "t-42")
        .with_field("tenant", "acme");
    ambient::sync_scope(fields, || logger.error("quota exceeded"));

    let record = &sink.values()[0];
    assert_eq!(record["trace"], "t-42");
    assert_eq!(record["tenant"], "acme");
    assert_eq!(record["log_message"], "quota exceeded");
}

#[test]
fn test_static_context_wins_over_call_fields() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .app_name("billing")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.log_with_fields(
        LogLevel::Error,
        "invoice failed",
        Fields::new().with_field("name", "spoofed").with_field("invoice", 7),
    );

    let record = &sink.values()[0];
    assert_eq!(record["name"], "billing");
    assert_eq!(record["invoice"], 7);
}

#[test]
fn test_error_message_value() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace_patterns("*")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    logger.error(error_message(&err));

    assert_eq!(sink.values()[0]["message"]["message"], "config.toml missing");
}

#[test]
fn test_logger_from_config() {
    let config: LoggerConfig = serde_json::from_value(json!({
        "level": "info",
        "namespace": "jobs",
        "namespace_patterns": "jobs",
        "byte_limit": 0
    }))
    .expect("Invalid config");

    let logger = Logger::from_config(config).expect("Failed to build logger");

    assert_eq!(logger.level(), LogLevel::Log);
    assert_eq!(logger.byte_limit(), 0);
    assert!(!logger.is_suppressed(LogLevel::Log, &json!("tick")));
    assert!(logger.is_suppressed(LogLevel::Debug, &json!("tick")));
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("events.jsonl");

    let writer = StreamWriter::file(&log_file).expect("Failed to open log file");
    let logger = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .writer(writer)
        .build()
        .expect("Failed to build logger");

    logger.error("first");
    logger.error("second");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Line is not JSON"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["log_message"], "first");
    assert_eq!(lines[1]["log_message"], "second");
}

#[test]
fn test_metrics_track_pipeline() {
    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .level(LogLevel::Warn)
        .namespace_patterns("*")
        .writer(sink.clone())
        .build()
        .expect("Failed to build logger");

    logger.debug("dropped");
    logger.warn("kept");
    logger.child("worker").error("kept too");

    let metrics = logger.metrics();
    assert_eq!(metrics.events_received(), 3);
    assert_eq!(metrics.events_suppressed(), 1);
    assert_eq!(metrics.records_written(), 2);
}

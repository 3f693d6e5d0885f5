//! Chunked output example
//!
//! Demonstrates how an oversized message is split into fragments and how
//! the fragments are put back together.
//!
//! Run with: cargo run --example chunked_output

use chunked_event_logger::prelude::*;
use serde_json::{json, Value};

fn main() -> Result<()> {
    println!("=== Chunked Event Logger - Chunked Output Example ===\n");

    let sink = MemoryWriter::new();
    let logger = Logger::builder()
        .namespace("export")
        .namespace_patterns("export")
        .format("graylog")
        .byte_limit(256)
        .app_name("chunked-output")
        .writer(sink.clone())
        .build()?;

    let report = json!({
        "rows": (0..20).map(|i| json!({"id": i, "status": "exported"})).collect::<Vec<_>>()
    });
    let outcome = logger.try_emit(LogLevel::Error, &report, Fields::new())?;
    println!("1. Large message written as {} fragments:", outcome.records());

    let fragments = sink.values();
    for fragment in &fragments {
        println!("   {}", fragment);
    }

    println!("\n2. Reassembling the message:");
    let text: String = fragments
        .iter()
        .filter_map(|fragment| fragment["log_message"].as_str())
        .collect();
    let restored: Value = serde_json::from_str(&text)?;
    println!("   Restored {} rows, identical: {}", restored["rows"].as_array().map_or(0, Vec::len), restored == report);

    println!("\n3. A byte limit too small for the header is rejected:");
    let tight = Logger::builder()
        .namespace_patterns("*")
        .format("graylog")
        .byte_limit(32)
        .writer(MemoryWriter::new())
        .build()?;
    match tight.try_emit(LogLevel::Error, "hello", Fields::new()) {
        Ok(outcome) => println!("   Unexpected: {:?}", outcome),
        Err(e) => println!("   Error: {}", e),
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

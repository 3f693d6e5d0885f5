//! Ambient field example
//!
//! Demonstrates task-scoped fields: every request handler gets its own
//! request id, and every event logged while handling it carries that id.
//!
//! Run with: cargo run --example ambient_fields

use chunked_event_logger::core::current::{current_logger, with_logger};
use chunked_event_logger::prelude::*;
use std::time::Duration;

async fn handle_request(id: u32) {
    let logger = current_logger();
    logger.log(format!("Handling request {id}"));

    ambient::set_field("stage", "auth").ok();
    tokio::time::sleep(Duration::from_millis(5 * u64::from(id))).await;
    logger.log("Authenticated");

    // The audit task sees the fields as they are right now
    let audit = ambient::spawn(async move {
        current_logger().warn("Audit record stored");
    });

    ambient::set_field("stage", "respond").ok();
    logger.log("Responded");

    audit.await.ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Chunked Event Logger - Ambient Fields Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Log)
        .namespace("gateway")
        .namespace_patterns("gateway*")
        .format("graylog")
        .expose_alias("request_id", "rid")
        .build()?;

    let mut handles = Vec::new();
    for id in 1..=3 {
        let logger = logger.child("http");
        let fields = AmbientFields::new().with_field("request_id", format!("req-{id}"));
        handles.push(tokio::spawn(ambient::scope(
            fields,
            with_logger(logger, handle_request(id)),
        )));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            eprintln!("Request task failed: {e}");
        }
    }

    // Outside any scope there are no ambient fields
    logger.log("All requests handled");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

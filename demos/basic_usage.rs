//! Basic logger usage example
//!
//! Demonstrates severity and namespace filtering, child loggers and the
//! available output formats.
//!
//! Run with: cargo run --example basic_usage

use chunked_event_logger::prelude::*;
use chunked_event_logger::warn;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Chunked Event Logger - Basic Usage Example ===\n");

    // Plain console logger; unknown format passes events through as JSON
    let logger = Logger::builder()
        .level(LogLevel::Log)
        .namespace("shop")
        .namespace_patterns("shop*,-shop/metrics")
        .app_name("basic-usage")
        .build()?;

    println!("1. Logging at different levels (threshold: log):");
    logger.debug("This is a debug message (hidden)");
    logger.log("This is a log message");
    logger.info("This is an info message, same severity as log");
    logger.warn("This is a warning message");
    logger.error(json!({"code": "E_TIMEOUT", "elapsed_ms": 5012}));

    println!("\n2. Child loggers and namespace exclusion:");
    let orders = logger.child("orders");
    let metrics = logger.child("metrics");
    orders.log("Order o-17 placed (visible, shop/orders)");
    metrics.error("Queue depth 12 (hidden, shop/metrics is excluded)");

    println!("\n3. Per-call fields and the event builder:");
    logger.log_with_fields(
        LogLevel::Warn,
        "Stock running low",
        Fields::new().with_field("sku", "A-113").with_field("left", 3),
    );
    orders
        .event(LogLevel::Error)
        .message("Payment declined")
        .field("order_id", "o-18")
        .emit();

    println!("\n4. Formatting macros:");
    let retries = 3;
    warn!(logger, "Upstream flaky, retried {} times", retries);

    println!("\n5. Pretty-printed output:");
    let pretty = Logger::builder()
        .level(LogLevel::Debug)
        .namespace("shop")
        .namespace_patterns("shop")
        .format("prettyPrint")
        .build()?;
    pretty.debug(json!({"cart": {"items": 2, "total": 41.5}}));

    println!("\nEvents received: {}", logger.metrics().events_received());
    println!("Events suppressed: {}", logger.metrics().events_suppressed());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

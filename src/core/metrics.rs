//! Logger metrics for observability
//!
//! Counters shared by a logger and every child created from it.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use chunked_event_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_received();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.events_received(), 1);
/// assert_eq!(metrics.suppression_rate(), 100.0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Log calls seen, suppressed or not
    events_received: AtomicU64,

    /// Calls filtered out by severity or namespace
    events_suppressed: AtomicU64,

    /// Calls emitted only because the flip pattern matched
    events_flipped: AtomicU64,

    /// Records and fragments handed to the writer successfully
    records_written: AtomicU64,

    /// Events that were split into fragments
    chunked_events: AtomicU64,

    /// Writer errors and panics
    write_failures: AtomicU64,

    /// Events that could not be formatted (e.g. byte budget underflow)
    format_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            events_received: AtomicU64::new(0),
            events_suppressed: AtomicU64::new(0),
            events_flipped: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            chunked_events: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            format_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_received(&self) -> u64 {
        self.events_received.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_suppressed(&self) -> u64 {
        self.events_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_flipped(&self) -> u64 {
        self.events_flipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn chunked_events(&self) -> u64 {
        self.chunked_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn format_failures(&self) -> u64 {
        self.format_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_received(&self) -> u64 {
        self.events_received.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.events_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flipped(&self) -> u64 {
        self.events_flipped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_chunked(&self) -> u64 {
        self.chunked_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_format_failure(&self) -> u64 {
        self.format_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of received events that were suppressed, as a percentage
    ///
    /// Returns 0.0 if nothing has been received.
    pub fn suppression_rate(&self) -> f64 {
        let received = self.events_received() as f64;
        if received == 0.0 {
            0.0
        } else {
            (self.events_suppressed() as f64 / received) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.events_received.store(0, Ordering::Relaxed);
        self.events_suppressed.store(0, Ordering::Relaxed);
        self.events_flipped.store(0, Ordering::Relaxed);
        self.records_written.store(0, Ordering::Relaxed);
        self.chunked_events.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.format_failures.store(0, Ordering::Relaxed);
    }
}

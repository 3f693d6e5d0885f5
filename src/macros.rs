//! Logging macros with `format!`-style arguments.
//!
//! The formatted text becomes the event message.
//!
//! # Examples
//!
//! ```
//! use chunked_event_logger::prelude::*;
//! use chunked_event_logger::error;
//!
//! let sink = MemoryWriter::new();
//! let logger = Logger::builder()
//!     .namespace_patterns("*")
//!     .writer(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! let port = 8080;
//! error!(logger, "Bind failed on port {}", port);
//!
//! assert_eq!(sink.values()[0]["message"], "Bind failed on port 8080");
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use chunked_event_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use chunked_event_logger::log;
/// log!(logger, LogLevel::Log, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a `log`-level message.
///
/// ```
/// # use chunked_event_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use chunked_event_logger::info;
/// info!(logger, "Cache warmed in {}ms", 12);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Log, $($arg)+)
    };
}

/// Log a warn-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

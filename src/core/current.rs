//! Task-scoped "current logger"
//!
//! Optional convenience for code that cannot have a logger passed in.
//! Loggers should normally be handed around explicitly; this helper only
//! recovers one installed further up the same task.
//!
//! ```
//! use chunked_event_logger::core::current::{current_logger, sync_with_logger};
//! use chunked_event_logger::Logger;
//!
//! let logger = Logger::builder().namespace("jobs").build().unwrap();
//!
//! sync_with_logger(logger, || {
//!     assert_eq!(current_logger().namespace(), "jobs");
//! });
//! assert_eq!(current_logger().namespace(), "");
//! ```

use super::logger::Logger;
use std::future::Future;
use std::sync::OnceLock;

tokio::task_local! {
    static CURRENT_LOGGER: Logger;
}

static FALLBACK: OnceLock<Logger> = OnceLock::new();

/// Run `fut` with `logger` installed as the current logger
pub async fn with_logger<F>(logger: Logger, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_LOGGER.scope(logger, fut).await
}

/// Run `f` with `logger` installed as the current logger
pub fn sync_with_logger<F, R>(logger: Logger, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT_LOGGER.sync_scope(logger, f)
}

/// The logger installed for this task, if any
pub fn try_current_logger() -> Option<Logger> {
    CURRENT_LOGGER.try_with(Logger::clone).ok()
}

/// The logger installed for this task, or a process-wide default logger
pub fn current_logger() -> Logger {
    try_current_logger().unwrap_or_else(|| FALLBACK.get_or_init(Logger::default).clone())
}

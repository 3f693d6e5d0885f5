//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Byte limit leaves no room for a message slice once the header and
    /// chunk marker are accounted for
    #[error(
        "Byte limit {byte_limit} is too small for chunked output: \
         header uses {header_size} bytes and chunk marker {flag_size} bytes"
    )]
    ByteBudgetUnderflow {
        byte_limit: usize,
        header_size: usize,
        flag_size: usize,
    },

    /// Pattern that failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Ambient field mutation outside of an ambient scope
    #[error("No ambient scope is active for the current task")]
    NoAmbientScope,

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a byte budget underflow error
    pub fn byte_budget(byte_limit: usize, header_size: usize, flag_size: usize) -> Self {
        LoggerError::ByteBudgetUnderflow {
            byte_limit,
            header_size,
            flag_size,
        }
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error comes from the logger configuration rather than
    /// from a particular call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidConfiguration { .. }
                | LoggerError::ByteBudgetUnderflow { .. }
                | LoggerError::InvalidPattern { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerBuilder", "byte limit too small");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::byte_budget(50, 40, 19);
        assert!(matches!(err, LoggerError::ByteBudgetUnderflow { .. }));

        let err = LoggerError::writer("sink closed");
        assert!(matches!(err, LoggerError::WriterError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::byte_budget(50, 40, 19);
        assert_eq!(
            err.to_string(),
            "Byte limit 50 is too small for chunked output: \
             header uses 40 bytes and chunk marker 19 bytes"
        );
    }

    #[test]
    fn test_pattern_error() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = LoggerError::pattern("(unclosed", source);

        assert!(err.to_string().starts_with("Invalid pattern '(unclosed'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(LoggerError::byte_budget(10, 30, 19).is_configuration());
        assert!(LoggerError::config("x", "y").is_configuration());
        assert!(!LoggerError::NoAmbientScope.is_configuration());
        assert!(!LoggerError::writer("closed").is_configuration());
    }
}

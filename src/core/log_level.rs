//! Log level definitions and the severity filter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event severity, ordered `Debug < Log < Warn < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    #[serde(alias = "info")]
    Log = 1,
    #[serde(alias = "warning")]
    Warn = 2,
    #[default]
    Error = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Log, LogLevel::Warn, LogLevel::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Log => "log",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Position in the severity order (0..=3)
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether a logger with this level as threshold emits `requested`
    #[inline]
    pub fn allows(&self, requested: LogLevel) -> bool {
        allows(*self, requested)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Log => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

/// Severity filter: `requested` passes when it ranks at or above `threshold`
#[inline]
pub fn allows(threshold: LogLevel, requested: LogLevel) -> bool {
    requested.rank() >= threshold.rank()
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "log" | "info" => Ok(LogLevel::Log),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Tracing filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "luatile=trace",
            LogLevel::Debug => "luatile=debug",
            LogLevel::Info => "luatile=info",
            LogLevel::Warning => "luatile=warn",
            LogLevel::Error => "luatile=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

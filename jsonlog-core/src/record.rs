//! ## jsonlog-core::record
//! **Single-line JSON log records**
//!
//! A record is never stored; it only exists as the line handed to a sink:
//!
//! ```text
//! {"time": "2024-01-02T15:04:05.123456789Z", "level": "info", "message": "text"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::verbosity::Severity;

/// Level written into the `level` field. Panic has no [`Severity`] of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// Severity compared against the logger's minimum, or `None` for levels
    /// that are emitted unconditionally.
    pub const fn gate(self) -> Option<Severity> {
        match self {
            Level::Debug => Some(Severity::Debug),
            Level::Info => Some(Severity::Info),
            Level::Warn => Some(Severity::Warn),
            Level::Error => Some(Severity::Err),
            Level::Panic | Level::Fatal => None,
        }
    }

    /// Records at this level go to the error sink.
    pub const fn is_error(self) -> bool {
        matches!(self, Level::Error | Level::Panic | Level::Fatal)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Record stamped with the current time.
    pub fn now(level: Level, message: &'a str) -> Self {
        Self {
            time: Utc::now(),
            level,
            message,
        }
    }

    /// Serializes the record, trailing newline included.
    pub fn to_line(&self) -> String {
        let message = Value::String(self.message.to_owned()).to_string();
        let time = self.time.to_rfc3339_opts(SecondsFormat::Nanos, true);

        let mut line = String::with_capacity(48 + time.len() + message.len());
        line.push_str("{\"time\": \"");
        line.push_str(&time);
        line.push_str("\", \"level\": \"");
        line.push_str(self.level.as_str());
        line.push_str("\", \"message\": ");
        line.push_str(&message);
        line.push_str("}\n");
        line
    }
}

use serde::{Deserialize, Serialize};

use crate::verbosity::Severity;

/// Construction-time logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Prepended to every message.
    #[serde(default)]
    pub prefix: String,

    /// Minimum severity that gets emitted.
    #[serde(default = "default_verbosity")]
    pub verbosity: Severity,
}

fn default_verbosity() -> Severity {
    Severity::Info
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            verbosity: default_verbosity(),
        }
    }
}

impl LoggerConfig {
    pub fn new(prefix: impl Into<String>, verbosity: Severity) -> Self {
        Self {
            prefix: prefix.into(),
            verbosity,
        }
    }
}

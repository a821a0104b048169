//! Errors raised while loading logger settings

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("Logger configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid logger configuration:\n{}", describe(.0))]
    Validation(#[source] ValidationErrors),

    /// Malformed YAML/env input, or a verbosity ordinal outside 0-4.
    #[error("Logger configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

fn describe(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures {
            let reason = failure
                .message
                .as_ref()
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| failure.code.to_string());
            lines.push(format!("  {}: {}", field, reason));
        }
    }
    lines.join("\n")
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

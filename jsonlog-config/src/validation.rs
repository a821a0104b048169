//! Custom validation functions for logger settings.

use validator::ValidationError;

/// Prefixes end up inside every record, so they must stay on one line.
pub fn validate_single_line(prefix: &str) -> Result<(), ValidationError> {
    if prefix.contains(|c: char| c == '\n' || c == '\r') {
        return Err(ValidationError::new("multiline_prefix")
            .with_message("prefix must not contain line breaks".into()));
    }
    Ok(())
}

//! Process-wide logger handle.
//!
//! Prefer passing a [`Logger`] explicitly. When ambient access is unavoidable,
//! call [`init`] once at startup, read it back with [`get`], and call
//! [`shutdown`] before the process exits. The handle cannot be replaced once set.

use once_cell::sync::OnceCell;

use crate::error::LogError;
use crate::logger::Logger;

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Installs `logger` as the process-wide handle.
pub fn init(logger: Logger) -> Result<&'static Logger, LogError> {
    GLOBAL
        .try_insert(logger)
        .map_err(|_| LogError::AlreadyInitialized)
}

pub fn get() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Shuts down the process-wide logger, if one was installed.
pub fn shutdown() -> Result<(), LogError> {
    match GLOBAL.get() {
        Some(logger) => logger.shutdown(),
        None => Ok(()),
    }
}

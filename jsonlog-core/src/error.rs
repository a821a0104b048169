use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to shut down {sink} sink: {source}")]
    Shutdown {
        sink: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Global logger already initialized")]
    AlreadyInitialized,
}

/// Unwind payload raised by [`Logger::panic`](crate::Logger::panic).
///
/// Recover it with `std::panic::catch_unwind` and `downcast_ref::<LoggedPanic>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoggedPanic {
    /// Prefixed, formatted message (unescaped).
    pub message: String,
}

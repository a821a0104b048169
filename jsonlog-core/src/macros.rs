//! Formatting shorthands: `info!(logger, "listening on {}", addr)`.

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! err {
    ($logger:expr, $($arg:tt)+) => {
        $logger.err(::std::format_args!($($arg)+))
    };
}

/// Logs at panic level, then unwinds with a [`LoggedPanic`](crate::LoggedPanic).
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(::std::format_args!($($arg)+))
    };
}

/// Logs at fatal level, then terminates the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}

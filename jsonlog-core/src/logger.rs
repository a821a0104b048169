//! ## jsonlog-core::logger
//! **Level-filtering JSON logger**
//!
//! Debug, info and warn records go to the standard sink; error, panic and
//! fatal records go to the error sink. Panic and fatal are never filtered.
//!
//! ### Expectations:
//! - Synchronous, one write per emitted record
//! - Minimum severity changes apply from the next call on
//! - `Send + Sync`, so one instance can be shared across threads

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::LoggerConfig;
use crate::error::{LogError, LoggedPanic};
use crate::record::{Level, LogRecord};
use crate::sink::{Sink, StreamSink};
use crate::verbosity::{parse_severity, Severity};

/// Leveled logging surface.
///
/// [`Logger`] is the JSON-line implementation. Code that only emits records can
/// take `&dyn Log` and be handed a test double instead.
pub trait Log: Send + Sync {
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn err(&self, args: fmt::Arguments<'_>);
    /// Must not return normally.
    fn panic(&self, args: fmt::Arguments<'_>) -> !;
    fn fatal(&self, args: fmt::Arguments<'_>) -> !;
    fn set_verbosity(&self, name: &str);
    fn shutdown(&self) -> Result<(), LogError>;
}

/// Process termination used by [`Logger::fatal`].
pub type ExitHook = fn(i32) -> !;

fn exit_process(code: i32) -> ! {
    std::process::exit(code)
}

pub struct Logger {
    out: Box<dyn Sink>,
    err: Box<dyn Sink>,
    verbosity: AtomicU8,
    prefix: String,
    exit: ExitHook,
}

impl Logger {
    /// Logger writing to stdout and stderr. `None` means `LoggerConfig::default()`.
    pub fn new(config: Option<LoggerConfig>) -> Self {
        Self::with_sinks(config, StreamSink::stdout(), StreamSink::stderr())
    }

    pub fn with_sinks(
        config: Option<LoggerConfig>,
        out: impl Sink + 'static,
        err: impl Sink + 'static,
    ) -> Self {
        let config = config.unwrap_or_default();
        Self {
            out: Box::new(out),
            err: Box::new(err),
            verbosity: AtomicU8::new(config.verbosity.ordinal()),
            prefix: config.prefix,
            exit: exit_process,
        }
    }

    /// Replaces the termination performed after a fatal record.
    pub fn with_exit_hook(mut self, exit: ExitHook) -> Self {
        self.exit = exit;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn verbosity(&self) -> Severity {
        // Only ordinals of valid severities are ever stored.
        Severity::from_ordinal(self.verbosity.load(Ordering::Relaxed)).unwrap_or(Severity::Warn)
    }

    /// Sets the minimum severity from its name. Unknown names select `Warn`.
    pub fn set_verbosity(&self, name: &str) {
        if Severity::from_name(name).is_none() {
            tracing::debug!(verbosity = name, "unrecognized verbosity name, falling back to warn");
        }
        self.set_severity(parse_severity(name));
    }

    pub fn set_severity(&self, severity: Severity) {
        let previous = self.verbosity.swap(severity.ordinal(), Ordering::Relaxed);
        tracing::trace!(previous, current = severity.ordinal(), "verbosity changed");
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.verbosity()
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn err(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Writes a panic record, then unwinds with a [`LoggedPanic`] payload.
    pub fn panic(&self, args: fmt::Arguments<'_>) -> ! {
        let message = self.format_message(args);
        self.write(Level::Panic, &message);
        std::panic::panic_any(LoggedPanic { message })
    }

    /// Writes a fatal record, then terminates the process with status 1.
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        let message = self.format_message(args);
        self.write(Level::Fatal, &message);
        if let Err(error) = self.err.flush() {
            tracing::warn!(%error, "failed to flush error sink before exit");
        }
        (self.exit)(1)
    }

    /// Shuts down both sinks, reporting the first failure.
    pub fn shutdown(&self) -> Result<(), LogError> {
        let out = self.out.shutdown().map_err(|source| LogError::Shutdown {
            sink: "standard",
            source,
        });
        let err = self.err.shutdown().map_err(|source| LogError::Shutdown {
            sink: "error",
            source,
        });
        out.and(err)
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if let Some(severity) = level.gate() {
            if !self.enabled(severity) {
                return;
            }
        }
        let message = self.format_message(args);
        self.write(level, &message);
    }

    fn format_message(&self, args: fmt::Arguments<'_>) -> String {
        format!("{}{}", self.prefix, args)
    }

    fn write(&self, level: Level, message: &str) {
        let line = LogRecord::now(level, message).to_line();
        let sink = if level.is_error() { &self.err } else { &self.out };
        if let Err(error) = sink.write_line(&line) {
            tracing::warn!(level = level.as_str(), %error, "failed to write log record");
        }
    }
}

impl Log for Logger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        Logger::debug(self, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        Logger::info(self, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        Logger::warn(self, args)
    }

    fn err(&self, args: fmt::Arguments<'_>) {
        Logger::err(self, args)
    }

    fn panic(&self, args: fmt::Arguments<'_>) -> ! {
        Logger::panic(self, args)
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        Logger::fatal(self, args)
    }

    fn set_verbosity(&self, name: &str) {
        Logger::set_verbosity(self, name)
    }

    fn shutdown(&self) -> Result<(), LogError> {
        Logger::shutdown(self)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("verbosity", &self.verbosity())
            .finish_non_exhaustive()
    }
}

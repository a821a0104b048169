//! # jsonlog-core
//!
//! Leveled logger that writes one JSON object per line:
//!
//! ```text
//! {"time": "2024-01-02T15:04:05.123456789Z", "level": "info", "message": "text"}
//! ```
//!
//! ## Components
//! - `verbosity`: ordered [`Severity`] scale and [`parse_severity`]
//! - `logger`: [`Log`] trait and its [`Logger`] implementation, one method per
//!   level plus `set_verbosity`/`shutdown`
//! - `sink`: [`Sink`] trait, stdout/stderr [`StreamSink`] and [`MemorySink`]
//! - `global`: optional process-wide handle
//!
//! ```
//! use jsonlog_core::{info, Logger, LoggerConfig, MemorySink, Severity};
//!
//! let out = MemorySink::new();
//! let logger = Logger::with_sinks(
//!     Some(LoggerConfig::new("api: ", Severity::Debug)),
//!     out.clone(),
//!     MemorySink::new(),
//! );
//! info!(logger, "started in {}ms", 12);
//! assert!(out.contents().contains("\"message\": \"api: started in 12ms\""));
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod error;
pub mod global;
mod logger;
mod macros;
pub mod record;
pub mod sink;
pub mod verbosity;

pub use config::LoggerConfig;
pub use error::{LogError, LoggedPanic};
pub use logger::{ExitHook, Log, Logger};
pub use record::{Level, LogRecord};
pub use sink::{MemorySink, Sink, StreamSink};
pub use verbosity::{parse_severity, Severity};

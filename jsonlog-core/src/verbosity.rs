//! ## jsonlog-core::verbosity
//! **Ordered severity scale and name parser**
//!
//! `Debug < Info < Warn < Err < Fatal`. A lower ordinal is more verbose, so a
//! logger configured at some minimum emits every record at or above it.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log record, also used as a logger's minimum verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Err = 3,
    Fatal = 4,
}

impl Severity {
    /// Every severity, most verbose first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Err,
        Severity::Fatal,
    ];

    /// The symbolic name accepted by [`parse_severity`].
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Err => "err",
            Severity::Fatal => "fatal",
        }
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Severity> {
        match ordinal {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Err),
            4 => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// Strict lookup: `None` when `name` is not one of the five symbolic names.
    pub fn from_name(name: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.name().eq_ignore_ascii_case(name))
    }
}

/// Resolves a verbosity name, case-insensitively.
///
/// Anything that is not `debug`, `info`, `warn`, `err` or `fatal` resolves to
/// [`Severity::Warn`]. The function never fails.
pub fn parse_severity(name: &str) -> Severity {
    Severity::from_name(name).unwrap_or(Severity::Warn)
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, std::convert::Infallible> {
        Ok(parse_severity(s))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// Accepts either the ordinal (0-4) or a symbolic name.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeverityVisitor)
    }
}

struct SeverityVisitor;

impl Visitor<'_> for SeverityVisitor {
    type Value = Severity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a severity ordinal between 0 and 4 or a severity name")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
        u8::try_from(v)
            .ok()
            .and_then(Severity::from_ordinal)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
        u8::try_from(v)
            .ok()
            .and_then(Severity::from_ordinal)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
        Ok(parse_severity(v))
    }
}

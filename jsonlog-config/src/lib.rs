//! # jsonlog Configuration
//!
//! Layered loading of logger settings (`prefix`, `verbosity`).
//!
//! ## Hierarchy
//! 1. Defaults (`prefix: ""`, `verbosity: info`)
//! 2. `config/jsonlog.yaml`, if present
//! 3. `config/<JSONLOG_ENV>.yaml`, if present (`JSONLOG_ENV` defaults to `production`)
//! 4. `JSONLOG_*` environment variables (`JSONLOG_PREFIX`, `JSONLOG_VERBOSITY`)
//!
//! `verbosity` accepts an ordinal (0-4) or a name; unknown names resolve to `warn`.
//! `JSONLOG_PREFIX` is taken verbatim: no trimming, no number/bool parsing.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use jsonlog_core::{LoggerConfig, Severity};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod validation;

pub use error::ConfigError;

pub const CONFIG_FILE: &str = "config/jsonlog.yaml";
pub const ENV_PREFIX: &str = "JSONLOG_";
const PREFIX_VAR: &str = "JSONLOG_PREFIX";

/// Logger settings as read from files and the environment.
///
/// Missing fields take the values of `LoggerConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct JsonlogConfig {
    /// Prepended to every message; a single line of at most 256 characters.
    #[validate(length(max = 256))]
    #[validate(custom(function = validation::validate_single_line))]
    pub prefix: String,

    pub verbosity: Severity,
}

impl Default for JsonlogConfig {
    fn default() -> Self {
        LoggerConfig::default().into()
    }
}

impl JsonlogConfig {
    /// Load settings from the default files and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(JsonlogConfig::default()));

        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Yaml::file(CONFIG_FILE));
        }

        let env = std::env::var("JSONLOG_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(with_env(figment))
    }

    /// Load settings from a specific file, still honouring `JSONLOG_*` overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(with_env(
            Figment::from(Serialized::defaults(JsonlogConfig::default())).merge(Yaml::file(path)),
        ))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

/// Layers `JSONLOG_*` variables over `figment`.
///
/// figment's `Env` parses values (`42` becomes a number, whitespace is
/// trimmed), so the prefix is read raw and merged as a plain string.
fn with_env(figment: Figment) -> Figment {
    let figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["env", "prefix"]));
    match std::env::var(PREFIX_VAR) {
        Ok(prefix) => figment.merge(Serialized::default("prefix", prefix)),
        Err(_) => figment,
    }
}

impl From<LoggerConfig> for JsonlogConfig {
    fn from(config: LoggerConfig) -> Self {
        Self {
            prefix: config.prefix,
            verbosity: config.verbosity,
        }
    }
}

impl From<JsonlogConfig> for LoggerConfig {
    fn from(config: JsonlogConfig) -> Self {
        LoggerConfig::new(config.prefix, config.verbosity)
    }
}

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jsonlog_config::JsonlogConfig;
use jsonlog_core::{Log, Logger, LoggerConfig, Severity};

use crate::error::CliError;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit a single record built from the message words
    Emit(EmitArgs),
    /// Emit one record per non-empty line read from stdin
    Pipe(PipeArgs),
    /// Show which severity a verbosity name resolves to
    Parse(ParseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoggerArgs {
    /// YAML settings file; defaults to config/jsonlog.yaml plus JSONLOG_* variables
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured prefix
    #[arg(short, long)]
    pub prefix: Option<String>,
    /// Overrides the configured minimum verbosity (unknown names mean warn)
    #[arg(short, long)]
    pub verbosity: Option<String>,
    /// Level of the emitted records
    #[arg(short, long, value_enum, default_value_t = EmitLevel::Info)]
    pub level: EmitLevel,
}

#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    #[command(flatten)]
    pub logger: LoggerArgs,
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PipeArgs {
    #[command(flatten)]
    pub logger: LoggerArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    pub name: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitLevel {
    Debug,
    Info,
    Warn,
    Err,
    Panic,
    Fatal,
}

impl EmitLevel {
    pub fn emit(self, logger: &dyn Log, message: &str) {
        match self {
            EmitLevel::Debug => logger.debug(format_args!("{}", message)),
            EmitLevel::Info => logger.info(format_args!("{}", message)),
            EmitLevel::Warn => logger.warn(format_args!("{}", message)),
            EmitLevel::Err => logger.err(format_args!("{}", message)),
            EmitLevel::Panic => logger.panic(format_args!("{}", message)),
            EmitLevel::Fatal => logger.fatal(format_args!("{}", message)),
        }
    }
}

pub fn run_command(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Emit(args) => {
            let logger = build_logger(&args.logger)?;
            args.logger.level.emit(&logger, &args.message.join(" "));
            logger.shutdown()?;
        }
        Commands::Pipe(args) => {
            let logger = build_logger(&args.logger)?;
            let count = pipe_lines(io::stdin().lock(), &logger, args.logger.level)?;
            tracing::debug!(count, "stdin drained");
            logger.shutdown()?;
        }
        Commands::Parse(args) => println!("{}", describe(&args.name)),
    }
    Ok(())
}

fn build_logger(args: &LoggerArgs) -> Result<Logger, CliError> {
    let loaded = match &args.config {
        Some(path) => JsonlogConfig::load_from_path(path)?,
        None => JsonlogConfig::load()?,
    };
    Ok(Logger::new(Some(apply_overrides(loaded.into(), args))))
}

/// Command-line flags take precedence over loaded settings.
fn apply_overrides(mut config: LoggerConfig, args: &LoggerArgs) -> LoggerConfig {
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some(name) = &args.verbosity {
        config.verbosity = jsonlog_core::parse_severity(name);
    }
    config
}

fn pipe_lines<R: BufRead>(reader: R, logger: &dyn Log, level: EmitLevel) -> Result<usize, CliError> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        level.emit(logger, &line);
        count += 1;
    }
    Ok(count)
}

fn describe(name: &str) -> String {
    match Severity::from_name(name) {
        Some(severity) => format!("{} ({})", severity, severity.ordinal()),
        None => {
            let fallback = jsonlog_core::parse_severity(name);
            format!("{} ({}, unrecognized {:?})", fallback, fallback.ordinal(), name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use jsonlog_config::ConfigError;
    use jsonlog_core::{LogError, MemorySink};
    use std::fmt;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorded {
        entries: Mutex<Vec<(&'static str, String)>>,
    }

    impl Recorded {
        fn push(&self, level: &'static str, args: fmt::Arguments<'_>) {
            self.entries.lock().unwrap().push((level, args.to_string()));
        }

        fn entries(&self) -> Vec<(&'static str, String)> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl Log for Recorded {
        fn debug(&self, args: fmt::Arguments<'_>) {
            self.push("debug", args)
        }
        fn info(&self, args: fmt::Arguments<'_>) {
            self.push("info", args)
        }
        fn warn(&self, args: fmt::Arguments<'_>) {
            self.push("warn", args)
        }
        fn err(&self, args: fmt::Arguments<'_>) {
            self.push("err", args)
        }
        fn panic(&self, args: fmt::Arguments<'_>) -> ! {
            panic!("{}", args)
        }
        fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
            panic!("fatal: {}", args)
        }
        fn set_verbosity(&self, _: &str) {}
        fn shutdown(&self) -> Result<(), LogError> {
            Ok(())
        }
    }

    fn with_config(path: &str) -> LoggerArgs {
        LoggerArgs {
            config: Some(PathBuf::from(path)),
            ..args(None, None)
        }
    }

    fn args(prefix: Option<&str>, verbosity: Option<&str>) -> LoggerArgs {
        LoggerArgs {
            config: None,
            prefix: prefix.map(str::to_owned),
            verbosity: verbosity.map(str::to_owned),
            level: EmitLevel::Info,
        }
    }

    #[test]
    fn parses_emit_invocation() {
        let cli = Cli::try_parse_from([
            "jsonlog", "emit", "--level", "err", "--prefix", "job: ", "disk", "full",
        ])
        .unwrap();
        match cli.command {
            Commands::Emit(emit) => {
                assert_eq!(emit.logger.level, EmitLevel::Err);
                assert_eq!(emit.logger.prefix.as_deref(), Some("job: "));
                assert_eq!(emit.message, vec!["disk", "full"]);
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn emit_requires_a_message() {
        assert!(Cli::try_parse_from(["jsonlog", "emit"]).is_err());
    }

    #[test]
    fn flags_override_loaded_settings() {
        let loaded = LoggerConfig::new("file: ", Severity::Err);

        let untouched = apply_overrides(loaded.clone(), &args(None, None));
        assert_eq!(untouched, loaded);

        let overridden = apply_overrides(loaded, &args(Some("cli: "), Some("bogus")));
        assert_eq!(overridden, LoggerConfig::new("cli: ", Severity::Warn));
    }

    #[test]
    fn pipes_non_empty_lines() {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let logger = Logger::with_sinks(None, out.clone(), err.clone());

        let input = Cursor::new("first\n\nsecond\n");
        let count = pipe_lines(input, &logger, EmitLevel::Warn).unwrap();
        assert_eq!(count, 2);

        let lines = out.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"level\": \"warn\""));
        assert!(lines[1].contains("\"message\": \"second\""));
        assert!(err.is_empty());
    }

    #[test]
    fn piped_records_still_respect_minimum() {
        let out = MemorySink::new();
        let logger = Logger::with_sinks(
            Some(LoggerConfig::new("", Severity::Err)),
            out.clone(),
            MemorySink::new(),
        );
        let count = pipe_lines(Cursor::new("quiet\n"), &logger, EmitLevel::Info).unwrap();
        assert_eq!(count, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn emit_levels_map_to_log_methods() {
        let log = Recorded::default();
        EmitLevel::Debug.emit(&log, "a");
        EmitLevel::Err.emit(&log, "b");
        let count = pipe_lines(Cursor::new("c\n"), &log, EmitLevel::Warn).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            log.entries(),
            vec![
                ("debug", "a".to_string()),
                ("err", "b".to_string()),
                ("warn", "c".to_string()),
            ]
        );
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = build_logger(&with_config("no/such/jsonlog.yaml"));
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn config_file_reaches_logger() {
        Jail::expect_with(|jail| {
            jail.create_file("cli.yaml", "prefix: \"batch: \"\nverbosity: err\n")?;

            let logger = build_logger(&with_config("cli.yaml")).map_err(|e| e.to_string())?;
            assert_eq!(logger.prefix(), "batch: ");
            assert_eq!(logger.verbosity(), Severity::Err);

            let overridden = LoggerArgs {
                prefix: Some("cli: ".into()),
                verbosity: Some("debug".into()),
                ..with_config("cli.yaml")
            };
            let logger = build_logger(&overridden).map_err(|e| e.to_string())?;
            assert_eq!(logger.prefix(), "cli: ");
            assert_eq!(logger.verbosity(), Severity::Debug);
            Ok(())
        });
    }

    #[test]
    fn invalid_config_fails_the_command() {
        Jail::expect_with(|jail| {
            jail.create_file("broken.yaml", "verbosity: 12\n")?;
            let cli = Cli::try_parse_from(["jsonlog", "emit", "--config", "broken.yaml", "hi"])
                .map_err(|e| e.to_string())?;
            assert!(matches!(
                run_command(cli),
                Err(CliError::Config(ConfigError::Parsing(_)))
            ));
            Ok(())
        });
    }

    #[test]
    fn describes_names() {
        assert_eq!(describe("DEBUG"), "debug (0)");
        assert_eq!(describe("err"), "err (3)");
        assert_eq!(describe("loud"), "warn (2, unrecognized \"loud\")");
    }
}

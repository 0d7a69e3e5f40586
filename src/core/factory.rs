// NixonKit - core/factory.rs
//
// Builds a configured logger from a kind plus a configuration snapshot.
// Settings are applied in a fixed order: colour, level, app prefix, file sink.

use super::console::{ColorMode, ConsoleLogger};
use super::level::Level;
use super::logger::{Logger, SharedLogger};
use super::null::NullLogger;
use crate::util::constants;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Which logger implementation `create` builds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    #[default]
    Console,
    /// Console logger with the file sink forced on.
    File,
    Null,
}

impl fmt::Display for LoggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Console => "console",
            Self::File => "file",
            Self::Null => "null",
        })
    }
}

/// Returned when a string names no known logger kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown logger kind '{}' (expected console, file or null)",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for LoggerKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "file" => Ok(Self::File),
            "null" | "none" => Ok(Self::Null),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Construction-time logger settings. Read once by `create`; later changes
/// go through the logger's own setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: Level,
    pub enable_file_logging: bool,
    pub log_file_path: Option<PathBuf>,
    /// `false` disables colour; `true` colours only on a terminal.
    pub color_output: bool,
    pub app_prefix: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LEVEL,
            enable_file_logging: false,
            log_file_path: None,
            color_output: true,
            app_prefix: String::new(),
        }
    }
}

/// Build a logger of `kind` configured from `config`.
///
/// Setup problems are emitted as `tracing` warnings; use `create_reporting`
/// to receive them instead.
pub fn create(kind: LoggerKind, config: &LoggerConfig) -> SharedLogger {
    let (logger, warnings) = create_reporting(kind, config);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    logger
}

/// Like `create`, but returns setup warnings (an unopenable file sink) to
/// the caller, who can route them through the new logger.
pub fn create_reporting(kind: LoggerKind, config: &LoggerConfig) -> (SharedLogger, Vec<String>) {
    match kind {
        LoggerKind::Console => console_reporting(config),
        LoggerKind::File => {
            let config = LoggerConfig {
                enable_file_logging: true,
                log_file_path: Some(
                    config
                        .log_file_path
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_LOG_FILE_NAME)),
                ),
                ..config.clone()
            };
            console_reporting(&config)
        }
        LoggerKind::Null => (create_null(), Vec::new()),
    }
}

/// Console logger on standard output.
pub fn create_console(config: &LoggerConfig) -> SharedLogger {
    create(LoggerKind::Console, config)
}

fn console_reporting(config: &LoggerConfig) -> (SharedLogger, Vec<String>) {
    let logger = ConsoleLogger::new();
    let warnings = configure(&logger, config);
    (Arc::new(logger), warnings)
}

pub fn create_null() -> SharedLogger {
    NullLogger::shared()
}

/// Apply `config` to an existing console logger. Returns one warning per
/// setting that could not be applied.
pub fn configure(logger: &ConsoleLogger, config: &LoggerConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    logger.set_color_mode(if config.color_output {
        ColorMode::Auto
    } else {
        ColorMode::Never
    });
    logger.set_level(config.level);
    if !config.app_prefix.is_empty() {
        logger.set_app_prefix(&config.app_prefix);
    }
    if config.enable_file_logging {
        if let Some(path) = config
            .log_file_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            if !logger.enable_file_logging(path) {
                warnings.push(format!(
                    "File sink {} could not be opened; logging to console only",
                    path.display()
                ));
            }
        }
    }
    warnings
}

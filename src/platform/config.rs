// NixonKit - platform/config.rs
//
// Platform directories and `config.toml` loading for logger settings.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use super::fs;
use crate::core::factory::{LoggerConfig, LoggerKind};
use crate::core::level::Level;
use crate::util::constants;
use crate::util::error::{ConfigError, FileErrorKind};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for NixonKit data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/nixonkit/ or %APPDATA%\NixonKit\config\)
    pub config_dir: PathBuf,

    /// Data directory for logs.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Default location of the log file sink.
    pub fn default_log_file(&self) -> PathBuf {
        self.data_dir.join(constants::DEFAULT_LOG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[logging]` config section. Values are kept as strings so an invalid
/// entry produces a warning instead of rejecting the whole file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Logger kind: "console", "file" or "null".
    pub kind: Option<String>,
    /// Threshold: "debug", "info", "warning", "error", "critical".
    pub level: Option<String>,
    /// Log file path (empty = console only).
    pub file: Option<String>,
    /// Mirror output to `file`.
    pub file_logging: Option<bool>,
    /// Colour console output when it is a terminal.
    pub color: Option<bool>,
    /// Application prefix written in the header.
    pub prefix: Option<String>,
}

/// Logger settings validated from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    pub kind: LoggerKind,
    pub logger: LoggerConfig,
}

/// Validate a parsed `RawConfig`, accumulating one warning per rejected
/// value. Rejected values keep their defaults.
pub fn validate(raw: RawConfig) -> (LoadedConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = LoadedConfig::default();
    let section = raw.logging;

    // -- kind --
    if let Some(ref kind) = section.kind {
        match kind.parse::<LoggerKind>() {
            Ok(k) => config.kind = k,
            Err(e) => warnings.push(format!(
                "[logging] kind: {e}. Using default ({}).",
                config.kind
            )),
        }
    }

    // -- level --
    if let Some(ref level) = section.level {
        match level.parse::<Level>() {
            Ok(l) => config.logger.level = l,
            Err(e) => warnings.push(format!(
                "[logging] level: {e}. Using default ({}).",
                constants::DEFAULT_LEVEL
            )),
        }
    }

    // -- file --
    if let Some(ref file) = section.file {
        if !file.is_empty() {
            config.logger.log_file_path = Some(PathBuf::from(file));
            config.logger.enable_file_logging = true;
        }
    }

    // -- file_logging --
    if let Some(enabled) = section.file_logging {
        if enabled && config.logger.log_file_path.is_none() && config.kind != LoggerKind::File {
            warnings.push(
                "[logging] file_logging = true but no file is set. Logging to console only."
                    .to_string(),
            );
        }
        config.logger.enable_file_logging = enabled && config.logger.log_file_path.is_some();
    }

    if let Some(color) = section.color {
        config.logger.color_output = color;
    }

    if let Some(prefix) = section.prefix {
        config.logger.app_prefix = prefix;
    }

    (config, warnings)
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns validated settings and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (LoadedConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (LoadedConfig::default(), Vec::new());
    }

    match load_config_file(config_path) {
        Ok((config, warnings)) => {
            if !warnings.is_empty() {
                tracing::warn!(
                    count = warnings.len(),
                    "Config validation produced warnings"
                );
            }
            (config, warnings)
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (LoadedConfig::default(), vec![msg])
        }
    }
}

/// Strict variant of `load_config`: a missing, unreadable or unparseable
/// file is an error.
pub fn load_config_file(config_path: &Path) -> Result<(LoadedConfig, Vec<String>), ConfigError> {
    let content = fs::read_to_string(config_path).map_err(ConfigError::Read)?;
    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// True when `err` means the config file simply is not there.
pub fn is_missing(err: &ConfigError) -> bool {
    matches!(err, ConfigError::Read(e) if e.kind == FileErrorKind::NotFound)
}

// NixonKit - util/constants.rs
//
// Single source of truth for all named constants and defaults.

use crate::core::level::Level;

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "NixonKit";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "NixonKit";

/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Logger defaults
// =============================================================================

/// Threshold a freshly constructed console logger starts with.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Level reported by the null logger.
pub const NULL_LOGGER_LEVEL: Level = Level::Info;

/// strftime pattern for the `[timestamp]` header field (local time, seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ANSI escape restoring the terminal's default attributes.
pub const ANSI_RESET: &str = "\x1b[0m";

/// Log file used by the `File` logger kind when the config names no path.
pub const DEFAULT_LOG_FILE_NAME: &str = "application.log";

// =============================================================================
// Diagnostics (tracing bridge)
// =============================================================================

/// Default `EnvFilter` directive for the crate's own tracing diagnostics.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the asset directory searched for next to the executable.
pub const ASSETS_DIR_NAME: &str = "assets";

/// Custom strings file inside the asset directory.
pub const STRINGS_FILE_NAME: &str = "customstrings.json";

/// Locale used when a requested translation is missing.
pub const FALLBACK_LOCALE: &str = "en";

/// Indentation width used when pretty-printing JSON.
pub const JSON_PRETTY_INDENT: usize = 4;

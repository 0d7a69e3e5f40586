// NixonKit - core/null.rs
//
// No-op logger. Components that accept an optional logger fall back to this
// so they never need to check for its absence.

use super::level::Level;
use super::logger::{Logger, SharedLogger};
use crate::util::constants;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl NullLogger {
    /// A fresh shared handle to a null logger.
    pub fn shared() -> SharedLogger {
        Arc::new(Self)
    }
}

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str, _caller: &str) {}

    fn set_level(&self, _level: Level) {}

    fn level(&self) -> Level {
        constants::NULL_LOGGER_LEVEL
    }

    fn set_app_prefix(&self, _prefix: &str) {}

    fn app_prefix(&self) -> String {
        String::new()
    }

    fn enable_file_logging(&self, _path: &Path) -> bool {
        true
    }

    fn disable_file_logging(&self) {}
}

/// `logger` if one was supplied, otherwise a null logger.
pub fn or_null(logger: Option<SharedLogger>) -> SharedLogger {
    logger.unwrap_or_else(NullLogger::shared)
}

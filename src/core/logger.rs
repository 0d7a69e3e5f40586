// NixonKit - core/logger.rs
//
// The logger capability shared by every toolkit component.
//
// Implementations decide whether the configured threshold suppresses a
// message; callers never receive an error from a log call. Logging is a
// best-effort side channel and must never become a failure source for the
// code it instruments.

use super::level::Level;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Leveled, thread-safe logger.
///
/// An empty `caller` tag means "no caller"; the header omits the field.
pub trait Logger: Send + Sync {
    /// Emit `message` at `level`, or drop it if `level` is below threshold.
    fn log(&self, level: Level, message: &str, caller: &str);

    fn set_level(&self, level: Level);

    fn level(&self) -> Level;

    fn set_app_prefix(&self, prefix: &str);

    fn app_prefix(&self) -> String;

    /// Open `path` in append mode as an additional sink.
    ///
    /// Returns whether the sink is open afterwards. Failure is reported, not
    /// raised.
    fn enable_file_logging(&self, path: &Path) -> bool;

    /// Close the file sink if one is open. Idempotent.
    fn disable_file_logging(&self);

    fn debug(&self, message: &str, caller: &str) {
        self.log(Level::Debug, message, caller);
    }

    fn info(&self, message: &str, caller: &str) {
        self.log(Level::Info, message, caller);
    }

    fn warning(&self, message: &str, caller: &str) {
        self.log(Level::Warning, message, caller);
    }

    fn error(&self, message: &str, caller: &str) {
        self.log(Level::Error, message, caller);
    }

    fn critical(&self, message: &str, caller: &str) {
        self.log(Level::Critical, message, caller);
    }

    /// Whether a message at `level` would currently be emitted.
    fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Format `args` and emit the result. Nothing is formatted when `level`
    /// is below threshold.
    fn log_args(&self, level: Level, caller: &str, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match args.as_str() {
            Some(literal) => self.log(level, literal, caller),
            None => self.log(level, &args.to_string(), caller),
        }
    }

    /// Emit `message` followed by the source location of the call.
    #[track_caller]
    fn log_with_location(&self, level: Level, message: &str) {
        let location = std::panic::Location::caller();
        self.log(
            level,
            &format!(
                "Log: {message}\nFile: {}\nLine: {}\nColumn: {}",
                location.file(),
                location.line(),
                location.column()
            ),
            "",
        );
    }
}

/// Reference-counted logger handle passed to dependent components.
pub type SharedLogger = Arc<dyn Logger>;

/// Log a formatted message at an explicit level.
///
/// ```ignore
/// log_at!(logger, Level::Info, "loaded {} entries", n);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::core::logger::Logger as _;
        $logger.log_args($level, "", ::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::core::level::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::core::level::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::core::level::Level::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::core::level::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::core::level::Level::Critical, $($arg)+)
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every emitted `(level, message, caller)` triple.
    #[derive(Default)]
    pub(crate) struct RecordingLogger {
        pub threshold: Mutex<Option<Level>>,
        pub records: Mutex<Vec<(Level, String, String)>>,
    }

    impl RecordingLogger {
        pub(crate) fn records(&self) -> Vec<(Level, String, String)> {
            self.records.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, level: Level, message: &str, caller: &str) {
            if !self.enabled(level) {
                return;
            }
            self.records
                .lock()
                .unwrap()
                .push((level, message.to_string(), caller.to_string()));
        }

        fn set_level(&self, level: Level) {
            *self.threshold.lock().unwrap() = Some(level);
        }

        fn level(&self) -> Level {
            self.threshold.lock().unwrap().unwrap_or(Level::Debug)
        }

        fn set_app_prefix(&self, _prefix: &str) {}

        fn app_prefix(&self) -> String {
            String::new()
        }

        fn enable_file_logging(&self, _path: &Path) -> bool {
            false
        }

        fn disable_file_logging(&self) {}
    }

    #[test]
    fn test_direct_calls_forward_matching_level() {
        let logger = RecordingLogger::default();
        logger.debug("d", "");
        logger.info("i", "main");
        logger.warning("w", "");
        logger.error("e", "");
        logger.critical("c", "");
        let levels: Vec<_> = logger.records().iter().map(|r| r.0).collect();
        assert_eq!(levels, Level::ALL);
        assert_eq!(logger.records()[1].2, "main");
    }

    #[test]
    fn test_log_args_formats_above_threshold() {
        let logger = RecordingLogger::default();
        logger.set_level(Level::Warning);
        crate::log_info!(&logger, "skipped {}", 1);
        crate::log_error!(&logger, "code {} in {}", 500, "handler");
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, "code 500 in handler");
    }

    #[test]
    fn test_log_args_does_not_format_below_threshold() {
        struct Exploding;
        impl fmt::Display for Exploding {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a suppressed message");
            }
        }
        let logger = RecordingLogger::default();
        logger.set_level(Level::Error);
        crate::log_debug!(&logger, "{}", Exploding);
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_log_with_location_names_this_file() {
        let logger = RecordingLogger::default();
        logger.log_with_location(Level::Info, "here");
        let message = &logger.records()[0].1;
        assert!(message.starts_with("Log: here\nFile: "));
        assert!(message.contains("logger.rs"));
        assert!(message.contains("\nLine: "));
    }
}

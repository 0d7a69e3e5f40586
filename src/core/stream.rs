// NixonKit - core/stream.rs
//
// Deferred "build-then-flush" log messages.
//
// A `LogStream` accumulates fragments into a private buffer (no I/O, no
// locking) and hands the finished text to its logger exactly once: either on
// `commit()` or when the builder is dropped. The logger handle is taken out
// of an `Option` on flush, so a second flush is impossible.

use super::level::Level;
use super::logger::SharedLogger;
use std::fmt::{self, Display, Write as _};

/// Builder for a single log message.
///
/// ```ignore
/// logger.info_stream("loader").append("loaded ").append(n).append(" files");
/// ```
///
/// The message is emitted when the temporary is dropped at the end of the
/// statement. Binding the builder to a name defers emission to the end of
/// that name's scope.
pub struct LogStream {
    logger: Option<SharedLogger>,
    level: Level,
    caller: String,
    buffer: String,
}

impl LogStream {
    pub fn new(logger: SharedLogger, level: Level, caller: impl Into<String>) -> Self {
        Self {
            logger: Some(logger),
            level,
            caller: caller.into(),
            buffer: String::new(),
        }
    }

    /// Append the `Display` form of `value`.
    pub fn append(mut self, value: impl Display) -> Self {
        self.push(value);
        self
    }

    /// Append in place, for use inside loops.
    pub fn push(&mut self, value: impl Display) -> &mut Self {
        // Writing into a String cannot fail.
        let _ = write!(self.buffer, "{value}");
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Text accumulated so far.
    pub fn message(&self) -> &str {
        &self.buffer
    }

    /// Emit now instead of at end of scope.
    pub fn commit(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        let Some(logger) = self.logger.take() else {
            return;
        };
        let message = std::mem::take(&mut self.buffer);
        match self.level {
            Level::Debug => logger.debug(&message, &self.caller),
            Level::Info => logger.info(&message, &self.caller),
            Level::Warning => logger.warning(&message, &self.caller),
            Level::Error => logger.error(&message, &self.caller),
            Level::Critical => logger.critical(&message, &self.caller),
        }
    }
}

impl fmt::Write for LogStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        self.flush();
    }
}

impl fmt::Debug for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("level", &self.level)
            .field("caller", &self.caller)
            .field("buffer", &self.buffer)
            .field("pending", &self.logger.is_some())
            .finish()
    }
}

/// Stream constructors on a shared logger handle.
pub trait LoggerStreamExt {
    fn stream(&self, level: Level, caller: &str) -> LogStream;

    fn debug_stream(&self, caller: &str) -> LogStream {
        self.stream(Level::Debug, caller)
    }

    fn info_stream(&self, caller: &str) -> LogStream {
        self.stream(Level::Info, caller)
    }

    fn warning_stream(&self, caller: &str) -> LogStream {
        self.stream(Level::Warning, caller)
    }

    fn error_stream(&self, caller: &str) -> LogStream {
        self.stream(Level::Error, caller)
    }

    fn critical_stream(&self, caller: &str) -> LogStream {
        self.stream(Level::Critical, caller)
    }
}

impl LoggerStreamExt for SharedLogger {
    fn stream(&self, level: Level, caller: &str) -> LogStream {
        LogStream::new(SharedLogger::clone(self), level, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logger::tests::RecordingLogger;
    use crate::core::logger::Logger;
    use std::fmt::Write as _;
    use std::sync::Arc;

    fn recording() -> (Arc<RecordingLogger>, SharedLogger) {
        let recorder = Arc::new(RecordingLogger::default());
        let shared: SharedLogger = recorder.clone();
        (recorder, shared)
    }

    #[test]
    fn test_stream_emits_once_on_drop() {
        let (recorder, logger) = recording();
        logger
            .info_stream("")
            .append("a=")
            .append(1)
            .append(", b=")
            .append(true);
        assert_eq!(
            recorder.records(),
            vec![(Level::Info, "a=1, b=true".to_string(), String::new())]
        );
    }

    #[test]
    fn test_nothing_emitted_until_scope_ends() {
        let (recorder, logger) = recording();
        {
            let mut stream = logger.warning_stream("worker");
            stream.push("step ").push(3);
            assert!(recorder.records().is_empty());
            assert_eq!(stream.message(), "step 3");
        }
        assert_eq!(
            recorder.records(),
            vec![(Level::Warning, "step 3".to_string(), "worker".to_string())]
        );
    }

    #[test]
    fn test_commit_flushes_exactly_once() {
        let (recorder, logger) = recording();
        let stream = logger.error_stream("").append("failed");
        stream.commit();
        assert_eq!(recorder.records().len(), 1);
        assert_eq!(recorder.records()[0].0, Level::Error);
    }

    #[test]
    fn test_fmt_write_into_stream() {
        let (recorder, logger) = recording();
        {
            let mut stream = logger.debug_stream("fmt");
            write!(stream, "{:>4}|{:.2}", 7, 1.5).unwrap();
        }
        assert_eq!(recorder.records()[0].1, "   7|1.50");
    }

    #[test]
    fn test_each_level_routes_to_matching_method() {
        let (recorder, logger) = recording();
        for level in Level::ALL {
            logger.stream(level, "").append(level.code());
        }
        let levels: Vec<_> = recorder.records().iter().map(|r| r.0).collect();
        assert_eq!(levels, Level::ALL);
    }

    #[test]
    fn test_stream_keeps_logger_alive() {
        let recorder = Arc::new(RecordingLogger::default());
        let stream = {
            let logger: SharedLogger = recorder.clone();
            logger.critical_stream("").append("late")
        };
        // Only the test's `recorder` and the stream hold the logger now.
        assert_eq!(Arc::strong_count(&recorder), 2);
        drop(stream);
        assert_eq!(Arc::strong_count(&recorder), 1);
        assert_eq!(recorder.records()[0].1, "late");
    }

    #[test]
    fn test_suppressed_level_emits_nothing() {
        let (recorder, logger) = recording();
        logger.set_level(Level::Error);
        logger.info_stream("").append("quiet");
        assert!(recorder.records().is_empty());
    }
}

// NixonKit - util/logging.rs
//
// Routes the toolkit's own `tracing` diagnostics (filesystem, JSON and config
// helpers) into a `SharedLogger`, so an application sees one stream of
// output with one header format.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// The logger's own threshold still applies after the EnvFilter.

use crate::core::level::Level;
use crate::core::logger::SharedLogger;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// `tracing` layer forwarding every event to a logger.
///
/// The event target becomes the caller tag; the `message` field becomes the
/// message text, followed by any other fields as ` key=value`.
pub struct LoggerLayer {
    logger: SharedLogger,
}

impl LoggerLayer {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        if !self.logger.enabled(level) {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.logger.log(level, &visitor.into_message(), metadata.target());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn into_message(self) -> String {
        if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

/// Install a global subscriber that forwards to `logger`.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
/// Returns `false` if a global subscriber was already installed.
pub fn init(logger: SharedLogger, debug_flag: bool, config_level: Option<Level>) -> bool {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(directive_for(level))
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Logging initialised"
        );
    }
    installed
}

/// `EnvFilter` directive equivalent to a logger threshold.
fn directive_for(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warning => "warn",
        Level::Error | Level::Critical => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logger::tests::RecordingLogger;
    use crate::core::logger::Logger;
    use std::sync::Arc;

    fn with_layer(f: impl FnOnce()) -> Arc<RecordingLogger> {
        let recorder = Arc::new(RecordingLogger::default());
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(recorder.clone()));
        tracing::subscriber::with_default(subscriber, f);
        recorder
    }

    #[test]
    fn test_event_forwarded_with_target_and_fields() {
        let recorder = with_layer(|| {
            tracing::warn!(target: "nixonkit::fs", path = "/tmp/a", count = 3, "Read failed");
        });
        assert_eq!(
            recorder.records(),
            vec![(
                Level::Warning,
                "Read failed path=/tmp/a count=3".to_string(),
                "nixonkit::fs".to_string()
            )]
        );
    }

    #[test]
    fn test_logger_threshold_still_applies() {
        let recorder = Arc::new(RecordingLogger::default());
        recorder.set_level(Level::Error);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(recorder.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("dropped");
            tracing::error!("kept");
        });
        let records = recorder.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, "kept");
    }

    #[test]
    fn test_fields_only_event() {
        let recorder = with_layer(|| {
            tracing::debug!(retries = 2);
        });
        assert_eq!(recorder.records()[0].1, "retries=2");
    }

    #[test]
    fn test_directive_for_level() {
        assert_eq!(directive_for(Level::Warning), "warn");
        assert_eq!(directive_for(Level::Critical), "error");
    }
}

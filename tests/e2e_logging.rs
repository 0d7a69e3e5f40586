// NixonKit - tests/e2e_logging.rs
//
// End-to-end tests for the logging core against the real filesystem:
// factory-built loggers, file sinks, thresholds, deferred streams, and
// concurrent writers. No mocks beyond an in-memory console destination.

use nixonkit::app::context::{AppContext, Toolkit};
use nixonkit::core::console::{ConsoleLogger, FixedProbe, HeaderFields};
use nixonkit::core::factory::{self, LoggerConfig, LoggerKind};
use nixonkit::core::level::Level;
use nixonkit::core::logger::{Logger, SharedLogger};
use nixonkit::core::null::NullLogger;
use nixonkit::core::stream::LoggerStreamExt;
use nixonkit::platform::assets::AssetManager;
use nixonkit::platform::{fs, json};
use nixonkit::util::error::{FileErrorKind, JsonErrorKind, ResultExt};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

// =============================================================================
// Helpers
// =============================================================================

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured_logger() -> (Arc<ConsoleLogger>, Capture) {
    let capture = Capture::default();
    let logger =
        ConsoleLogger::with_output(Box::new(capture.clone()), Box::new(FixedProbe(false)));
    (Arc::new(logger), capture)
}

fn file_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// File sink
// =============================================================================

/// N messages above threshold produce exactly N non-empty lines; after the
/// sink is disabled nothing more is written.
#[test]
fn e2e_file_sink_line_count_and_disable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = LoggerConfig {
        level: Level::Info,
        enable_file_logging: true,
        log_file_path: Some(path.clone()),
        color_output: false,
        app_prefix: "E2E".to_string(),
    };
    let logger = factory::create(LoggerKind::Console, &config);

    logger.debug("below threshold", "e2e");
    logger.info("one", "e2e");
    logger.warning("two", "e2e");
    logger.error("three", "");
    logger.disable_file_logging();
    logger.critical("not in file", "e2e");

    let lines = file_lines(&path);
    assert_eq!(lines.len(), 3, "{lines:?}");
    assert!(lines.iter().all(|l| !l.is_empty()));
    assert!(lines[0].starts_with("[E2E]["));
    assert!(lines[0].ends_with("][INF][e2e] one"));
    assert!(lines[1].ends_with("][WRN][e2e] two"));
    assert!(lines[2].ends_with("][ERR] three"));
}

/// The file sink appends across logger instances instead of truncating.
#[test]
fn e2e_file_sink_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.log");
    for round in 0..2 {
        let (logger, _out) = captured_logger();
        logger.hide_header(true);
        assert!(logger.enable_file_logging(&path));
        logger.info(&format!("round {round}"), "");
    }
    assert_eq!(file_lines(&path), ["round 0", "round 1"]);
}

/// Header toggles apply to the persisted line format.
#[test]
fn e2e_file_sink_respects_header_toggles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fields.log");
    let (logger, _out) = captured_logger();
    logger.set_app_prefix("Svc");
    logger.set_header_fields(HeaderFields {
        prefix: true,
        timestamp: false,
        level: true,
        caller: false,
    });
    assert!(logger.enable_file_logging(&path));
    logger.warning("careful", "hidden-caller");
    assert_eq!(file_lines(&path), ["[Svc][WRN] careful"]);
}

// =============================================================================
// Threshold and streams
// =============================================================================

#[test]
fn e2e_warning_threshold_filters_console_output() {
    let (logger, out) = captured_logger();
    logger.hide_header(true);
    logger.set_level(Level::Warning);
    let shared: SharedLogger = logger.clone();

    shared.debug_stream("").append("d");
    shared.info_stream("").append("i");
    shared.warning_stream("").append("w");
    shared.error_stream("").append("e");
    shared.critical_stream("").append("c");

    assert_eq!(out.text(), "w\ne\nc\n");
}

#[test]
fn e2e_stream_concatenates_fragments_into_one_message() {
    let (logger, out) = captured_logger();
    logger.hide_header(true);
    let shared: SharedLogger = logger.clone();

    shared.info_stream("").append("a=").append(1).append(", b=").append(true);

    assert_eq!(out.text(), "a=1, b=true\n");
}

// =============================================================================
// Concurrency
// =============================================================================

/// Many threads sharing one logger: every file line is complete and belongs
/// to exactly one message.
#[test]
fn e2e_concurrent_writers_produce_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threads.log");
    let (logger, out) = captured_logger();
    logger.set_header_fields(HeaderFields {
        timestamp: false,
        ..HeaderFields::ALL
    });
    assert!(logger.enable_file_logging(&path));
    let shared: SharedLogger = logger.clone();

    let threads = 6;
    let per_thread = 50;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for i in 0..per_thread {
                    if i % 2 == 0 {
                        shared.info(&format!("t{t} m{i}"), &format!("w{t}"));
                    } else {
                        shared
                            .info_stream(&format!("w{t}"))
                            .append("t")
                            .append(t)
                            .append(" m")
                            .append(i);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.disable_file_logging();

    let lines = file_lines(&path);
    assert_eq!(lines.len(), threads * per_thread);
    for line in &lines {
        let rest = line.strip_prefix("[INF][w").expect(line);
        let (t, body) = rest.split_once("] ").expect(line);
        assert!(body.starts_with(&format!("t{t} m")), "interleaved line {line:?}");
    }
    assert_eq!(out.text().lines().count(), threads * per_thread);
}

// =============================================================================
// Null logger and collaborators
// =============================================================================

#[test]
fn e2e_null_logger_as_dependency() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("null.log");
    let logger = factory::create(
        LoggerKind::Null,
        &LoggerConfig {
            enable_file_logging: true,
            log_file_path: Some(path.clone()),
            ..LoggerConfig::default()
        },
    );
    assert!(logger.enable_file_logging(&path));
    logger.critical("nothing", "");
    logger.error_stream("").append("still nothing");
    assert!(!path.exists());

    let null: SharedLogger = NullLogger::shared();
    null.info("ok", "");
}

/// Collaborator failures surface as typed results that render for the user.
#[test]
fn e2e_collaborator_errors_render() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let file_err = fs::read_to_string(&missing).error();
    assert_eq!(file_err.kind, FileErrorKind::NotFound);
    let rendered = file_err.to_string();
    assert!(rendered.contains("NotFound"));
    assert!(rendered.contains(&missing.display().to_string()));

    let json_err = json::load_from_file::<serde_json::Value>(&missing).error();
    assert_eq!(json_err.kind, JsonErrorKind::FileNotFound);

    let fallback = json::load_from_file::<serde_json::Value>(&missing)
        .value_or_default(serde_json::json!({"default": true}));
    assert_eq!(fallback["default"], true);
}

// =============================================================================
// Toolkit, assets and custom strings
// =============================================================================

/// A toolkit over a discovered install tree resolves localized strings and
/// reports its lifecycle through the shared logger.
#[test]
fn e2e_toolkit_reads_strings_from_discovered_assets() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("bin").join("nixonkit");
    let share = dir.path().join("share").join("NixonKit").join("assets");
    std::fs::create_dir_all(exe.parent().unwrap()).unwrap();
    std::fs::create_dir_all(&share).unwrap();
    std::fs::write(
        share.join("customstrings.json"),
        r#"{ "strings": [ { "id": "Greeting", "data": { "en": "Hello", "cs": "Ahoj" } } ] }"#,
    )
    .unwrap();

    let (logger, out) = captured_logger();
    logger.hide_header(true);
    let shared: SharedLogger = logger.clone();
    let assets = Arc::new(AssetManager::discover(&exe, "NixonKit"));
    {
        let toolkit = Toolkit::new(AppContext::new(Some(shared), Some(assets)));
        assert!(toolkit.is_initialized());
        assert!(toolkit.check_asset("customstrings.json"));

        let strings = toolkit.strings().value();
        assert_eq!(strings.localized("Greeting", "cs").as_deref(), Some("Ahoj"));
        assert_eq!(strings.localized("Greeting", "de").as_deref(), Some("Hello"));
        assert!(strings.find_by_id("Farewell").is_none());
    }

    let text = out.text();
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[0].ends_with(" initialized"), "{lines:?}");
    assert_eq!(*lines.last().unwrap(), "NixonKit shut down");
}

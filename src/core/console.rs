// NixonKit - core/console.rs
//
// Thread-safe console logger with an optional append-mode file sink.
//
// Concurrency: one `Mutex` guards the whole `ConsoleState` record (threshold,
// prefix, header toggles, colour mode, console writer, file sink). Every
// emitting or mutating call holds it for its full duration, so each emitted
// line is written whole and the sink can be opened or closed atomically with
// respect to concurrent writers. Distinct loggers share no lock.
//
// Failure policy: write errors on either sink are swallowed. Failing to open
// the file sink returns `false` and prints a notice to stderr.

use super::level::Level;
use super::logger::Logger;
use crate::util::constants;
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

// =============================================================================
// Terminal capability
// =============================================================================

/// Answers whether the console destination is an interactive terminal.
pub trait TerminalProbe: Send {
    fn is_terminal(&self) -> bool;
}

/// Probes the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutProbe;

impl TerminalProbe for StdoutProbe {
    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

/// Fixed answer, for tests and embedders that know their destination.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl TerminalProbe for FixedProbe {
    fn is_terminal(&self) -> bool {
        self.0
    }
}

/// When ANSI colour is written to the console.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour only when the console is a terminal.
    #[default]
    Auto,
    /// Always colour, even when redirected.
    Always,
    /// Never colour.
    Never,
}

/// Which header fields are written ahead of each message.
///
/// `prefix` and `caller` are still skipped when their value is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub prefix: bool,
    pub timestamp: bool,
    pub level: bool,
    pub caller: bool,
}

impl HeaderFields {
    pub const ALL: Self = Self {
        prefix: true,
        timestamp: true,
        level: true,
        caller: true,
    };

    pub const NONE: Self = Self {
        prefix: false,
        timestamp: false,
        level: false,
        caller: false,
    };
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self::ALL
    }
}

// =============================================================================
// State
// =============================================================================

/// Settings that travel with the logger in `take_state_from`.
#[derive(Debug, Clone)]
struct Settings {
    level: Level,
    app_prefix: String,
    fields: HeaderFields,
    trailing_newline: bool,
    color: ColorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LEVEL,
            app_prefix: String::new(),
            fields: HeaderFields::ALL,
            trailing_newline: true,
            color: ColorMode::Auto,
        }
    }
}

struct ConsoleState {
    settings: Settings,
    console: Box<dyn Write + Send>,
    probe: Box<dyn TerminalProbe>,
    file: Option<File>,
}

impl ConsoleState {
    fn use_color(&self) -> bool {
        match self.settings.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => self.probe.is_terminal(),
        }
    }

    /// `[prefix][timestamp][CODE][caller] ` from the enabled fields, or an
    /// empty string when no field applies.
    fn header(&self, level: Level, caller: &str) -> String {
        let fields = self.settings.fields;
        let mut header = String::new();
        if fields.prefix && !self.settings.app_prefix.is_empty() {
            header.push('[');
            header.push_str(&self.settings.app_prefix);
            header.push(']');
        }
        if fields.timestamp {
            let now = chrono::Local::now();
            header.push_str(&format!("[{}]", now.format(constants::TIMESTAMP_FORMAT)));
        }
        if fields.level {
            header.push('[');
            header.push_str(level.code());
            header.push(']');
        }
        if fields.caller && !caller.is_empty() {
            header.push('[');
            header.push_str(caller);
            header.push(']');
        }
        if !header.is_empty() {
            header.push(' ');
        }
        header
    }

    fn emit(&mut self, level: Level, message: &str, caller: &str) {
        if level < self.settings.level {
            return;
        }

        let mut line = self.header(level, caller);
        line.push_str(message);
        let newline = if self.settings.trailing_newline { "\n" } else { "" };

        let console_text = if self.use_color() {
            format!(
                "{}{line}{}{newline}",
                level.ansi_color(),
                constants::ANSI_RESET
            )
        } else {
            format!("{line}{newline}")
        };
        let _ = self
            .console
            .write_all(console_text.as_bytes())
            .and_then(|()| self.console.flush());

        if let Some(file) = self.file.as_mut() {
            line.push_str(newline);
            let _ = file.write_all(line.as_bytes()).and_then(|()| file.flush());
        }
    }
}

// =============================================================================
// ConsoleLogger
// =============================================================================

/// Logger writing to standard output (or an injected writer), optionally
/// coloured, optionally mirrored to an append-mode file.
pub struct ConsoleLogger {
    state: Mutex<ConsoleState>,
}

impl ConsoleLogger {
    /// Logger on the process's standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()), Box::new(StdoutProbe))
    }

    /// Logger on an arbitrary writer. `probe` decides `ColorMode::Auto`.
    pub fn with_output(console: Box<dyn Write + Send>, probe: Box<dyn TerminalProbe>) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                settings: Settings::default(),
                console,
                probe,
                file: None,
            }),
        }
    }

    // A panic while holding the lock leaves the state consistent enough to
    // keep logging, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_header_fields(&self, fields: HeaderFields) {
        self.lock().settings.fields = fields;
    }

    pub fn header_fields(&self) -> HeaderFields {
        self.lock().settings.fields
    }

    /// Hide every header field (`true`) or show them all again (`false`).
    pub fn hide_header(&self, hide: bool) {
        self.set_header_fields(if hide {
            HeaderFields::NONE
        } else {
            HeaderFields::ALL
        });
    }

    pub fn set_trailing_newline(&self, enabled: bool) {
        self.lock().settings.trailing_newline = enabled;
    }

    /// Force colour on or off, overriding terminal detection.
    pub fn set_color_enabled(&self, enabled: bool) {
        self.set_color_mode(if enabled {
            ColorMode::Always
        } else {
            ColorMode::Never
        });
    }

    /// Return to terminal detection (`true`), or force colour off (`false`).
    pub fn set_auto_detect_color(&self, auto_detect: bool) {
        self.set_color_mode(if auto_detect {
            ColorMode::Auto
        } else {
            ColorMode::Never
        });
    }

    pub fn set_color_mode(&self, mode: ColorMode) {
        self.lock().settings.color = mode;
    }

    pub fn color_mode(&self) -> ColorMode {
        self.lock().settings.color
    }

    /// Whether the next console write would carry colour codes.
    pub fn uses_color(&self) -> bool {
        self.lock().use_color()
    }

    pub fn is_file_logging(&self) -> bool {
        self.lock().file.is_some()
    }

    /// Move `other`'s settings and file sink into `self`, leaving `other`
    /// with default settings and no file sink. Each logger keeps its own
    /// console writer.
    ///
    /// Both locks are held for the transfer, acquired in address order so two
    /// opposing transfers cannot deadlock. Transferring from `self` is a
    /// no-op.
    pub fn take_state_from(&self, other: &ConsoleLogger) {
        if std::ptr::eq(self, other) {
            return;
        }
        let self_first = (self as *const Self) < (other as *const Self);
        let (mut mine, mut theirs) = if self_first {
            let mine = self.lock();
            (mine, other.lock())
        } else {
            let theirs = other.lock();
            (self.lock(), theirs)
        };
        mine.settings = std::mem::take(&mut theirs.settings);
        mine.file = theirs.file.take();
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ConsoleLogger")
            .field("settings", &state.settings)
            .field("file_logging", &state.file.is_some())
            .finish()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str, caller: &str) {
        self.lock().emit(level, message, caller);
    }

    fn set_level(&self, level: Level) {
        self.lock().settings.level = level;
    }

    fn level(&self) -> Level {
        self.lock().settings.level
    }

    fn set_app_prefix(&self, prefix: &str) {
        self.lock().settings.app_prefix = prefix.to_string();
    }

    fn app_prefix(&self) -> String {
        self.lock().settings.app_prefix.clone()
    }

    /// Replaces any open sink. The old sink is closed first, so a failed
    /// open leaves no sink and the return value matches `is_file_logging`.
    fn enable_file_logging(&self, path: &Path) -> bool {
        let mut state = self.lock();
        state.file = None;
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                state.file = Some(file);
                true
            }
            Err(e) => {
                eprintln!("Failed to open log file: {} - {e}", path.display());
                false
            }
        }
    }

    fn disable_file_logging(&self) {
        self.lock().file = None;
    }
}

// NixonKit - util/error.rs
//
// Typed error taxonomy for every fallible toolkit operation.
// Expected failures (missing file, malformed JSON) are always returned as
// `Err`; panics are reserved for misuse of the `ResultExt` accessors.
// File and JSON errors are flat value records: no cause chains.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// File errors
// ---------------------------------------------------------------------------

/// Closed set of filesystem failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileErrorKind {
    NotFound,
    AccessDenied,
    AlreadyExists,
    ReadError,
    WriteError,
    InvalidPath,
    IsDirectory,
    NotDirectory,
    Unknown,
}

impl FileErrorKind {
    /// Canonical name used in rendered errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::AccessDenied => "AccessDenied",
            Self::AlreadyExists => "AlreadyExists",
            Self::ReadError => "ReadError",
            Self::WriteError => "WriteError",
            Self::InvalidPath => "InvalidPath",
            Self::IsDirectory => "IsDirectory",
            Self::NotDirectory => "NotDirectory",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed filesystem operation: kind, human-readable message, and the path
/// it concerned (empty when no path applies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub kind: FileErrorKind,
    pub message: String,
    pub path: String,
}

impl FileError {
    pub fn new(kind: FileErrorKind, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if !self.path.is_empty() {
            write!(f, " (path: {})", self.path)?;
        }
        Ok(())
    }
}

impl std::error::Error for FileError {}

// ---------------------------------------------------------------------------
// JSON errors
// ---------------------------------------------------------------------------

/// Closed set of JSON failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonErrorKind {
    ParseError,
    InvalidStructure,
    FileNotFound,
    InvalidType,
    MissingKey,
    Unknown,
}

impl JsonErrorKind {
    /// Canonical name used in rendered errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::InvalidStructure => "InvalidStructure",
            Self::FileNotFound => "FileNotFound",
            Self::InvalidType => "InvalidType",
            Self::MissingKey => "MissingKey",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for JsonErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed JSON operation: kind, message, and free-form details
/// (parse position, offending key, source path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonError {
    pub kind: JsonErrorKind,
    pub message: String,
    pub details: String,
}

impl JsonError {
    pub fn new(
        kind: JsonErrorKind,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: details.into(),
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        // Same context label as `FileError`.
        if !self.details.is_empty() {
            write!(f, " (path: {})", self.details)?;
        }
        Ok(())
    }
}

impl std::error::Error for JsonError {}

/// Result of a filesystem operation.
pub type FileResult<T> = std::result::Result<T, FileError>;

/// Result of a JSON operation.
pub type JsonResult<T> = std::result::Result<T, JsonError>;

// ---------------------------------------------------------------------------
// Result accessors
// ---------------------------------------------------------------------------

/// Checked accessors over any `Result`.
///
/// `value()` and `error()` treat reading the wrong variant as a programming
/// error and panic with the offending payload's `Debug` form. Any error type
/// that derives `Debug` qualifies. Callers on expected
/// failure paths should test `has_value()` first or use `value_or_default`.
pub trait ResultExt<T, E> {
    /// True iff the result holds a success value.
    fn has_value(&self) -> bool;

    /// The success payload.
    ///
    /// # Panics
    ///
    /// Panics if the result holds an error.
    fn value(self) -> T;

    /// The error payload.
    ///
    /// # Panics
    ///
    /// Panics if the result holds a success value.
    fn error(self) -> E;

    /// The success payload, or `default` if the result holds an error.
    fn value_or_default(self, default: T) -> T;
}

impl<T, E: fmt::Debug> ResultExt<T, E> for std::result::Result<T, E> {
    fn has_value(&self) -> bool {
        self.is_ok()
    }

    #[track_caller]
    fn value(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => panic!("value() called on an error result: {e:?}"),
        }
    }

    #[track_caller]
    fn error(self) -> E {
        match self {
            Ok(_) => panic!("error() called on a success result"),
            Err(e) => e,
        }
    }

    fn value_or_default(self, default: T) -> T {
        self.unwrap_or(default)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to loading a logger configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Read(FileError),

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "Config read error: {e}"),
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::TomlParse { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Top-level error for the binary and the configuration layer.
#[derive(Debug)]
pub enum ToolkitError {
    File(FileError),
    Json(JsonError),
    Config(ConfigError),
}

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(e) => write!(f, "File error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ToolkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::File(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<FileError> for ToolkitError {
    fn from(e: FileError) -> Self {
        Self::File(e)
    }
}

impl From<JsonError> for ToolkitError {
    fn from(e: JsonError) -> Self {
        Self::Json(e)
    }
}

impl From<ConfigError> for ToolkitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for toolkit-level results.
pub type Result<T> = std::result::Result<T, ToolkitError>;

// NixonKit - platform/fs.rs
//
// Filesystem reader, writer and directory helpers.
//
// Every operation returns `FileResult`; expected failures (missing file,
// directory where a file was expected, permission problems) never panic.
// Diagnostics go through `tracing` so an application that installed
// `util::logging::init` sees them in its logger.

use crate::util::error::{FileError, FileErrorKind, FileResult};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Convert an `io::Error` into a `FileError`, using `fallback` for error
/// kinds without a dedicated `FileErrorKind`.
pub fn map_io_error(
    err: &io::Error,
    fallback: FileErrorKind,
    message: &str,
    path: &Path,
) -> FileError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => FileErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => FileErrorKind::AccessDenied,
        io::ErrorKind::AlreadyExists => FileErrorKind::AlreadyExists,
        _ => fallback,
    };
    FileError::new(kind, format!("{message}: {err}"), path.display().to_string())
}

/// Check that `path` names an existing regular file.
pub fn validate_file_path(path: &Path) -> FileResult<()> {
    if path.as_os_str().is_empty() {
        return Err(FileError::new(FileErrorKind::InvalidPath, "Empty file path", ""));
    }
    let display = path.display().to_string();
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(FileError::new(
            FileErrorKind::IsDirectory,
            "Path is a directory, not a file",
            display,
        )),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FileError::new(
            FileErrorKind::NotFound,
            "File does not exist",
            display,
        )),
        Err(e) => Err(map_io_error(&e, FileErrorKind::ReadError, "Cannot access file", path)),
    }
}

/// True if `path` is an existing regular file.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Size of the file in bytes.
pub fn file_size(path: &Path) -> FileResult<u64> {
    validate_file_path(path)?;
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|e| map_io_error(&e, FileErrorKind::ReadError, "Failed to get file size", path))
}

/// Read the full content of a UTF-8 file.
pub fn read_to_string(path: &Path) -> FileResult<String> {
    validate_file_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Read failed");
        map_io_error(&e, FileErrorKind::ReadError, "Failed to read file", path)
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "File read");
    Ok(content)
}

/// Read the raw bytes of a file.
pub fn read_bytes(path: &Path) -> FileResult<Vec<u8>> {
    validate_file_path(path)?;
    fs::read(path)
        .map_err(|e| map_io_error(&e, FileErrorKind::ReadError, "Failed to read file", path))
}

/// Read a file as lines, without line terminators.
pub fn read_lines(path: &Path) -> FileResult<Vec<String>> {
    validate_file_path(path)?;
    let file = fs::File::open(path)
        .map_err(|e| {
            map_io_error(&e, FileErrorKind::ReadError, "Failed to open file for reading", path)
        })?;
    io::BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| {
            map_io_error(&e, FileErrorKind::ReadError, "I/O error while reading file", path)
        })
}

/// Check that `path` can be written as a file: non-empty, not a directory,
/// parent directory present.
fn validate_write_path(path: &Path) -> FileResult<()> {
    if path.as_os_str().is_empty() {
        return Err(FileError::new(FileErrorKind::InvalidPath, "Empty file path", ""));
    }
    let display = path.display().to_string();
    if path.is_dir() {
        return Err(FileError::new(
            FileErrorKind::IsDirectory,
            "Path is a directory, not a file",
            display,
        ));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(FileError::new(
            FileErrorKind::NotFound,
            "Parent directory does not exist",
            display,
        )),
        _ => Ok(()),
    }
}

/// Create or truncate `path` and write `content`.
pub fn write_bytes(path: &Path, content: &[u8]) -> FileResult<()> {
    validate_write_path(path)?;
    fs::write(path, content)
        .map_err(|e| map_io_error(&e, FileErrorKind::WriteError, "Failed to write file", path))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}

/// Create or truncate `path` and write `content`.
pub fn write_string(path: &Path, content: &str) -> FileResult<()> {
    write_bytes(path, content.as_bytes())
}

/// Append `content` to `path`, creating the file if needed.
pub fn append_string(path: &Path, content: &str) -> FileResult<()> {
    validate_write_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            map_io_error(&e, FileErrorKind::WriteError, "Failed to open file for appending", path)
        })?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| map_io_error(&e, FileErrorKind::WriteError, "Failed to append to file", path))
}

/// Create `path` and any missing parents. Succeeds if it already exists as
/// a directory.
pub fn create_dir_all(path: &Path) -> FileResult<()> {
    if path.as_os_str().is_empty() {
        return Err(FileError::new(FileErrorKind::InvalidPath, "Empty directory path", ""));
    }
    if path.is_file() {
        return Err(FileError::new(
            FileErrorKind::NotDirectory,
            "Path exists and is not a directory",
            path.display().to_string(),
        ));
    }
    fs::create_dir_all(path)
        .map_err(|e| {
            map_io_error(&e, FileErrorKind::WriteError, "Failed to create directory", path)
        })
}

/// Remove a directory and everything under it.
pub fn remove_dir_all(path: &Path) -> FileResult<()> {
    validate_dir_path(path)?;
    fs::remove_dir_all(path)
        .map_err(|e| {
            map_io_error(&e, FileErrorKind::WriteError, "Failed to remove directory", path)
        })
}

/// Entries directly inside `path`, sorted by path.
pub fn list_dir(path: &Path) -> FileResult<Vec<PathBuf>> {
    validate_dir_path(path)?;
    let entries = fs::read_dir(path)
        .map_err(|e| map_io_error(&e, FileErrorKind::ReadError, "Failed to list directory", path))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| map_io_error(&e, FileErrorKind::ReadError, "Failed to list directory", path))?;
    paths.sort();
    Ok(paths)
}

/// Check that `path` names an existing directory.
pub fn validate_dir_path(path: &Path) -> FileResult<()> {
    if path.as_os_str().is_empty() {
        return Err(FileError::new(FileErrorKind::InvalidPath, "Empty directory path", ""));
    }
    let display = path.display().to_string();
    if !path.exists() {
        return Err(FileError::new(
            FileErrorKind::NotFound,
            "Directory does not exist",
            display,
        ));
    }
    if !path.is_dir() {
        return Err(FileError::new(
            FileErrorKind::NotDirectory,
            "Path is not a directory",
            display,
        ));
    }
    Ok(())
}

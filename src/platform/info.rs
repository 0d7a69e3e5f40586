// NixonKit - platform/info.rs
//
// Host platform identity and the location of the running executable.
// Asset discovery starts from the executable's directory.

use super::fs::map_io_error;
use crate::util::error::{FileError, FileErrorKind, FileResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Platform the binary was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    Emscripten,
    Unknown,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "emscripten") {
            Self::Emscripten
        } else {
            Self::Unknown
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Emscripten => "Emscripten",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable name of the platform the binary was built for.
pub fn platform_name() -> &'static str {
    Platform::current().name()
}

/// Absolute path of the running executable.
pub fn executable_path() -> FileResult<PathBuf> {
    std::env::current_exe().map_err(|e| {
        map_io_error(
            &e,
            FileErrorKind::ReadError,
            "Failed to get executable path",
            Path::new(""),
        )
    })
}

/// Directory containing the running executable.
pub fn executable_dir() -> FileResult<PathBuf> {
    parent_dir(&executable_path()?)
}

fn parent_dir(path: &Path) -> FileResult<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            FileError::new(
                FileErrorKind::InvalidPath,
                "Executable path has no parent directory",
                path.display().to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::ResultExt;

    #[test]
    fn test_platform_name_matches_build_target() {
        let name = platform_name();
        assert!(!name.is_empty());
        if cfg!(target_os = "linux") {
            assert_eq!(name, "Linux");
            assert_eq!(Platform::current(), Platform::Linux);
        }
        assert_eq!(Platform::MacOs.to_string(), "macOS");
    }

    #[test]
    fn test_executable_path_points_at_this_binary() {
        let exe = executable_path().value();
        assert!(exe.is_absolute());
        assert!(exe.is_file(), "{}", exe.display());
    }

    #[test]
    fn test_executable_dir_is_parent_of_path() {
        let dir = executable_dir().value();
        assert!(dir.is_dir());
        assert_eq!(Some(dir.as_path()), executable_path().value().parent());
    }

    #[test]
    fn test_path_without_parent_is_invalid() {
        let err = parent_dir(Path::new("app")).error();
        assert_eq!(err.kind, FileErrorKind::InvalidPath);
        assert_eq!(err.path, "app");
        assert!(parent_dir(Path::new("/opt/app/bin/app")).has_value());
    }
}

// NixonKit - platform/assets.rs
//
// Locates the application's asset directory and resolves asset paths inside
// it. Discovery tries a fixed list of locations relative to the executable
// and settles on the first existing directory; if none exists the first
// candidate is kept, so `validate` reports the problem later.

use super::{fs, info};
use crate::util::constants;
use crate::util::error::FileResult;
use std::path::{Path, PathBuf};

/// Asset directory root. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManager {
    root: PathBuf,
}

impl AssetManager {
    /// Asset manager over an explicit root. The root is not checked here;
    /// call `validate` or `check`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Search the standard locations around `executable_path`.
    pub fn discover(executable_path: &Path, app_name: &str) -> Self {
        let candidates = Self::candidates(executable_path, app_name);
        for candidate in &candidates {
            if candidate.is_dir() {
                let root = candidate
                    .canonicalize()
                    .unwrap_or_else(|_| candidate.clone());
                tracing::debug!(root = %root.display(), "Asset directory found");
                return Self { root };
            }
        }

        let fallback = candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from(constants::ASSETS_DIR_NAME));
        tracing::debug!(
            root = %fallback.display(),
            "No asset directory found; using first candidate"
        );
        Self { root: fallback }
    }

    /// `discover` around the running executable.
    pub fn for_current_exe(app_name: &str) -> FileResult<Self> {
        Ok(Self::discover(&info::executable_path()?, app_name))
    }

    /// Candidate asset directories in priority order:
    ///
    /// 1. `<exe dir>/assets` (development builds)
    /// 2. `<exe dir>/../share/<app>/assets` (Unix install)
    /// 3. `<exe dir>/../share/assets`
    /// 4. `<exe dir>/../assets` (build tree)
    pub fn candidates(executable_path: &Path, app_name: &str) -> Vec<PathBuf> {
        let exe_dir = executable_path.parent().unwrap_or_else(|| Path::new(""));
        let up = exe_dir.join("..");
        vec![
            exe_dir.join(constants::ASSETS_DIR_NAME),
            up.join("share").join(app_name).join(constants::ASSETS_DIR_NAME),
            up.join("share").join(constants::ASSETS_DIR_NAME),
            up.join(constants::ASSETS_DIR_NAME),
        ]
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an asset given relative to the root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// True if the asset (file or directory) exists.
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.resolve(relative).exists()
    }

    /// The root as a typed result: `InvalidPath`, `NotFound` or
    /// `NotDirectory` when it cannot serve assets.
    pub fn check(&self) -> FileResult<()> {
        fs::validate_dir_path(&self.root)
    }

    /// True if the root is a non-empty path to an existing directory.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }
}

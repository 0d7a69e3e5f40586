// NixonKit - app/context.rs
//
// The toolkit handle. It takes its collaborators through `AppContext`, each
// optional: a missing logger becomes a null logger, and a missing or
// unusable asset directory leaves the toolkit uninitialized but still
// usable for logging.

use crate::core::logger::SharedLogger;
use crate::core::null;
use crate::core::stream::LoggerStreamExt;
use crate::platform::assets::AssetManager;
use crate::platform::strings::StringsLoader;
use crate::util::constants;
use crate::util::error::{FileError, FileErrorKind, FileResult};
use std::sync::Arc;

const CALLER: &str = "toolkit";

/// Collaborators handed to `Toolkit::new`.
#[derive(Clone, Default)]
pub struct AppContext {
    pub logger: Option<SharedLogger>,
    pub assets: Option<Arc<AssetManager>>,
}

impl AppContext {
    pub fn new(logger: Option<SharedLogger>, assets: Option<Arc<AssetManager>>) -> Self {
        Self { logger, assets }
    }
}

pub struct Toolkit {
    logger: SharedLogger,
    assets: Option<Arc<AssetManager>>,
    initialized: bool,
}

impl Toolkit {
    /// Build the toolkit and report the outcome through its logger.
    pub fn new(context: AppContext) -> Self {
        let logger = null::or_null(context.logger);
        let initialized = context.assets.as_deref().is_some_and(AssetManager::validate);

        if initialized {
            logger
                .info_stream(CALLER)
                .append(constants::APP_NAME)
                .append(" v")
                .append(constants::APP_VERSION)
                .append(" initialized");
        } else {
            let mut stream = logger.error_stream(CALLER);
            stream.push("Invalid or missing asset manager");
            if let Some(assets) = &context.assets {
                stream.push(": ").push(assets.root().display());
            }
        }

        Self {
            logger,
            assets: context.assets,
            initialized,
        }
    }

    /// True when the asset directory was usable at construction.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// The asset manager, if one was supplied.
    pub fn assets(&self) -> Option<&Arc<AssetManager>> {
        self.assets.as_ref()
    }

    /// Strings loader over the default strings file, logging through this
    /// toolkit's logger.
    pub fn strings(&self) -> FileResult<StringsLoader> {
        let assets = self.assets.clone().ok_or_else(|| {
            FileError::new(FileErrorKind::InvalidPath, "No asset directory configured", "")
        })?;
        StringsLoader::with_default_file(assets, Some(Arc::clone(&self.logger)))
    }

    /// True if `name` exists in the asset directory. Misses are logged.
    pub fn check_asset(&self, name: &str) -> bool {
        let Some(assets) = self.assets.as_ref().filter(|_| self.initialized) else {
            self.logger
                .warning_stream(CALLER)
                .append("Toolkit not initialized; cannot check asset ")
                .append(name);
            return false;
        };

        if assets.exists(name) {
            self.logger
                .debug_stream(CALLER)
                .append("Asset found: ")
                .append(name);
            true
        } else {
            self.logger
                .warning_stream(CALLER)
                .append("Asset not found: ")
                .append(assets.resolve(name).display());
            false
        }
    }
}

impl Drop for Toolkit {
    fn drop(&mut self) {
        let mut stream = self.logger.info_stream(CALLER);
        stream.push(constants::APP_NAME).push(" shut down");
        if !self.initialized {
            stream.push(" (not initialized)");
        }
    }
}

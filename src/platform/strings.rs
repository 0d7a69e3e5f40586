// NixonKit - platform/strings.rs
//
// Custom strings loaded from a JSON file in the asset directory.
//
// Expected file shape:
//
//   { "strings": [ { "id": "Author", "data": { "en": "..", "cs": "..", "path": ".." } } ] }
//
// The file is read on first lookup and cached behind a mutex; concurrent
// lookups share one parse. A failed load is not cached, so a file that
// appears later is picked up. Lookups answer `None` for anything missing
// or mistyped; only `load` reports why.

use super::assets::AssetManager;
use super::json;
use crate::core::logger::SharedLogger;
use crate::core::null;
use crate::core::stream::LoggerStreamExt;
use crate::util::constants;
use crate::util::error::{
    FileError, FileErrorKind, FileResult, JsonError, JsonErrorKind, JsonResult,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

const CALLER: &str = "strings";

pub struct StringsLoader {
    assets: Arc<AssetManager>,
    file_name: String,
    logger: SharedLogger,
    cache: Mutex<Option<Value>>,
}

impl StringsLoader {
    /// Loader for `file_name` inside `assets`.
    ///
    /// Fails when the asset root is unusable or `file_name` is empty. A
    /// missing strings file is not an error here; lookups answer `None`.
    pub fn new(
        assets: Arc<AssetManager>,
        file_name: impl Into<String>,
        logger: Option<SharedLogger>,
    ) -> FileResult<Self> {
        assets.check()?;
        let file_name = file_name.into();
        if file_name.is_empty() {
            return Err(FileError::new(
                FileErrorKind::InvalidPath,
                "Empty strings file name",
                assets.root().display().to_string(),
            ));
        }
        Ok(Self {
            assets,
            file_name,
            logger: null::or_null(logger),
            cache: Mutex::new(None),
        })
    }

    /// Loader for `constants::STRINGS_FILE_NAME`.
    pub fn with_default_file(
        assets: Arc<AssetManager>,
        logger: Option<SharedLogger>,
    ) -> FileResult<Self> {
        Self::new(assets, constants::STRINGS_FILE_NAME, logger)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Read and parse the strings file, bypassing the cache.
    pub fn load(&self) -> JsonResult<Value> {
        if !self.assets.exists(&self.file_name) {
            return Err(JsonError::new(
                JsonErrorKind::FileNotFound,
                "Custom strings file not found in assets",
                self.file_name.clone(),
            ));
        }
        json::load_from_file(&self.assets.resolve(&self.file_name))
    }

    /// Drop the cached document; the next lookup reloads it.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Entry of the `strings` array whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Value> {
        self.with_entry(id, |entry| Some(entry.clone()))
    }

    /// `data.path` of the entry.
    pub fn path(&self, id: &str) -> Option<String> {
        self.with_entry(id, |entry| data_str(entry, "path"))
    }

    /// `data.<key>` of the entry.
    pub fn custom_key(&self, id: &str, key: &str) -> Option<String> {
        self.with_entry(id, |entry| data_str(entry, key))
    }

    /// `data.<locale>` of the entry, falling back to English.
    pub fn localized(&self, id: &str, locale: &str) -> Option<String> {
        self.with_entry(id, |entry| {
            data_str(entry, locale).or_else(|| {
                if locale == constants::FALLBACK_LOCALE {
                    None
                } else {
                    data_str(entry, constants::FALLBACK_LOCALE)
                }
            })
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Value>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` on the entry for `id` while holding the cache lock.
    fn with_entry<R>(&self, id: &str, f: impl FnOnce(&Value) -> Option<R>) -> Option<R> {
        let mut cache = self.lock();
        if cache.is_none() {
            match self.load() {
                Ok(document) => {
                    self.logger
                        .debug_stream(CALLER)
                        .append("Loaded ")
                        .append(&self.file_name);
                    *cache = Some(document);
                }
                Err(e) => {
                    self.logger
                        .warning_stream(CALLER)
                        .append("Custom strings unavailable: ")
                        .append(e);
                    return None;
                }
            }
        }
        let document = cache.as_ref()?;
        let entries = json::lookup(document, &["strings"]).ok()?.as_array()?;
        entries
            .iter()
            .find(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
            .and_then(f)
    }
}

fn data_str(entry: &Value, key: &str) -> Option<String> {
    json::lookup_str(entry, &["data", key]).ok().map(str::to_string)
}

// NixonKit - platform/json.rs
//
// JSON parsing, serialisation and file load/save on top of `serde_json`,
// reporting failures as `JsonError`.

use super::fs;
use crate::util::constants;
use crate::util::error::{JsonError, JsonErrorKind, JsonResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

fn classify(err: &serde_json::Error) -> JsonError {
    use serde_json::error::Category;
    match err.classify() {
        Category::Syntax | Category::Eof => JsonError::new(
            JsonErrorKind::ParseError,
            "JSON parse error",
            format!("line {}, column {}: {err}", err.line(), err.column()),
        ),
        Category::Data if err.to_string().starts_with("missing field") => {
            JsonError::new(JsonErrorKind::MissingKey, "Required key is missing", err.to_string())
        }
        Category::Data => JsonError::new(
            JsonErrorKind::InvalidType,
            "JSON value does not match the expected type",
            err.to_string(),
        ),
        Category::Io => JsonError::new(JsonErrorKind::Unknown, "JSON I/O error", err.to_string()),
    }
}

/// Parse `text` into any deserialisable type, `serde_json::Value` included.
pub fn parse<T: DeserializeOwned>(text: &str) -> JsonResult<T> {
    serde_json::from_str(text).map_err(|e| classify(&e))
}

/// Serialise `value`; `pretty` indents with `constants::JSON_PRETTY_INDENT`
/// spaces.
pub fn to_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> JsonResult<String> {
    let failed = |e: serde_json::Error| {
        JsonError::new(
            JsonErrorKind::Unknown,
            "Failed to serialise JSON to string",
            e.to_string(),
        )
    };
    if !pretty {
        return serde_json::to_string(value).map_err(failed);
    }
    let indent = " ".repeat(constants::JSON_PRETTY_INDENT);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(failed)?;
    String::from_utf8(out).map_err(|e| {
        JsonError::new(
            JsonErrorKind::Unknown,
            "Serialised JSON is not valid UTF-8",
            e.to_string(),
        )
    })
}

/// Read and parse a JSON file.
pub fn load_from_file<T: DeserializeOwned>(path: &Path) -> JsonResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        JsonError::new(
            JsonErrorKind::FileNotFound,
            format!("Failed to read JSON file: {}", e.message),
            path.display().to_string(),
        )
    })?;
    parse(&content)
}

/// Serialise `value` and write it to `path`.
pub fn save_to_file<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> JsonResult<()> {
    let text = to_string(value, pretty)?;
    fs::write_string(path, &text).map_err(|e| {
        JsonError::new(
            JsonErrorKind::FileNotFound,
            format!("Failed to write JSON file: {}", e.message),
            path.display().to_string(),
        )
    })
}

/// Walk nested objects along `keys`.
pub fn lookup<'a>(value: &'a Value, keys: &[&str]) -> JsonResult<&'a Value> {
    let mut current = value;
    for (depth, key) in keys.iter().enumerate() {
        let walked = keys[..depth].join(".");
        let object = current.as_object().ok_or_else(|| {
            JsonError::new(
                JsonErrorKind::InvalidStructure,
                "Expected a JSON object",
                if walked.is_empty() { "<root>".to_string() } else { walked },
            )
        })?;
        current = object.get(*key).ok_or_else(|| {
            JsonError::new(
                JsonErrorKind::MissingKey,
                "Key not found",
                keys[..=depth].join("."),
            )
        })?;
    }
    Ok(current)
}

/// `lookup` a string leaf.
pub fn lookup_str<'a>(value: &'a Value, keys: &[&str]) -> JsonResult<&'a str> {
    lookup(value, keys)?.as_str().ok_or_else(|| {
        JsonError::new(
            JsonErrorKind::InvalidType,
            "Expected a string value",
            keys.join("."),
        )
    })
}

// NixonKit - platform/mod.rs
//
// Platform layer: filesystem and JSON helpers returning typed results,
// platform identity and executable location, asset discovery, custom
// strings, platform directories and config.toml loading.
// Dependencies: standard library, serde_json, toml, directories.

pub mod assets;
pub mod config;
pub mod fs;
pub mod info;
pub mod json;
pub mod strings;

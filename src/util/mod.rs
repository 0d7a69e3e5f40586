// NixonKit - util/mod.rs
//
// Utility modules: error types, named constants, tracing bridge.

pub mod constants;
pub mod error;
pub mod logging;

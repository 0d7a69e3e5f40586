// NixonKit - core/mod.rs
//
// Logging core: levels, the logger capability, deferred streams, the console
// and null implementations, and the factory that builds them.
// Depends on util only; must NOT depend on platform.

pub mod console;
pub mod factory;
pub mod level;
pub mod logger;
pub mod null;
pub mod stream;

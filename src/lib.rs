// NixonKit - lib.rs
//
// Library entry point: the logging core, the typed error convention, the
// platform helpers built on them, and the toolkit handle that ties a logger
// to an asset directory. The binary in `main.rs` is a thin CLI over this
// surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::context::{AppContext, Toolkit};
pub use crate::core::console::ConsoleLogger;
pub use crate::core::factory::{create, LoggerConfig, LoggerKind};
pub use crate::core::level::Level;
pub use crate::core::logger::{Logger, SharedLogger};
pub use crate::core::null::NullLogger;
pub use crate::core::stream::{LogStream, LoggerStreamExt};
pub use crate::util::error::{
    FileError, FileErrorKind, FileResult, JsonError, JsonErrorKind, JsonResult, ResultExt,
};

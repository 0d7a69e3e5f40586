// NixonKit - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Logger configuration (config.toml, then CLI overrides)
// 3. Routing the toolkit's own diagnostics into the logger
// 4. Emitting the requested messages and custom strings
//
// A failed operation is printed as its rendered error and mapped to exit 1.

use clap::Parser;
use nixonkit::app::context::{AppContext, Toolkit};
use nixonkit::core::factory::{self, LoggerKind};
use nixonkit::core::level::Level;
use nixonkit::core::stream::LoggerStreamExt;
use nixonkit::platform::assets::AssetManager;
use nixonkit::platform::config::{self, LoadedConfig, PlatformPaths};
use nixonkit::platform::{fs, info};
use nixonkit::util::{constants, error, logging};
use std::path::PathBuf;
use std::sync::Arc;

/// NixonKit - emit messages through a configured console/file logger.
///
/// Each positional MESSAGE is logged at --level. Without messages, only the
/// startup banner is written.
#[derive(Parser, Debug)]
#[command(name = "NixonKit", version, about)]
struct Cli {
    /// Messages to log.
    messages: Vec<String>,

    /// Level for the messages (debug, info, warning, error, critical).
    #[arg(short = 'l', long = "level", default_value = "info")]
    level: Level,

    /// Minimum level written (overrides config.toml).
    #[arg(short = 't', long = "threshold")]
    threshold: Option<Level>,

    /// Logger kind: console, file or null (overrides config.toml).
    #[arg(short = 'k', long = "kind")]
    kind: Option<LoggerKind>,

    /// Mirror output to this file (append mode).
    #[arg(short = 'o', long = "log-file")]
    log_file: Option<PathBuf>,

    /// Application prefix for the header.
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Caller tag for the messages.
    #[arg(short = 'c', long = "caller", default_value = "")]
    caller: String,

    /// Disable coloured output.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Config file (default: platform config directory). Must exist when given.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Asset directory (default: discovered next to the executable).
    #[arg(long = "assets")]
    assets: Option<PathBuf>,

    /// Custom string ID to look up in the asset directory and log.
    #[arg(short = 's', long = "string")]
    strings: Vec<String>,

    /// Locale for --string lookups.
    #[arg(long = "locale", default_value = "en")]
    locale: String,

    /// Enable debug diagnostics from the toolkit itself.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let platform_paths = PlatformPaths::resolve();

    // An explicit --config must load; the default location may be absent.
    let (loaded, warnings) = match cli.config {
        Some(ref path) => config::load_config_file(path)?,
        None => config::load_config(&platform_paths.config_file()),
    };
    let LoadedConfig {
        kind: config_kind,
        logger: mut logger_config,
    } = loaded;

    if let Some(threshold) = cli.threshold {
        logger_config.level = threshold;
    }
    if let Some(ref path) = cli.log_file {
        logger_config.log_file_path = Some(path.clone());
        logger_config.enable_file_logging = true;
    }
    if let Some(ref prefix) = cli.prefix {
        logger_config.app_prefix = prefix.clone();
    }
    if cli.no_color {
        logger_config.color_output = false;
    }
    let kind = cli.kind.unwrap_or(config_kind);
    if kind == LoggerKind::File && logger_config.log_file_path.is_none() {
        logger_config.log_file_path = Some(platform_paths.default_log_file());
    }

    if kind == LoggerKind::File || logger_config.enable_file_logging {
        if let Some(parent) = logger_config
            .log_file_path
            .as_deref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }
    }

    // Build without emitting, so sink problems reach the logger once the
    // bridge is installed.
    let (logger, sink_warnings) = factory::create_reporting(kind, &logger_config);
    logging::init(logger.clone(), cli.debug, Some(logger_config.level));

    for warning in &warnings {
        logger.warning(warning, "config");
    }
    for warning in &sink_warnings {
        logger.warning(warning, "factory");
    }

    logger
        .debug_stream("main")
        .append(constants::APP_NAME)
        .append(" v")
        .append(constants::APP_VERSION)
        .append(" on ")
        .append(info::platform_name())
        .append(", logger=")
        .append(kind);

    for message in &cli.messages {
        logger.log(cli.level, message, &cli.caller);
    }

    if !cli.strings.is_empty() || cli.assets.is_some() {
        let assets = match cli.assets {
            Some(ref dir) => AssetManager::new(dir),
            None => AssetManager::for_current_exe(constants::APP_NAME)?,
        };
        let toolkit = Toolkit::new(AppContext::new(Some(logger.clone()), Some(Arc::new(assets))));
        if !cli.strings.is_empty() {
            let strings = toolkit.strings()?;
            for id in &cli.strings {
                match strings.localized(id, &cli.locale) {
                    Some(text) => logger.log(cli.level, &text, &cli.caller),
                    None => logger.warning(&format!("No custom string '{id}'"), "strings"),
                }
            }
        }
    }

    tracing::debug!(count = cli.messages.len(), "Messages emitted");
    logger.disable_file_logging();
    Ok(())
}

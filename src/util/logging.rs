//! Diagnostic logging for llm-cli
//!
//! Logs go to stderr through `tracing-subscriber` so they never mix with the
//! answer printed on stdout. The default level is WARN; `--verbose` raises it
//! to DEBUG and `--log-level` sets it explicitly. When `RUST_LOG` is set it
//! takes over filtering entirely. `--log-format json` switches to JSON lines.
//!
//! # Example
//!
//! ```no_run
//! use llm_cli::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!("logging ready");
//! ```

use crate::cli::commands::{CliArgs, LogFormatArg};
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// The library crate and the `llm` binary
const OWN_TARGETS: &[&str] = &["llm_cli", "llm"];

/// Targets that are noisy at debug level
const QUIET_TARGETS: &[&str] = &["h2=warn", "hyper=warn", "hyper_util=warn", "reqwest=warn"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Emit JSON lines instead of human-readable text
    pub use_json: bool,

    /// Include the module target (e.g. llm_cli::ai::ollama)
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// `--log-level` wins over `--verbose`, which wins over the default
    pub fn from_args(args: &CliArgs) -> Self {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };

        Self {
            level,
            use_json: args.log_format == LogFormatArg::Json,
            ..Default::default()
        }
    }
}

/// Parses a level name case-insensitively, falling back to WARN
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut filter = EnvFilter::new("warn");
    let own: Vec<String> = OWN_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, config.level))
        .collect();
    for raw in own.iter().map(String::as_str).chain(QUIET_TARGETS.iter().copied()) {
        match raw.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring invalid log directive '{}': {}", raw, e),
        }
    }
    filter
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(&config);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

//! Structured logging initialization
//!
//! Routing emits `tracing` events with structured fields (`template`,
//! `path`, `handler_name`, `duration_us`). This module installs a
//! `tracing-subscriber` formatter for binaries that do not bring their own:
//! JSON for production, pretty-print for development.

use anyhow::{anyhow, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated, e.g. `ctrlroute::router=debug`)
    pub target_filter: Option<String>,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("CTRLROUTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("CTRLROUTE_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("CTRLROUTE_LOG_TARGET_FILTER").ok(),
        }
    }

    /// Create a default configuration for local development
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
        }
    }

    /// Configuration for the `ctrlroute` binary.
    ///
    /// `--verbose` switches to [`default_dev`](Self::default_dev) while
    /// keeping any `CTRLROUTE_LOG_TARGET_FILTER` directives.
    pub fn for_cli(verbose: bool) -> Self {
        let env_config = Self::from_env();
        if verbose {
            Self {
                target_filter: env_config.target_filter,
                ..Self::default_dev()
            }
        } else {
            env_config
        }
    }

    /// Build the `EnvFilter` for this configuration.
    ///
    /// `RUST_LOG` takes precedence over `log_level` when set. Invalid
    /// directives in `target_filter` are skipped with a warning on stderr.
    pub fn env_filter(&self) -> EnvFilter {
        let level = parse_level(&self.log_level);
        let mut env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
                }
            }
        }

        env_filter
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging from `CTRLROUTE_LOG_*` environment variables.
///
/// # Example
///
/// ```no_run
/// use ctrlroute::logging;
///
/// logging::init_logging().expect("Failed to initialize logging");
/// ```
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialize logging with an explicit configuration
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let env_filter = config.env_filter();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

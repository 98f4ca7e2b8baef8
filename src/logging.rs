//! Structured logging initialization
//!
//! Logs go to stderr so that `newc inspect` can keep stdout for JSON output.
//!
//! ## Environment Variables
//!
//! - `NEWC_LOG_LEVEL` - trace/debug/info/warn/error (default: `warn`)
//! - `NEWC_LOG_FORMAT` - `pretty` (default) or `json`
//! - `NEWC_LOG_LOCATION` - `true` to include file:line in each record
//! - `RUST_LOG` - full `EnvFilter` directives, takes precedence over the level

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for machines, pretty-print for terminals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
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
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("NEWC_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: env::var("NEWC_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.format),
            include_location: env::var("NEWC_LOG_LOCATION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.include_location),
        }
    }

    /// Raise the level to at least `debug` (`--verbose`)
    pub fn verbose(mut self) -> Self {
        if matches!(self.log_level.as_str(), "warn" | "error" | "info") {
            self.log_level = "debug".to_string();
        }
        self
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

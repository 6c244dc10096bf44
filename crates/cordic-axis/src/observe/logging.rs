//! # Structured Logging
//!
//! `tracing-subscriber` setup with a choice of output format and level
//! filtering. `RUST_LOG` overrides the configured level unless an explicit
//! filter string is given.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cordic_axis::observe::{init_logging, LogConfig, LogLevel};
//!
//! init_logging(&LogConfig {
//!     level: LogLevel::Debug,
//!     ..Default::default()
//! });
//!
//! tracing::info!(beats = 65536, "Sweep complete");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every transfer (very verbose for sweeps)
    Trace,
    /// Reset edges and configuration
    Debug,
    /// Run summaries (default)
    #[default]
    Info,
    /// Timeouts and suspicious configuration
    Warn,
    /// Errors only
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line, human-readable
    Pretty,
    /// One line per event
    #[default]
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source location (file:line)
    pub source_location: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Explicit filter directive (e.g. "cordic_axis::pipeline=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            source_location: false,
            thread_ids: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable output with source locations.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            ..Default::default()
        }
    }

    /// Machine-readable output for CI logs.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            ..Default::default()
        }
    }

    /// Errors only.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            ..Default::default()
        }
    }

    /// Filter directive this configuration resolves to, ignoring `RUST_LOG`.
    pub fn directive(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| self.level.to_string())
    }
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    match config.filter {
        Some(ref custom) => {
            EnvFilter::try_new(custom).unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
    }
}

/// Initialize the global logging subscriber.
///
/// Call once at startup. Later calls (e.g. from several tests in one
/// process) are ignored.
pub fn init_logging(config: &LogConfig) {
    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_ids(config.thread_ids)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_ids(config.thread_ids)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_ids(config.thread_ids)
            .boxed(),
    };

    // Ignore error if subscriber was already set
    let _ = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Trace.to_string(), "trace");
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_config_presets() {
        let dev = LogConfig::development();
        assert_eq!(dev.level, LogLevel::Debug);
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.source_location);

        assert_eq!(LogConfig::production().format, LogFormat::Json);
        assert_eq!(LogConfig::quiet().level, LogLevel::Error);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogConfig::default().directive(), "info");
        let custom = LogConfig {
            filter: Some("cordic_axis::pipeline=trace".to_string()),
            ..Default::default()
        };
        assert_eq!(custom.directive(), "cordic_axis::pipeline=trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(&LogConfig::quiet());
        init_logging(&LogConfig::development());
        tracing::info!("logging initialised");
    }
}

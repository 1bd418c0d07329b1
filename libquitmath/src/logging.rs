//! Logging setup shared by the Quit-Math binaries
//!
//! Supports:
//! - Text, JSON, and pretty-printed output
//! - Level from `QUITMATH_LOG_LEVEL`, overridden per module by `RUST_LOG`
//! - Writing to a file instead of stderr, which the terminal UI needs since
//!   it owns the screen
//!
//! # Examples
//!
//! ```no_run
//! use libquitmath::logging::{LoggingConfig, LogFormat};
//!
//! LoggingConfig::new(LogFormat::Json, "debug".to_string(), false)
//!     .with_file("/tmp/quitmath.log")
//!     .init()
//!     .expect("logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line output with source locations
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// * `level` - minimum level (error, warn, info, debug, trace)
    /// * `verbose` - use debug regardless of `level`
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            file: None,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    fn filter(&self) -> EnvFilter {
        let level = if self.verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    fn writer(&self) -> io::Result<BoxMakeWriter> {
        match &self.file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
            None => Ok(BoxMakeWriter::new(io::stderr)),
        }
    }

    /// Install the global subscriber
    ///
    /// Call once at startup.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be opened or a subscriber is already
    /// installed.
    pub fn init(&self) -> io::Result<()> {
        let filter = self.filter();
        let writer = self.writer()?;
        let ansi = self.file.is_none();

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        installed.map_err(|e| io::Error::other(e.to_string()))
    }
}

/// Settings from `QUITMATH_LOG_FORMAT` and `QUITMATH_LOG_LEVEL`
///
/// Falls back to text at info.
pub fn config_from_env() -> LoggingConfig {
    let format = std::env::var("QUITMATH_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("QUITMATH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, false)
}

/// Log to stderr using the environment settings
pub fn init_default() -> io::Result<()> {
    config_from_env().init()
}

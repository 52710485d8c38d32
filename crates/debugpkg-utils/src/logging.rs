//! # Logging Utilities
//!
//! Logging infrastructure for debugpkg using `tracing`.
//!
//! Console logs are written to **stderr**. Suggestions are the program's
//! output and go to stdout; keeping diagnostics off that stream means a log
//! line can never land in the middle of an install command.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debugpkg_utils::init_logging;
//!
//! // Initialize with default settings (reads from RUST_LOG env var)
//! let _guard = init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("Session started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=debugpkg_core=trace`)
//! - `DEBUGPKG_LOG_FORMAT`: Set output format (`json` or `pretty`, default: `pretty`)
//! - `DEBUGPKG_LOG_FILE`: Optional path to log file (if not set, logs only to stderr)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    Pretty,
    /// JSON format, one object per line
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level (default)
    Warn,
    /// Info level
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(format!(
                "{s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            ))),
        }
    }
}

/// Keeps the background log file writer alive
///
/// Buffered file output is flushed when this is dropped, so hold it until
/// the program exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging with default settings
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `debugpkg_core=debug`)
/// - `DEBUGPKG_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
/// - `DEBUGPKG_LOG_FILE`: Optional path to log file
///
/// Defaults to `WARN` so an interactive session stays quiet.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the log file
/// directory cannot be created.
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    let format = env::var("DEBUGPKG_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::from_str(&s).ok())
        .unwrap_or(LogFormat::Pretty);

    init_logging_internal(format, None)
}

/// Initialize logging with explicit level and format
///
/// The explicit level takes precedence over `RUST_LOG`.
///
/// ## Example
///
/// ```rust,no_run
/// use debugpkg_utils::{LogFormat, LogLevel, init_logging_with_level};
///
/// let _guard = init_logging_with_level(LogLevel::Debug, LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_logging_internal(format, Some(level.into()))
}

/// Build the filter
///
/// Priority:
/// 1. An explicit level (from the `--log-level` flag)
/// 2. `RUST_LOG`, which allows module-specific filters
/// 3. `WARN`
fn build_filter(explicit_level: Option<Level>) -> EnvFilter
{
    match explicit_level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string())),
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, filter: EnvFilter, path: &Path) -> Result<(BoxedLayer, WorkerGuard), LoggingError>
{
    let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;
    let file_appender = tracing_appender::rolling::daily(directory, path.file_name().unwrap_or_default());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    let boxed = match format {
        LogFormat::Pretty => layer.with_ansi(false).with_filter(filter).boxed(), // No ANSI in files
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };
    Ok((boxed, guard))
}

/// Internal initialization function
fn init_logging_internal(format: LogFormat, explicit_level: Option<Level>) -> Result<LoggingGuard, LoggingError>
{
    let log_file = env::var("DEBUGPKG_LOG_FILE").ok().map(PathBuf::from);

    let mut layers = vec![stderr_layer(format, build_filter(explicit_level))];
    let mut file_guard = None;
    if let Some(path) = log_file {
        let (layer, guard) = file_layer(format, build_filter(explicit_level), &path)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(LoggingGuard { _file: file_guard })
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("dev").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("prod").unwrap(), LogFormat::Json);
        assert!(matches!(
            LogFormat::from_str("invalid"),
            Err(LoggingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(matches!(
            LogLevel::from_str("loud"),
            Err(LoggingError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_explicit_level_wins()
    {
        let filter = build_filter(Some(Level::DEBUG));
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::DEBUG));
    }
}

//! # Error Types
//!
//! General error handling for the suggestion engine.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use thiserror::Error;

/// Main error type for suggestion engine operations
///
/// Only the command layer surfaces these to the user. Detection handlers
/// swallow them and degrade to "no suggestion", so a failing package query
/// can never disturb the debugging session itself.
///
/// ## Error Categories
///
/// 1. **Query errors**: PackageQuery
/// 2. **Resolver errors**: ResolverSpawn, ResolverTimeout, ProbeDisconnected
/// 3. **Capability errors**: CapabilityUnavailable
/// 4. **Command errors**: UnexpectedArguments, UnknownCommand, UnknownSetting, InvalidSettingValue
/// 5. **Input errors**: InvalidBuildId
/// 6. **I/O errors**: Io
#[derive(Error, Debug)]
pub enum SuggestError
{
    /// The package database query failed
    ///
    /// The string carries the failing query and whatever the package manager
    /// printed on stderr.
    #[error("Package query failed: {0}")]
    PackageQuery(String),

    /// The external provider query could not be started
    ///
    /// Usually `dnf` is not installed or not on `PATH`.
    #[error("Failed to run package provider query: {0}")]
    ResolverSpawn(#[source] std::io::Error),

    /// The external provider query ran longer than its wall-clock limit
    #[error("Package provider query timed out after {}s", .limit.as_secs_f64())]
    ResolverTimeout
    {
        /// The limit that was exceeded
        limit: std::time::Duration,
    },

    /// The background probe finished without handing back a result
    ///
    /// This only happens if the worker thread panicked.
    #[error("Background package probe ended without a result")]
    ProbeDisconnected,

    /// The package query capability is not available on this host
    ///
    /// Reported by every suggestion command once the engine has been
    /// started without access to the package database.
    #[error("{0}")]
    CapabilityUnavailable(String),

    /// A command was given arguments it does not accept
    #[error("unexpected arguments: {0}")]
    UnexpectedArguments(String),

    /// The command line did not name a known command
    #[error("Undefined command: \"{0}\"")]
    UnknownCommand(String),

    /// `set`/`show` named a setting that does not exist
    #[error("Unknown setting: \"{0}\"")]
    UnknownSetting(String),

    /// A setting was given a value it cannot take
    #[error("Invalid value \"{value}\" for setting {setting}")]
    InvalidSettingValue
    {
        /// Name of the setting
        setting: String,
        /// The rejected value
        value: String,
    },

    /// A build-id was not a hex string long enough to split into a path
    #[error("Invalid build-id: \"{0}\"")]
    InvalidBuildId(String),

    /// I/O error
    ///
    /// Raised when writing suggestion text to the session output fails.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, SuggestError>`
///
/// ```rust
/// use debugpkg_core::error::SuggestResult;
/// fn foo() -> SuggestResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type SuggestResult<T> = std::result::Result<T, SuggestError>;

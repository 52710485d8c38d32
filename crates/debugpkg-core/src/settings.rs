//! # Settings
//!
//! The user-adjustable knobs of the suggestion engine.
//!
//! Defaults come from [`Settings::default`], are overridden by environment
//! variables in [`Settings::from_env`], and can then be changed at any point
//! of the session with `set <name> <value>`.
//!
//! ## Environment Variables
//!
//! - `DEBUGPKG_ENABLED`: master switch (`on`/`off`, default: `on`)
//! - `DEBUGPKG_MODE`: build-id resolution mode (`fast` or `slow`, default: `fast`)
//! - `DEBUGPKG_DEBUG_FILE_DIRECTORY`: `:`-separated debug search path (default: `/usr/lib/debug`)

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{SuggestError, SuggestResult};
use crate::types::build_id::{SYSTEM_DEBUG_ROOT, SYSTEM_LIB_ROOT};

/// Setting name of the master switch.
pub const ENABLED_SETTING: &str = "suggestions.enabled";
/// Setting name of the resolution mode.
pub const MODE_SETTING: &str = "suggestions.mode";
/// Setting name of the debug search path.
pub const DEBUG_FILE_DIRECTORY_SETTING: &str = "debug-file-directory";

/// How a missing build-id is turned into a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode
{
    /// Suggest installing by `.build-id` path and let the package manager
    /// work out which package provides it. No lookups, no delay.
    #[default]
    Fast,
    /// Query the package index for the exact packages first and only
    /// suggest packages that exist and are not installed. Can take seconds.
    Slow,
}

impl FromStr for ResolutionMode
{
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "slow" => Ok(Self::Slow),
            other => Err(SuggestError::InvalidSettingValue {
                setting: MODE_SETTING.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResolutionMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Slow => write!(f, "slow"),
        }
    }
}

/// Parse a boolean setting value.
///
/// ## Errors
///
/// `InvalidSettingValue` naming `setting` if the text is not a recognised
/// boolean spelling.
pub fn parse_bool(setting: &str, value: &str) -> SuggestResult<bool>
{
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" | "enable" => Ok(true),
        "off" | "false" | "0" | "no" | "disable" => Ok(false),
        _ => Err(SuggestError::InvalidSettingValue {
            setting: setting.to_string(),
            value: value.trim().to_string(),
        }),
    }
}

fn format_bool(value: bool) -> &'static str
{
    if value {
        "on"
    } else {
        "off"
    }
}

/// Session settings consulted by the detection handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings
{
    /// Master gate. When `false` nothing is detected, resolved or announced.
    pub enabled: bool,
    /// Strategy for missing build-ids.
    pub mode: ResolutionMode,
    /// The session's debug search path, entries separated by `:`.
    pub debug_file_directory: String,
}

impl Default for Settings
{
    fn default() -> Self
    {
        Self {
            enabled: true,
            mode: ResolutionMode::Fast,
            debug_file_directory: SYSTEM_DEBUG_ROOT.to_string(),
        }
    }
}

impl Settings
{
    /// Defaults overridden by `DEBUGPKG_*` environment variables
    ///
    /// Invalid values are logged and ignored rather than failing startup.
    #[must_use]
    pub fn from_env() -> Self
    {
        let mut settings = Self::default();
        for (var, setting) in [
            ("DEBUGPKG_ENABLED", ENABLED_SETTING),
            ("DEBUGPKG_MODE", MODE_SETTING),
            ("DEBUGPKG_DEBUG_FILE_DIRECTORY", DEBUG_FILE_DIRECTORY_SETTING),
        ] {
            if let Ok(value) = env::var(var) {
                if let Err(err) = settings.set(setting, &value) {
                    warn!(variable = var, %value, "ignoring environment override: {err}");
                }
            }
        }
        settings
    }

    /// Whether the debug search path includes the system library tree
    ///
    /// System packages install their debug information under `/usr/lib`. If
    /// the session is not looking there, installing a package would not help,
    /// so no suggestion is worth making.
    #[must_use]
    pub fn uses_system_debug_root(&self) -> bool
    {
        self.debug_file_directory
            .split(':')
            .any(|dir| dir.starts_with(SYSTEM_LIB_ROOT))
    }

    /// Both detection gates: the master switch and the search path.
    #[must_use]
    pub fn suggestions_active(&self) -> bool
    {
        self.enabled && self.uses_system_debug_root()
    }

    /// Change a setting by name
    ///
    /// The value is validated before anything is changed.
    ///
    /// ## Errors
    ///
    /// - `UnknownSetting` if `name` is not a setting
    /// - `InvalidSettingValue` if the value does not parse
    pub fn set(&mut self, name: &str, value: &str) -> SuggestResult<()>
    {
        match name {
            ENABLED_SETTING => self.enabled = parse_bool(name, value)?,
            MODE_SETTING => self.mode = value.parse()?,
            DEBUG_FILE_DIRECTORY_SETTING => self.debug_file_directory = value.trim().to_string(),
            other => return Err(SuggestError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }

    /// Describe the current value of a setting
    ///
    /// ## Errors
    ///
    /// `UnknownSetting` if `name` is not a setting.
    pub fn show(&self, name: &str) -> SuggestResult<String>
    {
        let value = match name {
            ENABLED_SETTING => format_bool(self.enabled).to_string(),
            MODE_SETTING => self.mode.to_string(),
            DEBUG_FILE_DIRECTORY_SETTING => self.debug_file_directory.clone(),
            other => return Err(SuggestError::UnknownSetting(other.to_string())),
        };
        Ok(format!("{name} is \"{value}\"."))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_defaults()
    {
        let settings = Settings::default();
        assert!(settings.enabled);
        assert_eq!(settings.mode, ResolutionMode::Fast);
        assert!(settings.suggestions_active());
    }

    #[test]
    fn test_mode_from_str()
    {
        assert_eq!("fast".parse::<ResolutionMode>().unwrap(), ResolutionMode::Fast);
        assert_eq!("SLOW".parse::<ResolutionMode>().unwrap(), ResolutionMode::Slow);
        assert!("medium".parse::<ResolutionMode>().is_err());
    }

    #[test]
    fn test_system_debug_root_gate()
    {
        let mut settings = Settings::default();
        settings.debug_file_directory = "/opt/debug:/usr/lib/debug".to_string();
        assert!(settings.uses_system_debug_root());

        settings.debug_file_directory = "/opt/debug:/home/me/debug".to_string();
        assert!(!settings.uses_system_debug_root());
        assert!(!settings.suggestions_active());
    }

    #[test]
    fn test_disabled_gate()
    {
        let mut settings = Settings::default();
        settings.set(ENABLED_SETTING, "off").unwrap();
        assert!(!settings.suggestions_active());
    }

    #[test]
    fn test_set_rejects_bad_value_without_change()
    {
        let mut settings = Settings::default();
        let err = settings.set(MODE_SETTING, "turbo").unwrap_err();
        assert!(err.to_string().contains("turbo"));
        assert_eq!(settings, Settings::default());

        assert!(matches!(
            settings.set("suggestions.colour", "on"),
            Err(SuggestError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_show_formats_value()
    {
        let mut settings = Settings::default();
        settings.set(MODE_SETTING, "slow").unwrap();
        assert_eq!(settings.show(MODE_SETTING).unwrap(), "suggestions.mode is \"slow\".");
        assert_eq!(settings.show(ENABLED_SETTING).unwrap(), "suggestions.enabled is \"on\".");
    }
}

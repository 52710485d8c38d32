//! User commands understood by the session.
//!
//! ## Commands
//!
//! - `show-suggestions` (also `info rpm-suggestions`): list every suggestion
//!   made since the executable last changed. Takes no arguments.
//! - `set <setting> <value>`: change a setting.
//! - `show <setting>`: print a setting's current value.
//!
//! Settings are `suggestions.enabled`, `suggestions.mode` and
//! `debug-file-directory`; see [`crate::settings`].

use crate::error::{SuggestError, SuggestResult};

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand
{
    /// Re-list all suggestions.
    ShowSuggestions,
    /// Change a setting.
    Set
    {
        /// Setting name
        setting: String,
        /// New value, as typed
        value: String,
    },
    /// Print a setting.
    Show
    {
        /// Setting name
        setting: String,
    },
}

impl SessionCommand
{
    /// Parse one command line
    ///
    /// ## Errors
    ///
    /// - `UnexpectedArguments` naming any trailing text a command does not take
    /// - `InvalidSettingValue` if `set` has no value
    /// - `UnknownCommand` for anything else
    pub fn parse(line: &str) -> SuggestResult<Self>
    {
        let line = line.trim();
        let (word, rest) = split_word(line);

        match word {
            "show-suggestions" => no_arguments(rest).map(|()| Self::ShowSuggestions),
            "info" => match split_word(rest) {
                ("rpm-suggestions", args) => no_arguments(args).map(|()| Self::ShowSuggestions),
                _ => Err(SuggestError::UnknownCommand(line.to_string())),
            },
            "set" => {
                let (setting, value) = split_word(rest);
                if setting.is_empty() {
                    return Err(SuggestError::UnknownCommand(line.to_string()));
                }
                if value.is_empty() {
                    return Err(SuggestError::InvalidSettingValue {
                        setting: setting.to_string(),
                        value: String::new(),
                    });
                }
                Ok(Self::Set {
                    setting: setting.to_string(),
                    value: value.to_string(),
                })
            }
            "show" => {
                let (setting, args) = split_word(rest);
                if setting.is_empty() {
                    return Err(SuggestError::UnknownCommand(line.to_string()));
                }
                no_arguments(args).map(|()| Self::Show {
                    setting: setting.to_string(),
                })
            }
            _ => Err(SuggestError::UnknownCommand(line.to_string())),
        }
    }
}

/// Split off the first whitespace-separated word; the rest is trimmed.
pub(crate) fn split_word(text: &str) -> (&str, &str)
{
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim()),
        None => (text, ""),
    }
}

fn no_arguments(args: &str) -> SuggestResult<()>
{
    if args.is_empty() {
        Ok(())
    } else {
        Err(SuggestError::UnexpectedArguments(args.to_string()))
    }
}

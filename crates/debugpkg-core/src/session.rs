//! # Session
//!
//! Binds the suggestion engine to a debugging session.
//!
//! A [`Session`] owns the settings and the engine for the lifetime of one
//! debugging session and routes host events and user commands to them. Hosts
//! that embed the engine call [`Session::handle_event`] from their event
//! hooks; the `debugpkg` binary instead feeds it a script, one line at a
//! time, through [`Session::run_line`].
//!
//! ## Script lines
//!
//! ```text
//! missing-debug /usr/lib64/libfoo.so.1
//! missing-file abcdef1234567890 /usr/lib64/libbar.so
//! prompt
//! exec-changed reload
//! show-suggestions
//! set suggestions.mode slow
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::Write;

use tracing::{debug, info};

use crate::commands::{split_word, SessionCommand};
use crate::engine::SuggestionEngine;
use crate::error::{SuggestError, SuggestResult};
use crate::events::SessionEvent;
use crate::settings::Settings;
use crate::types::BuildId;

/// One line of a session script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine
{
    /// A host event
    Event(SessionEvent),
    /// A user command
    Command(SessionCommand),
}

impl ScriptLine
{
    /// Parse a script line. Returns `Ok(None)` for blank and comment lines.
    ///
    /// ## Errors
    ///
    /// - `InvalidBuildId` for a `missing-file` line with a bad build-id
    /// - `UnexpectedArguments` for extra text after an event
    /// - any error from [`SessionCommand::parse`]
    pub fn parse(line: &str) -> SuggestResult<Option<Self>>
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = split_word(trimmed);
        let event = match word {
            "missing-debug" => {
                if rest.is_empty() {
                    return Err(SuggestError::UnknownCommand(trimmed.to_string()));
                }
                SessionEvent::MissingDebugInfo {
                    objfile: rest.to_string(),
                }
            }
            "missing-file" => {
                let (build_id, filename) = split_word(rest);
                SessionEvent::MissingObjectFile {
                    build_id: BuildId::parse(build_id)?,
                    filename: (!filename.is_empty()).then(|| filename.to_string()),
                }
            }
            "prompt" => {
                expect_no_arguments(rest)?;
                SessionEvent::BeforePrompt
            }
            "exec-changed" => match rest {
                "" => SessionEvent::ExecutableChanged { reload: false },
                "reload" => SessionEvent::ExecutableChanged { reload: true },
                other => return Err(SuggestError::UnexpectedArguments(other.to_string())),
            },
            _ => return SessionCommand::parse(trimmed).map(|command| Some(Self::Command(command))),
        };
        Ok(Some(Self::Event(event)))
    }
}

fn expect_no_arguments(rest: &str) -> SuggestResult<()>
{
    if rest.is_empty() {
        Ok(())
    } else {
        Err(SuggestError::UnexpectedArguments(rest.to_string()))
    }
}

/// A debugging session with suggestions attached
pub struct Session
{
    settings: Settings,
    engine: Box<dyn SuggestionEngine>,
}

impl Session
{
    /// Start a session.
    #[must_use]
    pub fn new(settings: Settings, engine: Box<dyn SuggestionEngine>) -> Self
    {
        Self { settings, engine }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings
    {
        &self.settings
    }

    /// Mutable access to the settings.
    pub fn settings_mut(&mut self) -> &mut Settings
    {
        &mut self.settings
    }

    /// Route a host event to the engine
    ///
    /// Returns whether the event was handled. Detection events are never
    /// handled: the engine only records advice.
    ///
    /// ## Errors
    ///
    /// `Io` if announcing suggestions at a prompt fails to write.
    pub fn handle_event(&mut self, event: &SessionEvent, out: &mut dyn Write) -> SuggestResult<bool>
    {
        debug!(event = %event.describe(), "session event");
        let handled = match event {
            SessionEvent::MissingDebugInfo { objfile } => self.engine.on_missing_debug_info(&self.settings, objfile, out),
            SessionEvent::MissingObjectFile { build_id, filename } => {
                self.engine
                    .on_missing_object_file(&self.settings, build_id, filename.as_deref(), out)
            }
            SessionEvent::BeforePrompt => {
                self.engine.on_before_prompt(out)?;
                false
            }
            SessionEvent::ExecutableChanged { reload } => {
                self.engine.on_executable_changed(*reload);
                false
            }
        };
        Ok(handled)
    }

    /// Run a user command
    ///
    /// Nothing is changed when the command fails.
    ///
    /// ## Errors
    ///
    /// Whatever the command reports: bad settings, unavailable capability,
    /// or a failed write.
    pub fn execute(&mut self, command: &SessionCommand, out: &mut dyn Write) -> SuggestResult<()>
    {
        match command {
            SessionCommand::ShowSuggestions => self.engine.show_suggestions(out),
            SessionCommand::Set { setting, value } => {
                self.settings.set(setting, value)?;
                info!(setting, value, "setting changed");
                Ok(())
            }
            SessionCommand::Show { setting } => {
                let text = self.settings.show(setting)?;
                writeln!(out, "{text}")?;
                Ok(())
            }
        }
    }

    /// Parse and run one script line
    ///
    /// ## Errors
    ///
    /// Parse errors and any error from [`Self::handle_event`] or
    /// [`Self::execute`].
    pub fn run_line(&mut self, line: &str, out: &mut dyn Write) -> SuggestResult<()>
    {
        match ScriptLine::parse(line)? {
            None => Ok(()),
            Some(ScriptLine::Event(event)) => self.handle_event(&event, out).map(|_| ()),
            Some(ScriptLine::Command(command)) => self.execute(&command, out),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_events()
    {
        assert_eq!(ScriptLine::parse("   ").unwrap(), None);
        assert_eq!(ScriptLine::parse("# comment").unwrap(), None);
        assert_eq!(
            ScriptLine::parse("prompt").unwrap(),
            Some(ScriptLine::Event(SessionEvent::BeforePrompt))
        );
        assert_eq!(
            ScriptLine::parse("exec-changed reload").unwrap(),
            Some(ScriptLine::Event(SessionEvent::ExecutableChanged { reload: true }))
        );
        assert_eq!(
            ScriptLine::parse("missing-debug /usr/lib64/libz.so.1").unwrap(),
            Some(ScriptLine::Event(SessionEvent::MissingDebugInfo {
                objfile: "/usr/lib64/libz.so.1".to_string()
            }))
        );
        assert_eq!(
            ScriptLine::parse("missing-file ABC123").unwrap(),
            Some(ScriptLine::Event(SessionEvent::MissingObjectFile {
                build_id: BuildId::parse("abc123").unwrap(),
                filename: None,
            }))
        );
    }

    #[test]
    fn test_parse_rejects_bad_lines()
    {
        assert!(matches!(
            ScriptLine::parse("missing-file not-hex"),
            Err(SuggestError::InvalidBuildId(_))
        ));
        assert!(matches!(
            ScriptLine::parse("exec-changed sometimes"),
            Err(SuggestError::UnexpectedArguments(_))
        ));
        assert!(matches!(
            ScriptLine::parse("prompt now"),
            Err(SuggestError::UnexpectedArguments(_))
        ));
    }

    #[test]
    fn test_parse_falls_back_to_commands()
    {
        assert_eq!(
            ScriptLine::parse("show-suggestions").unwrap(),
            Some(ScriptLine::Command(SessionCommand::ShowSuggestions))
        );
    }
}

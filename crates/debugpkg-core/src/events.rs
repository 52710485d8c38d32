//! Session event types.
//!
//! The host debugging session reports the conditions the engine reacts to as
//! [`SessionEvent`]s. [`Session::handle_event`](crate::session::Session::handle_event)
//! routes each one to the matching [`SuggestionEngine`](crate::engine::SuggestionEngine)
//! handler.

use crate::types::BuildId;

/// Event emitted by the host session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent
{
    /// No debug information was found for a loaded file.
    MissingDebugInfo
    {
        /// Path of the loaded object file.
        objfile: String,
    },
    /// A file with a known build-id could not be found.
    MissingObjectFile
    {
        /// Build-id of the missing file.
        build_id: BuildId,
        /// File name the session looked for, if known.
        filename: Option<String>,
    },
    /// The prompt is about to be displayed.
    BeforePrompt,
    /// The program's executable was replaced or re-read.
    ExecutableChanged
    {
        /// `true` when the same executable was merely re-read.
        reload: bool,
    },
}

impl SessionEvent
{
    /// Human-readable description of the event.
    #[must_use]
    pub fn describe(&self) -> String
    {
        match self {
            Self::MissingDebugInfo { objfile } => format!("Missing debug information for {objfile}"),
            Self::MissingObjectFile { build_id, filename } => match filename {
                Some(name) => format!("Missing file {name} (build-id {build_id})"),
                None => format!("Missing file with build-id {build_id}"),
            },
            Self::BeforePrompt => "Before prompt".to_string(),
            Self::ExecutableChanged { reload: true } => "Executable reloaded".to_string(),
            Self::ExecutableChanged { reload: false } => "Executable changed".to_string(),
        }
    }
}

//! # debugpkg-core
//!
//! Debug package suggestions for interactive debugging sessions.
//!
//! When a session cannot find debug information for a loaded file, or cannot
//! find a file at all, this crate works out which packages would fix that and
//! prints the `dnf install` command to run at the next prompt. It never
//! installs anything itself.
//!
//! ## Pieces
//!
//! - [`package_db`]: "is this installed?" and "who owns this file?" queries
//! - [`resolver`]: build-id → package names via `dnf provides`
//! - [`cache`]: session-lifetime memo of build-id lookups
//! - [`store`]: what has been suggested, and what is still to be announced
//! - [`strategy`]: fast (suggest by path) and slow (resolve first) build-id handling
//! - [`probe`]: runs slow lookups on a worker thread without stalling the session
//! - [`engine`]: the handlers the session calls, plus the capability-less stub
//! - [`session`]: settings, events and commands wired together
//!
//! ## Example
//!
//! ```rust,no_run
//! use debugpkg_core::engine::create_engine;
//! use debugpkg_core::events::SessionEvent;
//! use debugpkg_core::session::Session;
//! use debugpkg_core::settings::Settings;
//! use debugpkg_core::types::BuildId;
//!
//! let mut session = Session::new(Settings::from_env(), create_engine());
//! let mut out = std::io::stdout();
//! let event = SessionEvent::MissingObjectFile {
//!     build_id: BuildId::parse("abcdef1234567890")?,
//!     filename: None,
//! };
//! session.handle_event(&event, &mut out)?;
//! session.handle_event(&SessionEvent::BeforePrompt, &mut out)?;
//! # Ok::<(), debugpkg_core::error::SuggestError>(())
//! ```

pub mod announce;
pub mod cache;
pub mod commands;
pub mod engine;
pub mod error;
pub mod events;
pub mod package_db;
pub mod prelude;
pub mod probe;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod store;
pub mod strategy;
pub mod types;

pub use engine::{create_engine, SuggestionEngine};
// Re-export commonly used types
pub use error::{SuggestError, SuggestResult};
pub use session::Session;
pub use settings::{ResolutionMode, Settings};
pub use types::{BuildId, PackageName};

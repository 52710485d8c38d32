//! Common module for library exports

pub use crate::engine::{create_engine, PackageSuggestions, SuggestionEngine, UnavailableSuggestions};
pub use crate::error::{SuggestError, SuggestResult};
pub use crate::events::SessionEvent;
pub use crate::package_db::PackageDatabase;
pub use crate::resolver::ProviderQuery;
pub use crate::session::Session;
pub use crate::settings::{ResolutionMode, Settings};
pub use crate::types::{BuildId, PackageMetadata, PackageName};

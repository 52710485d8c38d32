//! # Suggestion Store
//!
//! Session state recording what has been suggested.
//!
//! Two kinds of suggestion are tracked, package names and build-ids, and each
//! kind has two sets:
//!
//! - **all-time**: everything suggested since the executable last changed.
//!   Used to avoid repeating a suggestion and to answer `show-suggestions`.
//! - **pending**: everything suggested since the last prompt. Drained and
//!   announced each time the prompt is shown.
//!
//! Every pending entry is also an all-time entry, and an entry enters the
//! pending set at most once per executable.

use indexmap::IndexSet;
use tracing::debug;

use crate::types::{BuildId, PackageName};

/// Suggestions taken out of the store
///
/// Both lists are in the order the suggestions were first made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions
{
    /// Packages to install by name
    pub packages: Vec<PackageName>,
    /// Build-ids to install by `.build-id` path
    pub build_ids: Vec<BuildId>,
}

impl Suggestions
{
    /// Whether there is nothing to announce.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.packages.is_empty() && self.build_ids.is_empty()
    }
}

/// Session-scoped suggestion sets
#[derive(Debug, Default)]
pub struct SuggestionStore
{
    all_packages: IndexSet<PackageName>,
    pending_packages: IndexSet<PackageName>,
    all_build_ids: IndexSet<BuildId>,
    pending_build_ids: IndexSet<BuildId>,
}

impl SuggestionStore
{
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Suggest installing `package`
    ///
    /// Returns `false` and does nothing if it was already suggested for this
    /// executable.
    pub fn add_package_suggestion(&mut self, package: PackageName) -> bool
    {
        if self.all_packages.contains(&package) {
            return false;
        }
        debug!(%package, "new package suggestion");
        self.pending_packages.insert(package.clone());
        self.all_packages.insert(package);
        true
    }

    /// Suggest installing whatever provides `build_id`
    ///
    /// Returns `false` and does nothing if it was already suggested for this
    /// executable.
    pub fn add_build_id_suggestion(&mut self, build_id: BuildId) -> bool
    {
        if self.all_build_ids.contains(&build_id) {
            return false;
        }
        debug!(%build_id, "new build-id suggestion");
        self.pending_build_ids.insert(build_id.clone());
        self.all_build_ids.insert(build_id);
        true
    }

    /// Take everything suggested since the last drain
    ///
    /// Both pending sets are empty afterwards; the all-time sets are kept.
    pub fn drain_pending(&mut self) -> Suggestions
    {
        Suggestions {
            packages: self.pending_packages.drain(..).collect(),
            build_ids: self.pending_build_ids.drain(..).collect(),
        }
    }

    /// Everything suggested since the executable last changed.
    #[must_use]
    pub fn list_all(&self) -> Suggestions
    {
        Suggestions {
            packages: self.all_packages.iter().cloned().collect(),
            build_ids: self.all_build_ids.iter().cloned().collect(),
        }
    }

    /// Packages awaiting announcement.
    pub fn pending_packages(&self) -> impl Iterator<Item = &PackageName>
    {
        self.pending_packages.iter()
    }

    /// Build-ids awaiting announcement.
    pub fn pending_build_ids(&self) -> impl Iterator<Item = &BuildId>
    {
        self.pending_build_ids.iter()
    }

    /// Forget all suggestions
    ///
    /// Only for a genuine change of executable.
    pub fn reset(&mut self)
    {
        debug!(
            packages = self.all_packages.len(),
            build_ids = self.all_build_ids.len(),
            "clearing suggestions"
        );
        self.all_packages.clear();
        self.pending_packages.clear();
        self.all_build_ids.clear();
        self.pending_build_ids.clear();
    }
}

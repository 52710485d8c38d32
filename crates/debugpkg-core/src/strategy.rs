//! # Build-id Strategies
//!
//! Two interchangeable ways of turning a missing build-id into a suggestion:
//!
//! - [`FastStrategy`] records the build-id itself. The announcement then tells
//!   the user to install by `.build-id` path, leaving the package manager to
//!   find a provider. Costs nothing, but the command may install nothing.
//! - [`SlowStrategy`] resolves the build-id to concrete package names first,
//!   through the background probe, and caches the answer for the session.
//!
//! The active strategy is chosen per call from
//! [`Settings::mode`](crate::settings::Settings::mode); switching modes does
//! not touch anything already cached.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::cache::{CacheEntry, ResolutionCache};
use crate::probe::{ProbeController, ProbeTiming};
use crate::resolver::BuildIdResolver;
use crate::store::SuggestionStore;
use crate::types::BuildId;

/// A way of handling a build-id that could not be found
pub trait BuildIdStrategy
{
    /// Record whatever suggestion this strategy makes for `build_id`
    ///
    /// Never fails: resolution problems degrade to making no suggestion.
    /// `out` receives progress notices only, never the suggestions.
    fn suggest(&mut self, build_id: &BuildId, store: &mut SuggestionStore, out: &mut dyn Write);
}

/// Suggest by build-id path without any lookup
#[derive(Debug, Default, Clone, Copy)]
pub struct FastStrategy;

impl BuildIdStrategy for FastStrategy
{
    fn suggest(&mut self, build_id: &BuildId, store: &mut SuggestionStore, _out: &mut dyn Write)
    {
        store.add_build_id_suggestion(build_id.clone());
    }
}

/// Resolve to package names, memoised for the session
pub struct SlowStrategy
{
    resolver: BuildIdResolver,
    cache: ResolutionCache,
    probe: ProbeController,
}

impl SlowStrategy
{
    /// Create a strategy with an empty cache.
    #[must_use]
    pub fn new(resolver: BuildIdResolver, timing: ProbeTiming) -> Self
    {
        Self {
            resolver,
            cache: ResolutionCache::new(),
            probe: ProbeController::new(timing),
        }
    }

    /// The resolution cache.
    #[must_use]
    pub fn cache(&self) -> &ResolutionCache
    {
        &self.cache
    }

    /// The probe controller, for resetting its notice at each prompt.
    pub fn probe_mut(&mut self) -> &mut ProbeController
    {
        &mut self.probe
    }
}

impl BuildIdStrategy for SlowStrategy
{
    fn suggest(&mut self, build_id: &BuildId, store: &mut SuggestionStore, out: &mut dyn Write)
    {
        match self.cache.get(build_id) {
            Some(CacheEntry::Packages(packages)) => {
                trace!(%build_id, count = packages.len(), "resolution cache hit");
                for package in packages {
                    store.add_package_suggestion(package.clone());
                }
                return;
            }
            Some(CacheEntry::NoResult) => {
                trace!(%build_id, "resolution cache hit without result");
                return;
            }
            None => {}
        }

        // Reserve first: if anything below goes wrong this build-id is
        // still never looked up again.
        self.cache.reserve(build_id);

        let resolver = self.resolver.clone();
        let target = build_id.clone();
        let outcome = self
            .probe
            .run(move || resolver.resolve(&target), out)
            .and_then(|resolved| resolved);

        match outcome {
            Ok(packages) => {
                for package in &packages {
                    store.add_package_suggestion(package.clone());
                }
                self.cache.put(build_id, Some(packages));
            }
            Err(err) => {
                warn!(%build_id, "build-id lookup failed: {err}");
                self.cache.put(build_id, None);
            }
        }
        debug!(%build_id, cached = self.cache.len(), "build-id lookup complete");
    }
}

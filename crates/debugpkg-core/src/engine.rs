//! # Suggestion Engine
//!
//! The interface the debugging session drives, and its two implementations.
//!
//! Whether the package database can be queried is decided once, at startup,
//! by [`create_engine`]:
//!
//! - [`PackageSuggestions`]: the full engine. Detects missing debug
//!   information and files, resolves them, and announces install commands.
//! - [`UnavailableSuggestions`]: used when the package database cannot be
//!   queried. Warns once at the first prompt and fails every suggestion
//!   command with an explanation.
//!
//! ## Handler contract
//!
//! The two detection handlers return `false` ("not handled"): they give
//! advice, they do not find the missing file. They never fail; resolution
//! errors are logged and swallowed.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::announce::{self, CAPABILITY_ERROR, CAPABILITY_WARNING, NOTHING_SUGGESTED};
use crate::cache::ResolutionCache;
use crate::error::{SuggestError, SuggestResult};
use crate::package_db::{PackageDatabase, RpmDatabase};
use crate::probe::ProbeTiming;
use crate::resolver::{BuildIdResolver, DnfProvides, ProviderQuery};
use crate::settings::{ResolutionMode, Settings};
use crate::store::SuggestionStore;
use crate::strategy::{BuildIdStrategy, FastStrategy, SlowStrategy};
use crate::types::BuildId;

/// Session-facing interface of the suggestion engine
///
/// Every method runs on the session thread. `out` is the session's output
/// stream: suggestions, notices and warnings are written there.
pub trait SuggestionEngine
{
    /// No debug information was found for the loaded file `objfile`.
    ///
    /// Always returns `false`.
    fn on_missing_debug_info(&mut self, settings: &Settings, objfile: &str, out: &mut dyn Write) -> bool;

    /// No file with `build_id` was found; `filename` is the name the
    /// session asked for, if any.
    ///
    /// Always returns `false`.
    fn on_missing_object_file(
        &mut self,
        settings: &Settings,
        build_id: &BuildId,
        filename: Option<&str>,
        out: &mut dyn Write,
    ) -> bool;

    /// The session is about to show its prompt: announce pending suggestions.
    ///
    /// ## Errors
    ///
    /// `Io` if writing to `out` fails.
    fn on_before_prompt(&mut self, out: &mut dyn Write) -> SuggestResult<()>;

    /// The executable changed. `reload` is `true` when the same executable
    /// was merely re-read.
    fn on_executable_changed(&mut self, reload: bool);

    /// Print every suggestion made since the executable last changed.
    ///
    /// ## Errors
    ///
    /// - `CapabilityUnavailable` if suggestions cannot be made on this host
    /// - `Io` if writing to `out` fails
    fn show_suggestions(&self, out: &mut dyn Write) -> SuggestResult<()>;
}

/// Full suggestion engine backed by a package database
pub struct PackageSuggestions
{
    database: Arc<dyn PackageDatabase>,
    store: SuggestionStore,
    fast: FastStrategy,
    slow: SlowStrategy,
}

impl PackageSuggestions
{
    /// Create an engine from its collaborators.
    #[must_use]
    pub fn new(database: Arc<dyn PackageDatabase>, query: Arc<dyn ProviderQuery>, timing: ProbeTiming) -> Self
    {
        let resolver = BuildIdResolver::new(query, Arc::clone(&database));
        Self {
            database,
            store: SuggestionStore::new(),
            fast: FastStrategy,
            slow: SlowStrategy::new(resolver, timing),
        }
    }

    /// The suggestion sets.
    #[must_use]
    pub fn store(&self) -> &SuggestionStore
    {
        &self.store
    }

    /// The build-id resolution cache.
    #[must_use]
    pub fn cache(&self) -> &ResolutionCache
    {
        self.slow.cache()
    }

    /// Suggest the debuginfo packages for whichever packages own `objfile`.
    fn find_debug_suggestions(&mut self, objfile: &str) -> SuggestResult<()>
    {
        for owner in self.database.find_owners(objfile)? {
            let package = owner.debuginfo_package();
            if self.database.is_installed(&package)? {
                trace!(%package, "debuginfo already installed");
                continue;
            }
            self.store.add_package_suggestion(package);
        }
        Ok(())
    }
}

impl SuggestionEngine for PackageSuggestions
{
    fn on_missing_debug_info(&mut self, settings: &Settings, objfile: &str, _out: &mut dyn Write) -> bool
    {
        if !settings.suggestions_active() {
            return false;
        }
        if let Err(err) = self.find_debug_suggestions(objfile) {
            debug!(objfile, "no debuginfo suggestion: {err}");
        }
        false
    }

    fn on_missing_object_file(
        &mut self,
        settings: &Settings,
        build_id: &BuildId,
        filename: Option<&str>,
        out: &mut dyn Write,
    ) -> bool
    {
        if !settings.suggestions_active() {
            return false;
        }
        debug!(%build_id, ?filename, mode = %settings.mode, "missing object file");
        let strategy: &mut dyn BuildIdStrategy = match settings.mode {
            ResolutionMode::Fast => &mut self.fast,
            ResolutionMode::Slow => &mut self.slow,
        };
        strategy.suggest(build_id, &mut self.store, out);
        false
    }

    fn on_before_prompt(&mut self, out: &mut dyn Write) -> SuggestResult<()>
    {
        self.slow.probe_mut().reset_notice();
        let pending = self.store.drain_pending();
        if !pending.is_empty() {
            info!(
                packages = pending.packages.len(),
                build_ids = pending.build_ids.len(),
                "announcing suggestions"
            );
        }
        announce::write_suggestions(out, &pending)?;
        Ok(())
    }

    fn on_executable_changed(&mut self, reload: bool)
    {
        if reload {
            trace!("executable reloaded; keeping suggestions");
            return;
        }
        self.store.reset();
    }

    fn show_suggestions(&self, out: &mut dyn Write) -> SuggestResult<()>
    {
        let all = self.store.list_all();
        if all.is_empty() {
            writeln!(out, "{NOTHING_SUGGESTED}")?;
            return Ok(());
        }
        announce::write_suggestions(out, &all)?;
        Ok(())
    }
}

/// Stand-in engine for hosts where the package database cannot be queried
#[derive(Debug, Default)]
pub struct UnavailableSuggestions
{
    warned: bool,
}

impl UnavailableSuggestions
{
    /// Create the stub; it has not warned yet.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }
}

impl SuggestionEngine for UnavailableSuggestions
{
    fn on_missing_debug_info(&mut self, _settings: &Settings, _objfile: &str, _out: &mut dyn Write) -> bool
    {
        false
    }

    fn on_missing_object_file(
        &mut self,
        _settings: &Settings,
        _build_id: &BuildId,
        _filename: Option<&str>,
        _out: &mut dyn Write,
    ) -> bool
    {
        false
    }

    fn on_before_prompt(&mut self, out: &mut dyn Write) -> SuggestResult<()>
    {
        // Wait for the first prompt so the warning is not lost among the
        // session's startup banner.
        if !self.warned {
            self.warned = true;
            writeln!(out, "{CAPABILITY_WARNING}")?;
            out.flush()?;
        }
        Ok(())
    }

    fn on_executable_changed(&mut self, _reload: bool) {}

    fn show_suggestions(&self, _out: &mut dyn Write) -> SuggestResult<()>
    {
        Err(SuggestError::CapabilityUnavailable(CAPABILITY_ERROR.to_string()))
    }
}

/// Create the engine this host supports
///
/// Checks once for the `rpm` executable. With it, the full engine is wired to
/// the `rpm` database and `dnf provides`; without it, the stub is returned.
#[must_use]
pub fn create_engine() -> Box<dyn SuggestionEngine>
{
    match RpmDatabase::detect() {
        Some(database) => Box::new(PackageSuggestions::new(
            Arc::new(database),
            Arc::new(DnfProvides::default()),
            ProbeTiming::default(),
        )),
        None => {
            warn!("rpm package database unavailable; package suggestions disabled");
            Box::new(UnavailableSuggestions::new())
        }
    }
}

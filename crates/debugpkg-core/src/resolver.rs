//! # Build-id Resolver
//!
//! Maps a build-id to concrete package names by asking the package index
//! which package provides the matching `.build-id` debug path.
//!
//! The index query is an external `dnf provides` process. It routinely takes
//! several seconds, so it is bounded by a hard wall-clock timeout and is only
//! ever run from a background probe (see [`crate::probe`]).
//!
//! ## Output format
//!
//! `dnf provides` prints one summary line per matching package:
//!
//! ```text
//! foo-debuginfo-1.0-3.fc39.x86_64 : Debug information for package foo
//! ```
//!
//! A line is accepted only when the package base before `-debuginfo-` equals
//! the package named after `for package`. A mismatched line is skipped on its
//! own; later lines are still parsed rather than abandoning the whole output.
//! For each accepted line both the main package and its debuginfo package are
//! suggested, unless already installed.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};
use wait_timeout::ChildExt;

use crate::error::{SuggestError, SuggestResult};
use crate::package_db::PackageDatabase;
use crate::types::{BuildId, PackageName};

/// Hard limit on one provider query.
pub const PROVIDER_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

static PROVIDES_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)-debuginfo-(.*) : Debug information for package (.*)$")
        .unwrap_or_else(|err| panic!("invalid provides pattern: {err}"))
});

/// Something that can answer "which packages provide this path?"
///
/// Returns the raw, line-oriented text the package index printed.
pub trait ProviderQuery: Send + Sync
{
    /// Query the providers of `path`.
    ///
    /// ## Errors
    ///
    /// - `ResolverSpawn` if the query tool could not be started
    /// - `ResolverTimeout` if it did not finish in time
    fn provides(&self, path: &str) -> SuggestResult<String>;
}

/// [`ProviderQuery`] running `dnf provides` against the local metadata cache
#[derive(Debug, Clone)]
pub struct DnfProvides
{
    program: PathBuf,
    timeout: Duration,
}

impl Default for DnfProvides
{
    fn default() -> Self
    {
        Self {
            program: PathBuf::from("dnf"),
            timeout: PROVIDER_QUERY_TIMEOUT,
        }
    }
}

impl DnfProvides
{
    /// Use a specific executable and time limit.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self
    {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl ProviderQuery for DnfProvides
{
    fn provides(&self, path: &str) -> SuggestResult<String>
    {
        debug!(program = %self.program.display(), path, "running provider query");
        let mut child = Command::new(&self.program)
            .args(["--enablerepo=*debug*", "--nogpgcheck", "-C", "provides", path])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(SuggestError::ResolverSpawn)?;

        // Drain stdout on its own thread so a chatty child cannot block on a
        // full pipe while we wait on it.
        let reader = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = stdout.read_to_end(&mut buffer);
                buffer
            })
        });

        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => {
                trace!(%status, "provider query finished");
                let bytes = reader.and_then(|handle| handle.join().ok()).unwrap_or_default();
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                Err(SuggestError::ResolverTimeout { limit: self.timeout })
            }
            Err(err) => {
                let _ = child.kill();
                Err(SuggestError::Io(err))
            }
        }
    }
}

/// One accepted line of provider output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidesCandidate
{
    /// Package base name, e.g. `foo`
    pub base: String,
    /// Everything after `-debuginfo-`, e.g. `1.0-3.fc39.x86_64`
    pub version: String,
}

impl ProvidesCandidate
{
    /// The package carrying the binary itself.
    #[must_use]
    pub fn main_package(&self) -> PackageName
    {
        PackageName::new(format!("{}-{}", self.base, self.version))
    }

    /// The package carrying its debug information.
    #[must_use]
    pub fn debuginfo_package(&self) -> PackageName
    {
        PackageName::new(format!("{}-debuginfo-{}", self.base, self.version))
    }
}

/// Extract candidates from `dnf provides` output
///
/// Lines not matching the summary pattern, and lines whose two package base
/// captures disagree, are skipped.
#[must_use]
pub fn parse_provides_output(text: &str) -> Vec<ProvidesCandidate>
{
    text.lines()
        .filter_map(|line| {
            let caps = PROVIDES_LINE.captures(line)?;
            let (base, version, owner) = (&caps[1], &caps[2], &caps[3]);
            if base != owner {
                trace!(line, "skipping provider line for a different package");
                return None;
            }
            Some(ProvidesCandidate {
                base: base.to_string(),
                version: version.to_string(),
            })
        })
        .collect()
}

/// Resolves build-ids to not-yet-installed package names
///
/// Cheap to clone; both collaborators are shared.
#[derive(Clone)]
pub struct BuildIdResolver
{
    query: Arc<dyn ProviderQuery>,
    database: Arc<dyn PackageDatabase>,
}

impl BuildIdResolver
{
    /// Create a resolver from a provider query and a package database.
    #[must_use]
    pub fn new(query: Arc<dyn ProviderQuery>, database: Arc<dyn PackageDatabase>) -> Self
    {
        Self { query, database }
    }

    /// Resolve `build_id` to packages worth suggesting
    ///
    /// Returns main and debuginfo package names, in output order, skipping
    /// those already installed. An empty list means nothing useful exists.
    ///
    /// ## Errors
    ///
    /// Any provider query or package database error.
    pub fn resolve(&self, build_id: &BuildId) -> SuggestResult<Vec<PackageName>>
    {
        let output = self.query.provides(&build_id.debug_path())?;
        let mut packages = Vec::new();

        for candidate in parse_provides_output(&output) {
            for package in [candidate.main_package(), candidate.debuginfo_package()] {
                if packages.contains(&package) {
                    continue;
                }
                if self.database.is_installed(&package)? {
                    trace!(%package, "already installed");
                    continue;
                }
                packages.push(package);
            }
        }

        if packages.is_empty() {
            debug!(%build_id, "no installable packages provide this build-id");
        } else {
            debug!(%build_id, ?packages, "resolved build-id");
        }
        Ok(packages)
    }
}

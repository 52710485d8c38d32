//! In-memory stand-ins for the package manager.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use debugpkg_core::engine::PackageSuggestions;
use debugpkg_core::error::{SuggestError, SuggestResult};
use debugpkg_core::package_db::PackageDatabase;
use debugpkg_core::probe::ProbeTiming;
use debugpkg_core::resolver::ProviderQuery;
use debugpkg_core::types::{PackageMetadata, PackageName};

/// Package database with a fixed installed set and file owners.
#[derive(Default)]
pub struct FakeDatabase
{
    pub installed: HashSet<String>,
    pub owners: HashMap<String, Vec<PackageMetadata>>,
    pub fail_owner_queries: bool,
}

impl FakeDatabase
{
    pub fn owning(mut self, path: &str, name: &str, version: &str) -> Self
    {
        self.owners.entry(path.to_string()).or_default().push(PackageMetadata {
            name: name.to_string(),
            version: version.to_string(),
            release: "1.fc39".to_string(),
            arch: "x86_64".to_string(),
        });
        self
    }

    pub fn with_installed(mut self, name: &str) -> Self
    {
        self.installed.insert(name.to_string());
        self
    }
}

impl PackageDatabase for FakeDatabase
{
    fn is_installed(&self, package: &PackageName) -> SuggestResult<bool>
    {
        Ok(self.installed.contains(package.as_str()))
    }

    fn find_owners(&self, path: &str) -> SuggestResult<Vec<PackageMetadata>>
    {
        if self.fail_owner_queries {
            return Err(SuggestError::PackageQuery(format!("rpm -qf {path}: database locked")));
        }
        Ok(self.owners.get(path).cloned().unwrap_or_default())
    }
}

/// Provider query returning canned output and counting invocations.
#[derive(Default)]
pub struct FakeProvider
{
    pub output: HashMap<String, String>,
    pub calls: AtomicUsize,
    pub delay: Duration,
    pub fail: bool,
}

impl FakeProvider
{
    pub fn providing(mut self, path: &str, output: &str) -> Self
    {
        self.output.insert(path.to_string(), output.to_string());
        self
    }

    pub fn calls(&self) -> usize
    {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProviderQuery for FakeProvider
{
    fn provides(&self, path: &str) -> SuggestResult<String>
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.fail {
            return Err(SuggestError::ResolverTimeout { limit: Duration::from_secs(30) });
        }
        Ok(self.output.get(path).cloned().unwrap_or_default())
    }
}

/// Probe timing short enough for tests.
pub fn quick_timing() -> ProbeTiming
{
    ProbeTiming {
        poll_interval: Duration::from_millis(5),
        notice_after: Duration::from_millis(50),
    }
}

pub fn engine(database: FakeDatabase, provider: &Arc<FakeProvider>) -> PackageSuggestions
{
    PackageSuggestions::new(Arc::new(database), Arc::clone(provider) as Arc<dyn ProviderQuery>, quick_timing())
}

pub fn text(out: &[u8]) -> String
{
    String::from_utf8_lossy(out).into_owned()
}

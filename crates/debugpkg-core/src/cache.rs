//! # Resolution Cache
//!
//! Session-lifetime memo of build-id → resolved package names.
//!
//! Resolving a build-id means running an external query that can take
//! seconds, and build-ids are unique, so every answer is kept for the whole
//! process. The cache is deliberately not cleared when the executable
//! changes.
//!
//! ## Write-once entries
//!
//! A lookup first [`reserve`](ResolutionCache::reserve)s its build-id. If the
//! lookup then fails part way, the reservation stays behind and reads as "no
//! result", so the same build-id is never retried. A successful lookup fills
//! the reservation with [`put`](ResolutionCache::put). Once an entry holds a
//! value, later `put`s are ignored.

use std::collections::HashMap;

use tracing::trace;

use crate::types::{BuildId, PackageName};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot
{
    /// Lookup started but never completed.
    Reserved,
    /// Lookup finished; `None` records that it produced no usable answer.
    Written(Option<Vec<PackageName>>),
}

/// Cached outcome of resolving one build-id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEntry<'a>
{
    /// The lookup failed or never completed; do not retry.
    NoResult,
    /// The lookup completed with these packages (possibly none).
    Packages(&'a [PackageName]),
}

/// Build-id resolution cache
///
/// Not thread-safe; owned by the foreground session and only touched from
/// there.
#[derive(Debug, Default)]
pub struct ResolutionCache
{
    entries: HashMap<BuildId, Slot>,
}

impl ResolutionCache
{
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Look up a build-id. `None` is a miss.
    #[must_use]
    pub fn get(&self, build_id: &BuildId) -> Option<CacheEntry<'_>>
    {
        self.entries.get(build_id).map(|slot| match slot {
            Slot::Reserved | Slot::Written(None) => CacheEntry::NoResult,
            Slot::Written(Some(packages)) => CacheEntry::Packages(packages),
        })
    }

    /// Mark a lookup as started
    ///
    /// Has no effect if the build-id already has an entry.
    pub fn reserve(&mut self, build_id: &BuildId)
    {
        self.entries.entry(build_id.clone()).or_insert(Slot::Reserved);
    }

    /// Record the outcome of a lookup
    ///
    /// Fills an absent or reserved entry. Returns `false`, leaving the cache
    /// untouched, if a value was already written for this build-id.
    pub fn put(&mut self, build_id: &BuildId, packages: Option<Vec<PackageName>>) -> bool
    {
        match self.entries.get_mut(build_id) {
            Some(Slot::Written(_)) => {
                trace!(%build_id, "ignoring second write to resolution cache");
                false
            }
            Some(slot) => {
                *slot = Slot::Written(packages);
                true
            }
            None => {
                self.entries.insert(build_id.clone(), Slot::Written(packages));
                true
            }
        }
    }

    /// Number of build-ids with an entry.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// Whether no build-id has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn id(text: &str) -> BuildId
    {
        BuildId::parse(text).unwrap()
    }

    #[test]
    fn test_miss_then_hit()
    {
        let mut cache = ResolutionCache::new();
        let build_id = id("abc123");
        assert_eq!(cache.get(&build_id), None);

        let packages = vec![PackageName::from("foo-1.0")];
        assert!(cache.put(&build_id, Some(packages.clone())));
        assert_eq!(cache.get(&build_id), Some(CacheEntry::Packages(&packages)));
    }

    #[test]
    fn test_first_write_wins()
    {
        let mut cache = ResolutionCache::new();
        let build_id = id("abc123");
        let first = vec![PackageName::from("foo-1.0")];

        assert!(cache.put(&build_id, Some(first.clone())));
        assert!(!cache.put(&build_id, Some(vec![PackageName::from("bar-2.0")])));
        assert!(!cache.put(&build_id, None));
        assert!(!cache.put(&build_id, Some(Vec::new())));
        assert_eq!(cache.get(&build_id), Some(CacheEntry::Packages(&first)));
    }

    #[test]
    fn test_no_result_marker_is_permanent()
    {
        let mut cache = ResolutionCache::new();
        let build_id = id("abc123");
        assert!(cache.put(&build_id, None));
        assert!(!cache.put(&build_id, Some(vec![PackageName::from("foo-1.0")])));
        assert_eq!(cache.get(&build_id), Some(CacheEntry::NoResult));
    }

    #[test]
    fn test_reservation_reads_as_no_result_until_filled()
    {
        let mut cache = ResolutionCache::new();
        let build_id = id("abc123");
        cache.reserve(&build_id);
        assert_eq!(cache.get(&build_id), Some(CacheEntry::NoResult));

        let packages = vec![PackageName::from("foo-1.0")];
        assert!(cache.put(&build_id, Some(packages.clone())));
        assert_eq!(cache.get(&build_id), Some(CacheEntry::Packages(&packages)));

        // Reserving again does not clear the value.
        cache.reserve(&build_id);
        assert_eq!(cache.get(&build_id), Some(CacheEntry::Packages(&packages)));
        assert_eq!(cache.len(), 1);
    }
}

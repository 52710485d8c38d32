//! # Package Database
//!
//! Queries against the host package manager's local database.
//!
//! This is a pure query layer: nothing is cached here, and every failure is
//! reported to the caller as an error. Callers treat errors as "no
//! suggestion".
//!
//! The [`PackageDatabase`] trait lets the engine run against the real `rpm`
//! database ([`RpmDatabase`]) or an in-memory stand-in in tests.

pub mod rpm;

pub use rpm::RpmDatabase;

use crate::error::SuggestResult;
use crate::types::{PackageMetadata, PackageName};

/// Read-only view of the installed package set
///
/// Implementations must be `Send + Sync` because slow build-id probes query
/// the database from a background thread.
pub trait PackageDatabase: Send + Sync
{
    /// Is a package with exactly this full name installed?
    ///
    /// ## Errors
    ///
    /// `PackageQuery` if the database cannot be queried.
    fn is_installed(&self, package: &PackageName) -> SuggestResult<bool>;

    /// Which installed packages own the file at `path`?
    ///
    /// Returns an empty list when no package owns the file.
    ///
    /// ## Errors
    ///
    /// `PackageQuery` if the database cannot be queried.
    fn find_owners(&self, path: &str) -> SuggestResult<Vec<PackageMetadata>>;
}

//! Package names and installed-package metadata.

use std::fmt;

/// Name of an installable unit in the package manager's namespace
///
/// No distinction is made between a "main" package and its debuginfo
/// counterpart at the type level. The two are related only by the naming
/// transform in [`PackageMetadata::debuginfo_package`] and
/// [`ProvidesCandidate`](crate::resolver::ProvidesCandidate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName
{
    /// Create a package name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self
    {
        Self(name.into())
    }

    /// The package name as text.
    #[must_use]
    pub fn as_str(&self) -> &str
    {
        &self.0
    }
}

impl From<&str> for PackageName
{
    fn from(name: &str) -> Self
    {
        Self(name.to_string())
    }
}

impl From<String> for PackageName
{
    fn from(name: String) -> Self
    {
        Self(name)
    }
}

impl fmt::Display for PackageName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.0)
    }
}

/// Header fields of an installed package that owns a file
///
/// Returned by [`PackageDatabase::find_owners`](crate::package_db::PackageDatabase::find_owners).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata
{
    /// Package name, e.g. `glibc`
    pub name: String,
    /// Upstream version, e.g. `2.38`
    pub version: String,
    /// Distribution release, e.g. `16.fc39`
    pub release: String,
    /// Architecture, e.g. `x86_64`
    pub arch: String,
}

impl PackageMetadata
{
    /// Name of the debuginfo package matching this exact build
    ///
    /// Follows `name-debuginfo-version-release.arch`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use debugpkg_core::types::PackageMetadata;
    ///
    /// let meta = PackageMetadata {
    ///     name: "glibc".into(),
    ///     version: "2.38".into(),
    ///     release: "16.fc39".into(),
    ///     arch: "x86_64".into(),
    /// };
    /// assert_eq!(meta.debuginfo_package().as_str(), "glibc-debuginfo-2.38-16.fc39.x86_64");
    /// ```
    #[must_use]
    pub fn debuginfo_package(&self) -> PackageName
    {
        PackageName(format!(
            "{}-debuginfo-{}-{}.{}",
            self.name, self.version, self.release, self.arch
        ))
    }
}

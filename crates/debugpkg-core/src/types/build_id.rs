//! Build-id type and the `.build-id` path convention.

use std::fmt;
use std::str::FromStr;

use crate::error::{SuggestError, SuggestResult};

/// Root directory that system packages install into.
pub const SYSTEM_LIB_ROOT: &str = "/usr/lib";

/// Directory under [`SYSTEM_LIB_ROOT`] holding separate debug information.
pub const SYSTEM_DEBUG_ROOT: &str = "/usr/lib/debug";

/// Suffix carried by separate debug files inside the debug tree.
pub const DEBUG_FILE_SUFFIX: &str = ".debug";

/// Content fingerprint naming a binary artifact independent of its path
///
/// A build-id is the hex string the linker stores in the `.note.gnu.build-id`
/// section. Two files with the same build-id are assumed to be the same
/// artifact, which is what lets resolution results be cached for the whole
/// session.
///
/// Build-ids are normalised to lowercase on parse.
///
/// ## Example
///
/// ```rust
/// use debugpkg_core::types::BuildId;
///
/// let id: BuildId = "ABCDEF1234".parse()?;
/// assert_eq!(id.as_str(), "abcdef1234");
/// assert_eq!(id.main_path(), "/usr/lib/.build-id/ab/cdef1234");
/// # Ok::<(), debugpkg_core::error::SuggestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildId(String);

impl BuildId
{
    /// Parse and validate a build-id
    ///
    /// ## Errors
    ///
    /// `InvalidBuildId` if the text is not hex, or is too short to split into
    /// a two character directory and a non-empty file name.
    pub fn parse(text: &str) -> SuggestResult<Self>
    {
        let trimmed = text.trim();
        if trimmed.len() < 3 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SuggestError::InvalidBuildId(text.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The build-id as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str
    {
        &self.0
    }

    /// Path of the file with this build-id in the main `.build-id` tree.
    ///
    /// This is the path a package carrying the binary itself installs.
    #[must_use]
    pub fn main_path(&self) -> String
    {
        self.path_under(SYSTEM_LIB_ROOT, "")
    }

    /// Path of this build-id in the debug `.build-id` tree, without suffix.
    ///
    /// The package index is queried with this form.
    #[must_use]
    pub fn debug_path(&self) -> String
    {
        self.path_under(SYSTEM_DEBUG_ROOT, "")
    }

    /// Path of the separate debug file for this build-id.
    #[must_use]
    pub fn debug_file_path(&self) -> String
    {
        self.path_under(SYSTEM_DEBUG_ROOT, DEBUG_FILE_SUFFIX)
    }

    fn path_under(&self, root: &str, suffix: &str) -> String
    {
        let (key, rest) = self.0.split_at(2);
        format!("{root}/.build-id/{key}/{rest}{suffix}")
    }
}

impl FromStr for BuildId
{
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Self::parse(s)
    }
}

impl fmt::Display for BuildId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_paths_split_first_two_characters()
    {
        let id = BuildId::parse("abcdef1234567890").unwrap();
        assert_eq!(id.main_path(), "/usr/lib/.build-id/ab/cdef1234567890");
        assert_eq!(id.debug_path(), "/usr/lib/debug/.build-id/ab/cdef1234567890");
        assert_eq!(id.debug_file_path(), "/usr/lib/debug/.build-id/ab/cdef1234567890.debug");
    }

    #[test]
    fn test_parse_normalises_case_and_whitespace()
    {
        let id = BuildId::parse("  ABC123\n").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_parse_rejects_short_or_non_hex()
    {
        assert!(BuildId::parse("ab").is_err());
        assert!(BuildId::parse("").is_err());
        assert!(BuildId::parse("xyz123").is_err());
        assert!(matches!(BuildId::parse("ab/cd"), Err(SuggestError::InvalidBuildId(_))));
    }
}

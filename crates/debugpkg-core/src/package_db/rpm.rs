//! `rpm` command line backend for [`PackageDatabase`].

use std::path::PathBuf;
use std::process::{Command, Output};

use tracing::{debug, trace};

use super::PackageDatabase;
use crate::error::{SuggestError, SuggestResult};
use crate::types::{PackageMetadata, PackageName};

/// Query format producing one tab-separated owner record per line.
const OWNER_QUERY_FORMAT: &str = "%{NAME}\\t%{VERSION}\\t%{RELEASE}\\t%{ARCH}\\n";

/// Package database backed by the `rpm` executable
#[derive(Debug, Clone)]
pub struct RpmDatabase
{
    program: PathBuf,
}

impl RpmDatabase
{
    /// Use a specific `rpm` executable.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self
    {
        Self { program: program.into() }
    }

    /// Look for `rpm` on `PATH`
    ///
    /// Returns `None` when the package database cannot be queried on this
    /// host. This is the startup capability check that decides between the
    /// full engine and the unavailable stub.
    #[must_use]
    pub fn detect() -> Option<Self>
    {
        match which::which("rpm") {
            Ok(program) => {
                debug!(program = %program.display(), "found rpm executable");
                Some(Self::new(program))
            }
            Err(err) => {
                debug!("rpm executable not found: {err}");
                None
            }
        }
    }

    fn run(&self, args: &[&str]) -> SuggestResult<Output>
    {
        trace!(program = %self.program.display(), ?args, "querying package database");
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|err| SuggestError::PackageQuery(format!("rpm {}: {err}", args.join(" "))))
    }
}

impl PackageDatabase for RpmDatabase
{
    fn is_installed(&self, package: &PackageName) -> SuggestResult<bool>
    {
        // `rpm -q` exits 0 when installed and 1 when not; anything else is a
        // broken database.
        let output = self.run(&["-q", "--quiet", package.as_str()])?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(SuggestError::PackageQuery(format!(
                "rpm -q {package}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    fn find_owners(&self, path: &str) -> SuggestResult<Vec<PackageMetadata>>
    {
        let output = self.run(&["-qf", "--queryformat", OWNER_QUERY_FORMAT, path])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let owners = parse_owner_records(&stdout);

        // An unowned file makes rpm exit non-zero with a message on stdout,
        // which is a normal "no owners" answer.
        if owners.is_empty() && !output.status.success() && !stdout.contains("is not owned by any package") {
            return Err(SuggestError::PackageQuery(format!(
                "rpm -qf {path}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(owners)
    }
}

/// Parse `name\tversion\trelease\tarch` lines, skipping anything else.
fn parse_owner_records(text: &str) -> Vec<PackageMetadata>
{
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let record = PackageMetadata {
                name: fields.next()?.to_string(),
                version: fields.next()?.to_string(),
                release: fields.next()?.to_string(),
                arch: fields.next()?.to_string(),
            };
            (fields.next().is_none() && !record.name.is_empty()).then_some(record)
        })
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_owner_records()
    {
        let text = "glibc\t2.38\t16.fc39\tx86_64\nbash\t5.2.26\t1.fc39\tx86_64\n";
        let owners = parse_owner_records(text);
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].name, "glibc");
        assert_eq!(
            owners[1].debuginfo_package().as_str(),
            "bash-debuginfo-5.2.26-1.fc39.x86_64"
        );
    }

    #[test]
    fn test_parse_owner_records_skips_messages()
    {
        let text = "file /tmp/a.out is not owned by any package\n";
        assert!(parse_owner_records(text).is_empty());
        assert!(parse_owner_records("a\tb\tc\n").is_empty());
        assert!(parse_owner_records("a\tb\tc\td\te\n").is_empty());
    }

    #[test]
    fn test_missing_program_is_a_query_error()
    {
        let db = RpmDatabase::new("/nonexistent/bin/rpm");
        let err = db.is_installed(&PackageName::from("foo")).unwrap_err();
        assert!(matches!(err, SuggestError::PackageQuery(_)));
    }
}

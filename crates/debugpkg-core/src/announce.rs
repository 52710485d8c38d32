//! User-facing suggestion text.

use std::io::{self, Write};

use crate::store::Suggestions;
use crate::types::{BuildId, PackageName};

/// Command prefix shared by every suggestion line.
pub const INSTALL_COMMAND: &str = "dnf --enablerepo='*debug*' install";

/// Printed by `show-suggestions` before anything has been suggested.
pub const NOTHING_SUGGESTED: &str = "No package suggestions have been made so far.";

/// Printed once when the package database cannot be queried.
pub const CAPABILITY_WARNING: &str = "\nUnable to query the rpm package database.  Lack of this capability disables\n\
the package suggestions mechanism which recommends shell commands for\n\
installing missing debuginfo packages.  To enable this functionality,\n\
please install the rpm package.";

/// Error text for suggestion commands when the database cannot be queried.
pub const CAPABILITY_ERROR: &str = "package suggestions are disabled as the rpm package database cannot be queried";

/// One command installing all of `packages`.
#[must_use]
pub fn format_package_suggestion(packages: &[PackageName]) -> String
{
    let names: Vec<&str> = packages.iter().map(PackageName::as_str).collect();
    format!("Missing rpms, try: {INSTALL_COMMAND} {}", names.join(" "))
}

/// One command installing the main and debug files for `build_id`.
#[must_use]
pub fn format_build_id_suggestion(build_id: &BuildId) -> String
{
    format!(
        "Missing file(s), try: {INSTALL_COMMAND} {} {}",
        build_id.main_path(),
        build_id.debug_file_path()
    )
}

/// Write the package line (if any) followed by one line per build-id.
///
/// ## Errors
///
/// Any error writing to `out`.
pub fn write_suggestions(out: &mut dyn Write, suggestions: &Suggestions) -> io::Result<()>
{
    if !suggestions.packages.is_empty() {
        writeln!(out, "{}", format_package_suggestion(&suggestions.packages))?;
    }
    for build_id in &suggestions.build_ids {
        writeln!(out, "{}", format_build_id_suggestion(build_id))?;
    }
    out.flush()
}

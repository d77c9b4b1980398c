//! Shared-library discovery next to the host executable.

use glob::{MatchOptions, Pattern};
use isoenv_core::{Error, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Find files in `install_dir` whose names match any of `patterns`.
///
/// Patterns apply to file names only and are searched in order, their
/// results concatenated. Within one pattern, matches are sorted by file name,
/// so the output is deterministic for a fixed filesystem. A path matched by
/// several patterns is only returned once. A missing directory yields no
/// matches. Names that are not valid UTF-8 are matched on their lossy form.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if a pattern does not compile, or an IO
/// error if the directory cannot be listed.
pub fn find_shared_libs(
    install_dir: &Path,
    patterns: &[&str],
    case_sensitive: bool,
) -> Result<Vec<PathBuf>> {
    let compiled = patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| Error::invalid_pattern(*pattern, e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    if !install_dir.is_dir() {
        trace!(?install_dir, "Install directory missing, no shared libraries");
        return Ok(Vec::new());
    }

    let mut names: Vec<OsString> = std::fs::read_dir(install_dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<_>>()?;
    names.sort();

    let options = MatchOptions {
        case_sensitive,
        ..MatchOptions::new()
    };
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for pattern in &compiled {
        for name in &names {
            if !pattern.matches_with(&name.to_string_lossy(), options) {
                continue;
            }
            let path = install_dir.join(name);
            if seen.insert(path.clone()) {
                trace!(?path, pattern = pattern.as_str(), "Found shared library");
                found.push(path);
            }
        }
    }

    debug!(?install_dir, count = found.len(), "Shared libraries discovered");
    Ok(found)
}

//! Source-to-destination mappings handed to the creation pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

/// Directories of the environment being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDirs {
    /// Destination root of the new environment.
    pub root: PathBuf,
    /// Directory holding executables and scripts.
    pub bin_dir: PathBuf,
    /// The environment's `site-packages` directory.
    pub site_packages: PathBuf,
}

/// How the destination of a [`PathMapping`] is computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// `<root>/lib/<source file name>`, flattening any directory structure.
    Library,
    /// `<bin_dir>/<name>`.
    Executable(String),
}

/// One unit of "what to place where".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathMapping {
    /// File or directory in the host installation.
    pub source: PathBuf,
    /// Destination rule.
    pub target: Target,
}

impl PathMapping {
    /// Map a source into the flat library directory.
    #[must_use]
    pub fn library(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: Target::Library,
        }
    }

    /// Map a source into the executable directory under `name`.
    #[must_use]
    pub fn executable(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: Target::Executable(name.into()),
        }
    }

    /// Compute the destination inside the environment.
    #[must_use]
    pub fn destination(&self, dirs: &EnvDirs) -> PathBuf {
        match &self.target {
            Target::Library => library_destination(&dirs.root, &self.source),
            Target::Executable(name) => dirs.bin_dir.join(name),
        }
    }
}

impl fmt::Display for PathMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Library => write!(f, "{} -> lib/", self.source.display()),
            Target::Executable(name) => write!(f, "{} -> bin/{name}", self.source.display()),
        }
    }
}

/// `<dest>/lib/<file name of source>`.
///
/// A source without a file name (`/`, `..`) maps to the library directory
/// itself.
#[must_use]
pub fn library_destination(dest: &Path, source: &Path) -> PathBuf {
    let lib = dest.join("lib");
    match source.file_name() {
        Some(name) => lib.join(name),
        None => lib,
    }
}

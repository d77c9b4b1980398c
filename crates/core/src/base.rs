//! Generic creation contract.
//!
//! Interpreter-specific resolvers extend a [`BaseLayout`] by composition:
//! they call the base first and append their own entries. [`GenericLayout`]
//! is the default collaborator and carries the behaviour shared by every
//! interpreter family (executable aliases, host executable mappings and the
//! sysconfig-style default directories).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{InterpreterDescriptor, PathMapping, PlatformFamily, Result};

/// Default layout behaviour that interpreter-specific resolvers build on.
pub trait BaseLayout: Send + Sync {
    /// Executable names every environment of this interpreter must provide.
    fn exe_names(&self, descriptor: &InterpreterDescriptor) -> BTreeSet<String>;

    /// Default directory for executables and scripts.
    fn bin_dir(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> PathBuf;

    /// Default `site-packages` location.
    fn stdlib(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> PathBuf;

    /// Base entries to materialize.
    ///
    /// `exe_names` is the complete alias set of the calling resolver, which
    /// may be larger than [`exe_names`](Self::exe_names).
    ///
    /// # Errors
    ///
    /// Implementations return an error when the descriptor cannot be mapped.
    fn sources(
        &self,
        descriptor: &InterpreterDescriptor,
        exe_names: &BTreeSet<String>,
    ) -> Result<Vec<PathMapping>>;
}

/// The default [`BaseLayout`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericLayout;

impl BaseLayout for GenericLayout {
    fn exe_names(&self, descriptor: &InterpreterDescriptor) -> BTreeSet<String> {
        let version = &descriptor.version;
        BTreeSet::from([
            "python".to_string(),
            format!("python{}", version.major),
            format!("python{}.{}", version.major, version.minor),
        ])
    }

    fn bin_dir(&self, _descriptor: &InterpreterDescriptor, dest: &Path) -> PathBuf {
        dest.join("bin")
    }

    fn stdlib(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> PathBuf {
        match descriptor.platform {
            PlatformFamily::Posix => dest
                .join("lib")
                .join(format!("python{}", descriptor.version.release_str()))
                .join("site-packages"),
            PlatformFamily::Windows => dest.join("Lib").join("site-packages"),
        }
    }

    fn sources(
        &self,
        descriptor: &InterpreterDescriptor,
        exe_names: &BTreeSet<String>,
    ) -> Result<Vec<PathMapping>> {
        let suffix = descriptor.platform.exe_suffix();
        Ok(exe_names
            .iter()
            .map(|name| {
                PathMapping::executable(&descriptor.system_executable, format!("{name}{suffix}"))
            })
            .collect())
    }
}

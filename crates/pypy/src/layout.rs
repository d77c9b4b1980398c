//! The PyPy 3 layout resolver.

use isoenv_core::{
    BaseLayout, EnvDirs, Error, GenericLayout, InterpreterDescriptor, PathMapping, ResolverConfig,
    Result, library_destination,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::vec;
use tracing::debug;

use crate::rule::LayoutRule;
use crate::scan::PortableScan;
use crate::shared_libs::find_shared_libs;

/// Canonical executable stem of PyPy 3.
pub const EXE_STEM: &str = "pypy3";

/// Aliases PyPy 3 adds on top of the base layout's names.
pub const PYPY_ALIASES: &[&str] = &[EXE_STEM, "pypy"];

/// Resolves what a PyPy 3 installation contributes to a new environment.
///
/// The resolver is stateless: every call re-derives its answer from the
/// descriptor, so one instance can serve any number of descriptors.
#[derive(Debug, Clone, Default)]
pub struct PyPy3Layout<B = GenericLayout> {
    base: B,
    config: ResolverConfig,
}

impl PyPy3Layout<GenericLayout> {
    /// Create a resolver on top of [`GenericLayout`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: BaseLayout> PyPy3Layout<B> {
    /// Create a resolver on top of a custom base layout.
    #[must_use]
    pub fn with_base(base: B) -> Self {
        Self {
            base,
            config: ResolverConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether this resolver handles the descriptor's interpreter.
    #[must_use]
    pub fn can_describe(&self, descriptor: &InterpreterDescriptor) -> bool {
        descriptor.version.major == 3
    }

    /// Validate the descriptor and select its layout rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedInterpreter`] for non-3 major versions and
    /// [`Error::InvalidDescriptor`] when the descriptor fails validation.
    pub fn rule(&self, descriptor: &InterpreterDescriptor) -> Result<&'static LayoutRule> {
        if !self.can_describe(descriptor) {
            return Err(Error::unsupported_interpreter(
                EXE_STEM,
                descriptor.version.to_string(),
            ));
        }
        descriptor.validate()?;
        let rule = LayoutRule::select(descriptor.platform, &descriptor.version);
        debug!(
            version = %descriptor.version,
            platform = %descriptor.platform,
            variant = ?rule.variant,
            "Selected PyPy layout rule"
        );
        Ok(rule)
    }

    /// Canonical executable stem.
    #[must_use]
    pub fn exe_stem(&self) -> &'static str {
        EXE_STEM
    }

    /// Every executable name the environment should provide.
    ///
    /// Always a strict superset of the base layout's names.
    #[must_use]
    pub fn exe_names(&self, descriptor: &InterpreterDescriptor) -> BTreeSet<String> {
        let mut names = self.base.exe_names(descriptor);
        names.extend(PYPY_ALIASES.iter().map(|alias| (*alias).to_string()));
        names.extend(self.config.extra_aliases.iter().cloned());
        names
    }

    /// The environment's `site-packages` directory.
    ///
    /// # Errors
    ///
    /// Fails when no rule can be selected for the descriptor.
    pub fn stdlib(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> Result<PathBuf> {
        let rule = self.rule(descriptor)?;
        Ok(rule.stdlib.resolve(dest, &descriptor.version))
    }

    /// The environment's executable directory.
    ///
    /// # Errors
    ///
    /// Fails when no rule can be selected for the descriptor.
    pub fn bin_dir(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> Result<PathBuf> {
        let rule = self.rule(descriptor)?;
        Ok(match rule.bin_dir {
            Some(name) => dest.join(name),
            None => self.base.bin_dir(descriptor, dest),
        })
    }

    /// Destination of a library file: `<dest>/lib/<file name>`.
    #[must_use]
    pub fn to_lib(&self, source: &Path, dest: &Path) -> PathBuf {
        library_destination(dest, source)
    }

    /// All directories of a new environment at `dest`.
    ///
    /// # Errors
    ///
    /// Fails when no rule can be selected for the descriptor.
    pub fn env_dirs(&self, descriptor: &InterpreterDescriptor, dest: &Path) -> Result<EnvDirs> {
        Ok(EnvDirs {
            root: dest.to_path_buf(),
            bin_dir: self.bin_dir(descriptor, dest)?,
            site_packages: self.stdlib(descriptor, dest)?,
        })
    }

    /// Shared libraries in `install_dir` for the descriptor's platform.
    ///
    /// # Errors
    ///
    /// Fails when no rule can be selected for the descriptor or a matched
    /// entry cannot be read.
    pub fn shared_libs(
        &self,
        descriptor: &InterpreterDescriptor,
        install_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let rule = self.rule(descriptor)?;
        find_shared_libs(install_dir, rule.shared_lib_patterns, rule.case_sensitive)
    }

    /// Enumerate everything the environment needs from the host.
    ///
    /// Yields, in order: the base layout's entries, the shared libraries next
    /// to the resolved host executable, and on POSIX the portable-build scan
    /// of `<prefix>/lib`. The scan is skipped for interpreters installed under
    /// the configured system prefix and never yields the live stdlib.
    ///
    /// # Errors
    ///
    /// Fails up front when no rule can be selected for the descriptor; IO
    /// errors met while scanning are yielded by the iterator.
    pub fn sources(&self, descriptor: &InterpreterDescriptor) -> Result<Sources> {
        let rule = self.rule(descriptor)?;

        let base = self.base.sources(descriptor, &self.exe_names(descriptor))?;
        let install_dir = install_dir(descriptor)?;
        let shared = find_shared_libs(
            &install_dir,
            rule.shared_lib_patterns,
            rule.case_sensitive,
        )?;

        let scan = if !rule.portable_scan {
            PortableScan::empty()
        } else if descriptor.system_prefix == self.config.system_prefix {
            debug!(
                prefix = ?descriptor.system_prefix,
                "System-package install, skipping portable scan"
            );
            PortableScan::empty()
        } else {
            PortableScan::new(&descriptor.host_lib_dir(), &descriptor.system_stdlib)?
        };

        Ok(Sources {
            base: base.into_iter(),
            shared: shared.into_iter(),
            scan,
        })
    }
}

/// Directory of the resolved host executable. Falls back to the literal path
/// when it cannot be canonicalized (e.g. it does not exist).
fn install_dir(descriptor: &InterpreterDescriptor) -> Result<PathBuf> {
    let executable = std::fs::canonicalize(&descriptor.system_executable)
        .unwrap_or_else(|_| descriptor.system_executable.clone());
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            Error::invalid_descriptor("systemExecutable", "executable has no parent directory")
        })
}

/// Iterator returned by [`PyPy3Layout::sources`].
#[derive(Debug)]
pub struct Sources {
    base: vec::IntoIter<PathMapping>,
    shared: vec::IntoIter<PathBuf>,
    scan: PortableScan,
}

impl Iterator for Sources {
    type Item = Result<PathMapping>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(mapping) = self.base.next() {
            return Some(Ok(mapping));
        }
        if let Some(path) = self.shared.next() {
            return Some(Ok(PathMapping::library(path)));
        }
        self.scan.next()
    }
}

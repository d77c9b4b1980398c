//! Snapshot of the interpreter an environment is created from.
//!
//! The descriptor is produced by an interpreter-probing collaborator before
//! layout resolution starts and is never modified afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, InterpreterVersion, PlatformFamily, Result};

/// Immutable description of a source interpreter installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpreterDescriptor {
    /// Interpreter version.
    pub version: InterpreterVersion,
    /// Platform family the interpreter was built for.
    pub platform: PlatformFamily,
    /// Installation prefix (`sys.base_prefix` of the host).
    pub system_prefix: PathBuf,
    /// Live standard-library directory of the host.
    pub system_stdlib: PathBuf,
    /// Host interpreter executable.
    pub system_executable: PathBuf,
}

impl InterpreterDescriptor {
    /// Create a new descriptor.
    #[must_use]
    pub fn new(
        version: InterpreterVersion,
        platform: PlatformFamily,
        system_prefix: impl Into<PathBuf>,
        system_stdlib: impl Into<PathBuf>,
        system_executable: impl Into<PathBuf>,
    ) -> Self {
        Self {
            version,
            platform,
            system_prefix: system_prefix.into(),
            system_stdlib: system_stdlib.into(),
            system_executable: system_executable.into(),
        }
    }

    /// Parse and validate a descriptor from its JSON form.
    ///
    /// ```
    /// use isoenv_core::{InterpreterDescriptor, PlatformFamily};
    ///
    /// let descriptor = InterpreterDescriptor::from_json(r#"{
    ///     "version": "3.9.18",
    ///     "platform": "posix",
    ///     "systemPrefix": "/opt/pypy",
    ///     "systemStdlib": "/opt/pypy/lib/pypy3.9",
    ///     "systemExecutable": "/opt/pypy/bin/pypy3"
    /// }"#)?;
    /// assert_eq!(descriptor.platform, PlatformFamily::Posix);
    /// # Ok::<(), isoenv_core::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the version cannot be
    /// parsed, or [`validate`](Self::validate) rejects the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check the preconditions layout resolution relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] when a path is not absolute for
    /// the descriptor's platform family, or the executable has no parent
    /// directory.
    pub fn validate(&self) -> Result<()> {
        require_absolute(self.platform, "systemPrefix", &self.system_prefix)?;
        require_absolute(self.platform, "systemStdlib", &self.system_stdlib)?;
        require_absolute(self.platform, "systemExecutable", &self.system_executable)?;

        if self.system_executable.file_name().is_none() {
            return Err(Error::invalid_descriptor(
                "systemExecutable",
                format!(
                    "'{}' does not name a file",
                    self.system_executable.display()
                ),
            ));
        }
        Ok(())
    }

    /// Host library directory, `<prefix>/lib`.
    #[must_use]
    pub fn host_lib_dir(&self) -> PathBuf {
        self.system_prefix.join("lib")
    }
}

fn require_absolute(platform: PlatformFamily, field: &'static str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_descriptor(field, "path is empty"));
    }
    if path.is_absolute() || (platform.is_windows() && is_windows_absolute(path)) {
        return Ok(());
    }
    Err(Error::invalid_descriptor(
        field,
        format!("'{}' is not an absolute path", path.display()),
    ))
}

/// Drive-letter (`C:\`, `C:/`) and UNC (`\\server`) paths, recognised on any host.
fn is_windows_absolute(path: &Path) -> bool {
    let s = path.to_string_lossy();
    let bytes = s.as_bytes();
    if s.starts_with(r"\\") {
        return true;
    }
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'\\' | b'/')
}

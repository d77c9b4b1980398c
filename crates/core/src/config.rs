//! Resolver configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::Result;

/// Environment variable overriding [`ResolverConfig::system_prefix`].
pub const SYSTEM_PREFIX_ENV: &str = "ISOENV_SYSTEM_PREFIX";

/// Prefix of interpreters installed as the system package.
pub const DEFAULT_SYSTEM_PREFIX: &str = "/usr";

/// Tunables for layout resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Installation prefix that marks a system-package install. Interpreters
    /// installed here skip the portable-build library scan.
    pub system_prefix: PathBuf,

    /// Executable aliases added on top of the interpreter's own set.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub extra_aliases: BTreeSet<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            system_prefix: PathBuf::from(DEFAULT_SYSTEM_PREFIX),
            extra_aliases: BTreeSet::new(),
        }
    }
}

impl ResolverConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `ISOENV_SYSTEM_PREFIX` when it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(prefix) = std::env::var_os(SYSTEM_PREFIX_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(prefix = ?prefix, "System prefix overridden from environment");
            self.system_prefix = PathBuf::from(prefix);
        }
        self
    }
}

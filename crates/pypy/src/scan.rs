//! Portable-build scan of the host library directory.
//!
//! Portable PyPy builds keep the tk/tcl runtime and a number of shared
//! objects under `<prefix>/lib`. Every immediate child is materialized,
//! except the live standard library: newer releases keep it under the same
//! directory, and linking it into the environment would defeat isolation.

use isoenv_core::{PathMapping, Result};
use std::fs::ReadDir;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Lazy iterator over the children of the host library directory.
#[derive(Debug)]
pub struct PortableScan {
    entries: Option<ReadDir>,
    stdlib: PathBuf,
}

impl PortableScan {
    /// A scan that yields nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: None,
            stdlib: PathBuf::new(),
        }
    }

    /// Start scanning `host_lib`, excluding `stdlib`.
    ///
    /// A missing `host_lib`, or one that is not a directory, gives an empty
    /// scan.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory exists but cannot be listed.
    pub fn new(host_lib: &Path, stdlib: &Path) -> Result<Self> {
        if !host_lib.is_dir() {
            debug!(?host_lib, "Host library directory missing, skipping portable scan");
            return Ok(Self::empty());
        }
        Ok(Self {
            entries: Some(std::fs::read_dir(host_lib)?),
            stdlib: stdlib.to_path_buf(),
        })
    }
}

impl Iterator for PortableScan {
    type Item = Result<PathMapping>;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries.as_mut()?;
        loop {
            let path = match entries.next()? {
                Ok(entry) => entry.path(),
                Err(e) => return Some(Err(e.into())),
            };
            if path == self.stdlib {
                debug!(?path, "Excluding live standard library from portable scan");
                continue;
            }
            trace!(?path, "Portable library entry");
            return Some(Ok(PathMapping::library(path)));
        }
    }
}

//! Core types for isoenv layout resolution.
//!
//! This crate provides the vocabulary shared by interpreter-specific layout
//! resolvers:
//! - [`InterpreterDescriptor`] - immutable snapshot of the host interpreter
//! - [`PathMapping`] and [`EnvDirs`] - what to place where in a new environment
//! - [`BaseLayout`] - the generic creation contract, with [`GenericLayout`] as
//!   its default implementation
//! - [`ResolverConfig`] - tunables such as the system-package prefix
//!
//! # Example
//!
//! ```
//! use isoenv_core::{BaseLayout, GenericLayout, InterpreterDescriptor};
//!
//! let descriptor = InterpreterDescriptor::from_json(r#"{
//!     "version": "3.10.13",
//!     "platform": "posix",
//!     "systemPrefix": "/opt/pypy",
//!     "systemStdlib": "/opt/pypy/lib/pypy3.10",
//!     "systemExecutable": "/opt/pypy/bin/pypy3"
//! }"#)?;
//!
//! let names = GenericLayout.exe_names(&descriptor);
//! assert!(names.contains("python3.10"));
//! # Ok::<(), isoenv_core::Error>(())
//! ```

mod base;
mod config;
mod descriptor;
mod error;
mod mapping;
mod platform;
mod version;

pub use base::{BaseLayout, GenericLayout};
pub use config::{DEFAULT_SYSTEM_PREFIX, ResolverConfig, SYSTEM_PREFIX_ENV};
pub use descriptor::InterpreterDescriptor;
pub use error::{Error, Result};
pub use mapping::{EnvDirs, PathMapping, Target, library_destination};
pub use platform::PlatformFamily;
pub use version::{InterpreterVersion, ReleaseLevel};

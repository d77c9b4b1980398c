//! PyPy 3 layout resolver for isoenv.
//!
//! Given an [`InterpreterDescriptor`](isoenv_core::InterpreterDescriptor) for
//! a PyPy 3 installation, this crate works out:
//! - where the new environment's `site-packages` and executables live
//! - which host files (executables, shared libraries, portable-build
//!   runtime directories) must be copied or linked into it
//!
//! Layouts differ per platform family and, on Windows, per minor version.
//! They are captured in a small decision table ([`LayoutRule`]).
//!
//! # Example
//!
//! ```no_run
//! use isoenv_core::InterpreterDescriptor;
//! use isoenv_pypy::PyPy3Layout;
//! use std::path::Path;
//!
//! let descriptor = InterpreterDescriptor::from_json(r#"{
//!     "version": "3.9.18",
//!     "platform": "posix",
//!     "systemPrefix": "/opt/pypy",
//!     "systemStdlib": "/opt/pypy/lib/pypy3.9",
//!     "systemExecutable": "/opt/pypy/bin/pypy3"
//! }"#)?;
//!
//! let layout = PyPy3Layout::new();
//! let dirs = layout.env_dirs(&descriptor, Path::new("/envs/demo"))?;
//! for mapping in layout.sources(&descriptor)? {
//!     let mapping = mapping?;
//!     let _dest = mapping.destination(&dirs);
//! }
//! # Ok::<(), isoenv_core::Error>(())
//! ```

mod layout;
mod rule;
mod scan;
mod shared_libs;

pub use layout::{EXE_STEM, PYPY_ALIASES, PyPy3Layout, Sources};
pub use rule::{LayoutRule, StdlibLayout, Variant, WINDOWS_LIB_MINOR};
pub use scan::PortableScan;
pub use shared_libs::find_shared_libs;

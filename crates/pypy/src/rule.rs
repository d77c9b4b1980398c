//! Layout decision table.
//!
//! Each (platform family, version bracket) pair maps to exactly one
//! [`LayoutRule`]. Brackets are chosen by [`Variant::of`], so rules cannot
//! overlap.

use isoenv_core::{InterpreterVersion, PlatformFamily};
use std::path::{Path, PathBuf};

/// First Windows minor version whose environments use `Lib/site-packages`.
pub const WINDOWS_LIB_MINOR: u32 = 7;

/// Where `site-packages` lives relative to the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdlibLayout {
    /// `lib/pypy<release>/site-packages`.
    Versioned,
    /// `site-packages` directly under the root.
    Flat,
    /// `Lib/site-packages`.
    Lib,
}

impl StdlibLayout {
    /// Resolve against a destination root.
    #[must_use]
    pub fn resolve(self, dest: &Path, version: &InterpreterVersion) -> PathBuf {
        match self {
            Self::Versioned => dest
                .join("lib")
                .join(format!("pypy{}", version.release_str()))
                .join("site-packages"),
            Self::Flat => dest.join("site-packages"),
            Self::Lib => dest.join("Lib").join("site-packages"),
        }
    }
}

/// The closed set of PyPy 3 layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Any POSIX installation.
    Posix,
    /// Windows, minor version below [`WINDOWS_LIB_MINOR`].
    WindowsLegacy,
    /// Windows, minor version at or above [`WINDOWS_LIB_MINOR`].
    Windows,
}

impl Variant {
    /// Select the variant for a platform family and version.
    #[must_use]
    pub fn of(platform: PlatformFamily, version: &InterpreterVersion) -> Self {
        match platform {
            PlatformFamily::Posix => Self::Posix,
            PlatformFamily::Windows if version.minor < WINDOWS_LIB_MINOR => Self::WindowsLegacy,
            PlatformFamily::Windows => Self::Windows,
        }
    }

    /// The rule for this variant.
    #[must_use]
    pub const fn rule(self) -> &'static LayoutRule {
        match self {
            Self::Posix => &POSIX,
            Self::WindowsLegacy => &WINDOWS_LEGACY,
            Self::Windows => &WINDOWS,
        }
    }
}

/// One row of the decision table.
#[derive(Debug, PartialEq, Eq)]
pub struct LayoutRule {
    /// Variant this rule belongs to.
    pub variant: Variant,
    /// Destination of the environment's `site-packages`.
    pub stdlib: StdlibLayout,
    /// Executable directory name; `None` keeps the base layout's default.
    pub bin_dir: Option<&'static str>,
    /// Shared-library glob patterns, searched in order.
    pub shared_lib_patterns: &'static [&'static str],
    /// Whether shared-library patterns match file names case-sensitively.
    pub case_sensitive: bool,
    /// Whether the portable-build scan of `<prefix>/lib` runs.
    pub portable_scan: bool,
}

// libpypy3-c.so, libpypy3-c.dylib, libpypy3.9-c.so ...
static POSIX: LayoutRule = LayoutRule {
    variant: Variant::Posix,
    stdlib: StdlibLayout::Versioned,
    bin_dir: None,
    shared_lib_patterns: &["libpypy3*.*"],
    case_sensitive: true,
    portable_scan: true,
};

static WINDOWS_LEGACY: LayoutRule = LayoutRule {
    variant: Variant::WindowsLegacy,
    stdlib: StdlibLayout::Flat,
    bin_dir: Some("Scripts"),
    shared_lib_patterns: &["libpypy*.dll", "libffi*.dll"],
    case_sensitive: false,
    portable_scan: false,
};

static WINDOWS: LayoutRule = LayoutRule {
    variant: Variant::Windows,
    stdlib: StdlibLayout::Lib,
    bin_dir: Some("Scripts"),
    shared_lib_patterns: &["libpypy*.dll", "libffi*.dll"],
    case_sensitive: false,
    portable_scan: false,
};

impl LayoutRule {
    /// Select the rule for a platform family and version.
    #[must_use]
    pub fn select(platform: PlatformFamily, version: &InterpreterVersion) -> &'static Self {
        Variant::of(platform, version).rule()
    }
}

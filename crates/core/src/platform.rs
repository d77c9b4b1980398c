//! Platform family detection and parsing.
//!
//! Layouts only differ between POSIX-like and Windows-like installations, so
//! the family is a closed two-variant enum rather than a full os/arch pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// The platform family an interpreter was installed for.
///
/// Deserializes from any name [`PlatformFamily::parse`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PlatformFamily {
    /// Linux, macOS, FreeBSD and other POSIX systems.
    Posix,
    /// Windows (`os.name == "nt"`).
    Windows,
}

impl PlatformFamily {
    /// Parse from string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "posix" | "linux" | "darwin" | "macos" | "freebsd" => Some(Self::Posix),
            "windows" | "nt" | "win32" => Some(Self::Windows),
            _ => None,
        }
    }

    /// Whether this is the Windows family.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Suffix appended to executable names.
    #[must_use]
    pub const fn exe_suffix(self) -> &'static str {
        match self {
            Self::Posix => "",
            Self::Windows => ".exe",
        }
    }
}

impl TryFrom<String> for PlatformFamily {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value).ok_or_else(|| {
            Error::invalid_descriptor("platform", format!("unknown platform family '{value}'"))
        })
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

//! Interpreter version parsing.
//!
//! Accepts the forms interpreters report:
//! - "3.9" and "3.9.18"
//! - pre-releases such as "3.11.0b1", "3.12.0a3" and "3.10.0rc2"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Release level of an interpreter build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseLevel {
    /// Alpha build (`a`).
    Alpha,
    /// Beta build (`b`).
    Beta,
    /// Release candidate (`rc`).
    Candidate,
    /// Final release.
    Final,
}

/// Version of the interpreter an environment is created from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterpreterVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Micro (patch) version.
    pub micro: u32,
    /// Release level.
    pub release_level: ReleaseLevel,
    /// Pre-release serial, `0` for final releases.
    pub serial: u32,
}

impl InterpreterVersion {
    /// Create a final-release version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            release_level: ReleaseLevel::Final,
            serial: 0,
        }
    }

    /// Parse a version string (e.g., "3.9.18").
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] when the string is empty, lacks a
    /// minor component, or contains non-numeric components.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// The release identifier used in installation directory names
    /// (`major.minor`, e.g. "3.9").
    #[must_use]
    pub fn release_str(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl FromStr for InterpreterVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_version(s, "version is empty"));
        }

        let mut parts = trimmed.splitn(3, '.');
        let major = parse_number(s, parts.next().unwrap_or_default(), "major")?;
        let minor_part = parts
            .next()
            .ok_or_else(|| Error::invalid_version(s, "missing minor version"))?;

        // The pre-release suffix sits on the last component present
        let (minor, micro, tail) = match parts.next() {
            Some(micro_part) => {
                let minor = parse_number(s, minor_part, "minor")?;
                let (digits, tail) = split_suffix(micro_part);
                (minor, parse_number(s, digits, "micro")?, tail)
            }
            None => {
                let (digits, tail) = split_suffix(minor_part);
                (parse_number(s, digits, "minor")?, 0, tail)
            }
        };
        let (release_level, serial) = parse_pre_release(s, tail)?;

        Ok(Self {
            major,
            minor,
            micro,
            release_level,
            serial,
        })
    }
}

fn split_suffix(component: &str) -> (&str, &str) {
    let idx = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component.split_at(idx)
}

fn parse_number(raw: &str, component: &str, name: &str) -> Result<u32> {
    if component.is_empty() {
        return Err(Error::invalid_version(raw, format!("{name} version is empty")));
    }
    component
        .parse()
        .map_err(|_| Error::invalid_version(raw, format!("{name} version is not a number")))
}

fn parse_pre_release(raw: &str, suffix: &str) -> Result<(ReleaseLevel, u32)> {
    if suffix.is_empty() {
        return Ok((ReleaseLevel::Final, 0));
    }
    let (level, serial) = if let Some(rest) = suffix.strip_prefix("rc") {
        (ReleaseLevel::Candidate, rest)
    } else if let Some(rest) = suffix.strip_prefix('c') {
        (ReleaseLevel::Candidate, rest)
    } else if let Some(rest) = suffix.strip_prefix('b') {
        (ReleaseLevel::Beta, rest)
    } else if let Some(rest) = suffix.strip_prefix('a') {
        (ReleaseLevel::Alpha, rest)
    } else {
        return Err(Error::invalid_version(
            raw,
            format!("unknown release suffix '{suffix}'"),
        ));
    };
    let serial = if serial.is_empty() {
        0
    } else {
        parse_number(raw, serial, "serial")?
    };
    Ok((level, serial))
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        match self.release_level {
            ReleaseLevel::Alpha => write!(f, "a{}", self.serial),
            ReleaseLevel::Beta => write!(f, "b{}", self.serial),
            ReleaseLevel::Candidate => write!(f, "rc{}", self.serial),
            ReleaseLevel::Final => Ok(()),
        }
    }
}

impl TryFrom<String> for InterpreterVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<InterpreterVersion> for String {
    fn from(value: InterpreterVersion) -> Self {
        value.to_string()
    }
}

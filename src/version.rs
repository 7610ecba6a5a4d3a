//! `RINEX` revision description
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The only `RINEX` revision this library can read and produce
pub const SUPPORTED_VERSION: Version = Version { major: 3, minor: 0 };

/// Version is used to describe RINEX standards revisions.
/// It is declared as a floating point number in the header (`3.00`),
/// the minor number being the two decimal digits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number (hundredths)
    pub minor: u8,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParsingError {
    #[error("invalid version descriptor \"{0}\"")]
    InvalidDescriptor(String),
}

impl Default for Version {
    /// Builds a default `Version` object
    fn default() -> Self {
        SUPPORTED_VERSION
    }
}

impl std::fmt::Display for Version {
    /// Formats as declared in the header: `3.00`
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> (u8, u8) {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = s
            .parse::<f64>()
            .map_err(|_| ParsingError::InvalidDescriptor(s.to_string()))?;
        if !(0.0..256.0).contains(&value) {
            return Err(ParsingError::InvalidDescriptor(s.to_string()));
        }
        let hundredths = (value * 100.0).round() as u32;
        // revisions are expressed in hundredths
        if (value - hundredths as f64 / 100.0).abs() > 1.0E-9 {
            return Err(ParsingError::InvalidDescriptor(s.to_string()));
        }
        let (major, minor) = (hundredths / 100, hundredths % 100);
        if major > u8::MAX as u32 {
            return Err(ParsingError::InvalidDescriptor(s.to_string()));
        }
        Ok(Self {
            major: major as u8,
            minor: minor as u8,
        })
    }
}

impl Version {
    /// Builds a new `Version` object
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns true if this version is supported
    pub fn is_supported(&self) -> bool {
        *self == SUPPORTED_VERSION
    }
}

//! Calendar timestamps of TIME OF FIRST/LAST OBS
use crate::{
    columns::{column, parse_float, parse_int},
    prelude::{Constellation, Epoch, TimeScale},
};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time system tag, as found in columns 44-51
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeSystem {
    /// GPS time
    #[default]
    GPS,
    /// GLONASS time (UTC based)
    GLO,
    /// Galileo system time
    GAL,
    /// QZSS time
    QZS,
    /// BeiDou time
    BDT,
    /// IRNSS time
    IRN,
    UTC,
    TAI,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParsingError {
    #[error("unknown time system \"{0}\"")]
    UnknownTimeSystem(String),
}

impl std::fmt::Display for TimeSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GPS => f.write_str("GPS"),
            Self::GLO => f.write_str("GLO"),
            Self::GAL => f.write_str("GAL"),
            Self::QZS => f.write_str("QZS"),
            Self::BDT => f.write_str("BDT"),
            Self::IRN => f.write_str("IRN"),
            Self::UTC => f.write_str("UTC"),
            Self::TAI => f.write_str("TAI"),
        }
    }
}

impl std::str::FromStr for TimeSystem {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GPS" => Ok(Self::GPS),
            "GLO" => Ok(Self::GLO),
            "GAL" => Ok(Self::GAL),
            "QZS" => Ok(Self::QZS),
            "BDT" => Ok(Self::BDT),
            "IRN" => Ok(Self::IRN),
            "UTC" => Ok(Self::UTC),
            "TAI" => Ok(Self::TAI),
            other => Err(ParsingError::UnknownTimeSystem(other.to_string())),
        }
    }
}

impl TimeSystem {
    /// Time system implied by a single system file, when the tag is omitted.
    /// Mixed files default to GPS.
    pub fn default_for(constellation: Constellation) -> Self {
        match constellation {
            Constellation::Glonass => Self::GLO,
            Constellation::Galileo => Self::GAL,
            Constellation::QZSS => Self::QZS,
            Constellation::BeiDou => Self::BDT,
            Constellation::IRNSS => Self::IRN,
            _ => Self::GPS,
        }
    }
    /// [TimeScale] to express this system in.
    /// QZSS and IRNSS times are aligned to GPS, GLONASS time to UTC.
    pub fn timescale(&self) -> TimeScale {
        match self {
            Self::GPS | Self::QZS | Self::IRN => TimeScale::GPST,
            Self::GAL => TimeScale::GST,
            Self::BDT => TimeScale::BDT,
            Self::GLO | Self::UTC => TimeScale::UTC,
            Self::TAI => TimeScale::TAI,
        }
    }
}

/// Broken down calendar time, kept exactly as declared
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CivilTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Seconds and fraction of seconds
    pub second: f64,
    pub time_system: TimeSystem,
}

impl CivilTime {
    /// Builds a new [CivilTime]
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
        time_system: TimeSystem,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            time_system,
        }
    }

    /// Converts to [Epoch], None if this is not a valid date
    pub fn to_epoch(&self) -> Option<Epoch> {
        if !self.second.is_finite() || self.second < 0.0 {
            return None;
        }
        let whole = self.second.trunc();
        let nanos = ((self.second - whole) * 1.0E9).round().min(999_999_999.0) as u32;
        Epoch::maybe_from_gregorian(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            whole as u8,
            nanos,
            self.time_system.timescale(),
        )
        .ok()
    }

    /// Parses columns 1-51. Blank time system tag
    /// is replaced by `default_system`.
    /// Returns the offending field on failure.
    pub(crate) fn parse(content: &str, default_system: TimeSystem) -> Result<Self, String> {
        let year = parse_int::<i32>(column(content, 0, 6))?;
        let month = parse_int::<u8>(column(content, 6, 12))?;
        let day = parse_int::<u8>(column(content, 12, 18))?;
        let hour = parse_int::<u8>(column(content, 18, 24))?;
        let minute = parse_int::<u8>(column(content, 24, 30))?;
        let second = parse_float(column(content, 30, 43))?;

        let tag = column(content, 43, 51).trim();
        let time_system = if tag.is_empty() {
            default_system
        } else {
            tag.parse::<TimeSystem>().map_err(|_| tag.to_string())?
        };

        Ok(Self::new(year, month, day, hour, minute, second, time_system))
    }

    /// Formats as columns 1-51
    pub(crate) fn format(&self) -> String {
        format!(
            "{:>6}{:>6}{:>6}{:>6}{:>6}{:>13.7}{:>8}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.time_system.to_string(),
        )
    }
}

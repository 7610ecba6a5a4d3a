//! Receiver and antenna
use crate::{
    columns::{column, fit, fixed, parse_float, parse_system, system_code},
    fmt_rinex,
    prelude::{Constellation, FormattingError},
};

use std::{
    io::{BufWriter, Write},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GNSS receiver description
#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Receiver {
    /// Receiver (hardware) model
    pub model: String,
    /// Receiver (hardware) identification info
    pub sn: String, // serial #
    /// Receiver embedded software info
    pub firmware: String, // firmware #
}

impl Receiver {
    /// Formats [Receiver] into [BufWriter]
    pub(crate) fn format<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        writeln!(
            w,
            "{}",
            fmt_rinex(
                &format!(
                    "{:<20}{:<20}{:<20}",
                    fit(&self.sn, 20, "receiver number")?,
                    fit(&self.model, 20, "receiver type")?,
                    fit(&self.firmware, 20, "receiver version")?,
                ),
                "REC # / TYPE / VERS"
            )
        )?;
        Ok(())
    }

    pub fn with_model(&self, model: &str) -> Self {
        let mut s = self.clone();
        s.model = model.to_string();
        s
    }

    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = sn.to_string();
        s
    }

    pub fn with_firmware(&self, firmware: &str) -> Self {
        let mut s = self.clone();
        s.firmware = firmware.to_string();
        s
    }
}

impl FromStr for Receiver {
    type Err = std::convert::Infallible;
    /// Interprets columns 1-60 of a REC # / TYPE / VERS line
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(Receiver {
            sn: column(content, 0, 20).trim().to_string(),
            model: column(content, 20, 40).trim().to_string(),
            firmware: column(content, 40, 60).trim().to_string(),
        })
    }
}

/// Receiver antenna description
#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Antenna {
    /// Hardware model / make descriptor
    pub model: String,
    /// Serial number / identification number
    pub sn: String,
}

impl Antenna {
    /// Formats [Antenna] into [BufWriter]
    pub(crate) fn format<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        writeln!(
            w,
            "{}",
            fmt_rinex(
                &format!(
                    "{:<20}{:<20}",
                    fit(&self.sn, 20, "antenna number")?,
                    fit(&self.model, 20, "antenna type")?,
                ),
                "ANT # / TYPE"
            )
        )?;
        Ok(())
    }

    /// Sets desired model
    pub fn with_model(&self, m: &str) -> Self {
        let mut s = self.clone();
        s.model = m.to_string();
        s
    }

    /// Sets desired Serial Number
    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = sn.to_string();
        s
    }
}

impl FromStr for Antenna {
    type Err = std::convert::Infallible;
    /// Interprets columns 1-60 of an ANT # / TYPE line
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(Antenna {
            sn: column(content, 0, 20).trim().to_string(),
            model: column(content, 20, 40).trim().to_string(),
        })
    }
}

/// Average phase center position, for one system and observable
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseCenter {
    /// System this offset applies to
    pub constellation: Constellation,
    /// Three letter observable code (like "L1C")
    pub observable: String,
    /// North/East/Up (fixed station) or X/Y/Z (vehicle) offset, in meters
    pub offset: (f64, f64, f64),
}

impl PhaseCenter {
    /// Builds a new [PhaseCenter]
    pub fn new(constellation: Constellation, observable: &str, offset: (f64, f64, f64)) -> Self {
        Self {
            constellation,
            observable: observable.to_string(),
            offset,
        }
    }

    /// Interprets columns 1-60 of an ANTENNA: PHASECENTER line.
    /// Returns the offending field on failure.
    pub(crate) fn parse(content: &str) -> Result<Self, String> {
        Ok(Self {
            constellation: parse_system(column(content, 0, 1))?,
            observable: column(content, 2, 5).trim().to_string(),
            offset: (
                parse_float(column(content, 5, 14))?,
                parse_float(column(content, 14, 28))?,
                parse_float(column(content, 28, 42))?,
            ),
        })
    }

    /// Formats [PhaseCenter] into [BufWriter]
    pub(crate) fn format<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        let system = system_code(self.constellation).ok_or_else(|| {
            FormattingError::InvalidHeaderState(format!(
                "phase center: no system code for {:?}",
                self.constellation
            ))
        })?;
        writeln!(
            w,
            "{}",
            fmt_rinex(
                &format!(
                    "{} {:<3}{}{}{}",
                    system,
                    fit(&self.observable, 3, "phase center observable")?,
                    fixed(format!("{:>9.4}", self.offset.0), 9, "phase center")?,
                    fixed(format!("{:>14.4}", self.offset.1), 14, "phase center")?,
                    fixed(format!("{:>14.4}", self.offset.2), 14, "phase center")?,
                ),
                "ANTENNA: PHASECENTER"
            )
        )?;
        Ok(())
    }
}

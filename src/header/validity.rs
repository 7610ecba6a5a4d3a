//! Header sections bookkeeping
use crate::{error::ParsingError, version::Version};

use bitflags::bitflags;
use itertools::Itertools;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// [Validity] tells which header sections were populated.
    /// Flags are declared in the order sections are to be written.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Validity: u32 {
        const VERSION = 0x01;
        const RUN_BY = 0x02;
        const COMMENT = 0x04;
        const MARKER_NAME = 0x08;
        const MARKER_NUMBER = 0x10;
        const MARKER_TYPE = 0x20;
        const OBSERVER = 0x40;
        const RECEIVER = 0x80;
        const ANTENNA_TYPE = 0x100;
        const ANTENNA_POSITION = 0x200;
        const ANTENNA_DELTA_HEN = 0x400;
        const ANTENNA_DELTA_XYZ = 0x800;
        const ANTENNA_PHASE_CENTER = 0x1000;
        const ANTENNA_BORESIGHT_XYZ = 0x2000;
        const ANTENNA_ZERODIR_AZIMUTH = 0x4000;
        const ANTENNA_ZERODIR_XYZ = 0x8000;
        const CENTER_OF_MASS = 0x10000;
        const SYSTEM_OBS_TYPES = 0x20000;
        const SIGNAL_STRENGTH_UNIT = 0x40000;
        const INTERVAL = 0x80000;
        const FIRST_TIME = 0x100000;
        const LAST_TIME = 0x200000;
        const RECEIVER_OFFSET = 0x400000;
        const SYSTEM_DCBS_APPLIED = 0x800000;
        const SYSTEM_PCVS_APPLIED = 0x1000000;
        const SYSTEM_SCALE_FACTOR = 0x2000000;
        const LEAP_SECONDS = 0x4000000;
        const NUM_SATS = 0x8000000;
        const PRN_OBS = 0x10000000;
        const END_OF_HEADER = 0x20000000;
    }
}

/// Section labels, in canonical order
pub(crate) const LABELS: [(Validity, &str); 30] = [
    (Validity::VERSION, "RINEX VERSION / TYPE"),
    (Validity::RUN_BY, "PGM / RUN BY / DATE"),
    (Validity::COMMENT, "COMMENT"),
    (Validity::MARKER_NAME, "MARKER NAME"),
    (Validity::MARKER_NUMBER, "MARKER NUMBER"),
    (Validity::MARKER_TYPE, "MARKER TYPE"),
    (Validity::OBSERVER, "OBSERVER / AGENCY"),
    (Validity::RECEIVER, "REC # / TYPE / VERS"),
    (Validity::ANTENNA_TYPE, "ANT # / TYPE"),
    (Validity::ANTENNA_POSITION, "APPROX POSITION XYZ"),
    (Validity::ANTENNA_DELTA_HEN, "ANTENNA: DELTA H/E/N"),
    (Validity::ANTENNA_DELTA_XYZ, "ANTENNA: DELTA X/Y/Z"),
    (Validity::ANTENNA_PHASE_CENTER, "ANTENNA: PHASECENTER"),
    (Validity::ANTENNA_BORESIGHT_XYZ, "ANTENNA: B.SIGHT XYZ"),
    (Validity::ANTENNA_ZERODIR_AZIMUTH, "ANTENNA: ZERODIR AZI"),
    (Validity::ANTENNA_ZERODIR_XYZ, "ANTENNA: ZERODIR XYZ"),
    (Validity::CENTER_OF_MASS, "CENTER OF MASS: XYZ"),
    (Validity::SYSTEM_OBS_TYPES, "SYS / # / OBS TYPES"),
    (Validity::SIGNAL_STRENGTH_UNIT, "SIGNAL STRENGTH UNIT"),
    (Validity::INTERVAL, "INTERVAL"),
    (Validity::FIRST_TIME, "TIME OF FIRST OBS"),
    (Validity::LAST_TIME, "TIME OF LAST OBS"),
    (Validity::RECEIVER_OFFSET, "RCV CLOCK OFFS APPL"),
    (Validity::SYSTEM_DCBS_APPLIED, "SYS / DCBS APPLIED"),
    (Validity::SYSTEM_PCVS_APPLIED, "SYS / PCVS APPLIED"),
    (Validity::SYSTEM_SCALE_FACTOR, "SYS / SCALE FACTOR"),
    (Validity::LEAP_SECONDS, "LEAP SECONDS"),
    (Validity::NUM_SATS, "# OF SATELLITES"),
    (Validity::PRN_OBS, "PRN / # OF OBS"),
    (Validity::END_OF_HEADER, "END OF HEADER"),
];

/// Mandatory sections, per revision
const REQUIRED_SECTIONS: [(Version, Validity); 1] = [(
    Version { major: 3, minor: 0 },
    Validity::VERSION
        .union(Validity::RUN_BY)
        .union(Validity::MARKER_NAME)
        .union(Validity::SYSTEM_OBS_TYPES)
        .union(Validity::FIRST_TIME)
        .union(Validity::END_OF_HEADER),
)];

lazy_static! {
    static ref SECTIONS: HashMap<&'static str, Validity> =
        LABELS.iter().map(|(flag, label)| (*label, *flag)).collect();
}

impl Validity {
    /// Returns section designated by this label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        SECTIONS.get(label).copied()
    }

    /// Returns the label of this section, None if
    /// self is not exactly one flag
    pub fn label(&self) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|(flag, _)| flag == self)
            .map(|(_, label)| *label)
    }

    /// Labels of all sections contained in self, in canonical order
    pub fn labels(&self) -> Vec<&'static str> {
        LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }

    /// Describes all sections contained in self
    pub fn describe(&self) -> String {
        if self.is_empty() {
            "none".to_string()
        } else {
            self.labels().iter().map(|l| format!("\"{}\"", l)).join(", ")
        }
    }

    /// Mandatory sections for this revision
    pub fn required(version: Version) -> Result<Self, ParsingError> {
        REQUIRED_SECTIONS
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, mask)| *mask)
            .ok_or_else(|| ParsingError::UnsupportedVersion(version.to_string()))
    }

    /// True if all `required` sections are contained in self
    pub fn is_complete(&self, required: Self) -> bool {
        self.contains(required)
    }

    /// `required` sections self is missing
    pub fn missing(&self, required: Self) -> Self {
        required.difference(*self)
    }
}

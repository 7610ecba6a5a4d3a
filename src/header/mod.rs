//! RINEX 3.00 Observation file Header
use crate::{
    epoch::CivilTime,
    hardware::{Antenna, PhaseCenter, Receiver},
    obs_id::ObsID,
    prelude::{Constellation, ParsingError, SV},
    version::Version,
};

use std::collections::BTreeMap;

mod dump;
mod formatting;
mod parsing;
mod validity;

#[cfg(feature = "serde")]
mod pairs;

pub use parsing::Parser;
pub use validity::Validity;

pub(crate) use validity::LABELS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scale factors a system may apply to its observations
pub const SCALE_FACTORS: [u16; 4] = [1, 10, 100, 1000];

/// DCB or PCV corrections applied to the observations of one system
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrectionInfo {
    /// Constellation to which this correction applies to
    pub constellation: Constellation,
    /// Program used to apply the correction
    pub program: String,
    /// Source of corrections (URL)
    pub source: String,
}

impl CorrectionInfo {
    pub fn new(constellation: Constellation, program: &str, source: &str) -> Self {
        Self {
            constellation,
            program: program.to_string(),
            source: source.to_string(),
        }
    }
}

/// Describes a RINEX 3.00 Observation header.
/// Each section is only meaningful if its [Validity] flag is set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Revision
    pub version: Version,
    /// Satellite system(s) of this file, None if not declared
    pub constellation: Option<Constellation>,
    /// Program that created this file
    pub program: String,
    /// Agency that created this file
    pub run_by: String,
    /// File creation date, stored as is
    pub date: String,
    /// Comments, in order of appearance
    pub comments: Vec<String>,
    pub marker_name: String,
    pub marker_number: String,
    pub marker_type: String,
    pub observer: String,
    pub agency: String,
    /// Receiver information
    pub rcvr: Receiver,
    /// Receiver antenna information
    pub rcvr_antenna: Antenna,
    /// Approximate marker position (ECEF m)
    pub ground_position: (f64, f64, f64),
    /// Antenna height/east/north eccentricities (m)
    pub antenna_delta_hen: (f64, f64, f64),
    /// Antenna eccentricities in body fixed frame (m)
    pub antenna_delta_xyz: (f64, f64, f64),
    pub phase_center: PhaseCenter,
    /// Antenna boresight direction (unit vector)
    pub antenna_boresight: (f64, f64, f64),
    /// Azimuth of the antenna zero direction (degrees from north)
    pub antenna_zerodir_azimuth: f64,
    /// Zero direction of the antenna (unit vector)
    pub antenna_zerodir_xyz: (f64, f64, f64),
    /// Vehicle center of mass (m)
    pub center_of_mass: (f64, f64, f64),
    /// Observables of each system. The order defines the
    /// order in which observations appear in the record.
    #[cfg_attr(feature = "serde", serde(with = "pairs::map"))]
    pub obs_types: BTreeMap<Constellation, Vec<ObsID>>,
    pub signal_strength_unit: String,
    /// Sampling interval (s)
    pub sampling_interval: f64,
    /// First observation
    pub first_obs: CivilTime,
    /// Last observation
    pub last_obs: CivilTime,
    /// True if receiver clock offset was applied to the observations
    pub rcvr_clock_offset_applied: bool,
    /// Differential code bias corrections
    pub dcbs_compensations: Vec<CorrectionInfo>,
    /// Phase center variation corrections
    pub pcvs_compensations: Vec<CorrectionInfo>,
    /// Scale factors applied to the observations, per system
    #[cfg_attr(feature = "serde", serde(with = "pairs::nested_map"))]
    pub scale_factors: BTreeMap<Constellation, BTreeMap<ObsID, u16>>,
    pub leap_seconds: i32,
    /// Number of satellites in this file
    pub nb_satellites: u32,
    /// Number of observations, per satellite and observable
    #[cfg_attr(feature = "serde", serde(with = "pairs::map"))]
    pub prn_obs: BTreeMap<SV, Vec<u32>>,
    /// Populated sections
    pub validity: Validity,
}

impl Header {
    /// Resets all fields
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Verifies all mandatory sections of this revision are present
    pub fn check_completeness(&self) -> Result<(), ParsingError> {
        let required = Validity::required(self.version)?;
        if self.validity.is_complete(required) {
            Ok(())
        } else {
            Err(ParsingError::IncompleteHeader {
                missing: self.validity.missing(required),
            })
        }
    }

    /// Observables declared for this system
    pub fn observables(&self, constellation: Constellation) -> Option<&Vec<ObsID>> {
        self.obs_types.get(&constellation)
    }

    fn with_section(&self, flag: Validity) -> Self {
        let mut s = self.clone();
        s.validity |= flag;
        s
    }

    /// Sets revision and satellite system
    pub fn with_version(&self, version: Version, constellation: Constellation) -> Self {
        let mut s = self.with_section(Validity::VERSION);
        s.version = version;
        s.constellation = Some(constellation);
        s
    }

    /// Sets program, agency and creation date
    pub fn with_general_information(&self, program: &str, run_by: &str, date: &str) -> Self {
        let mut s = self.with_section(Validity::RUN_BY);
        s.program = program.to_string();
        s.run_by = run_by.to_string();
        s.date = date.to_string();
        s
    }

    /// Adds one comment
    pub fn with_comment(&self, c: &str) -> Self {
        let mut s = self.with_section(Validity::COMMENT);
        s.comments.push(c.to_string());
        s
    }

    pub fn with_marker_name(&self, name: &str) -> Self {
        let mut s = self.with_section(Validity::MARKER_NAME);
        s.marker_name = name.to_string();
        s
    }

    pub fn with_marker_number(&self, number: &str) -> Self {
        let mut s = self.with_section(Validity::MARKER_NUMBER);
        s.marker_number = number.to_string();
        s
    }

    pub fn with_marker_type(&self, marker_type: &str) -> Self {
        let mut s = self.with_section(Validity::MARKER_TYPE);
        s.marker_type = marker_type.to_string();
        s
    }

    pub fn with_observer(&self, observer: &str, agency: &str) -> Self {
        let mut s = self.with_section(Validity::OBSERVER);
        s.observer = observer.to_string();
        s.agency = agency.to_string();
        s
    }

    pub fn with_receiver(&self, r: Receiver) -> Self {
        let mut s = self.with_section(Validity::RECEIVER);
        s.rcvr = r;
        s
    }

    pub fn with_receiver_antenna(&self, a: Antenna) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_TYPE);
        s.rcvr_antenna = a;
        s
    }

    /// Sets approximate marker position (ECEF m)
    pub fn with_ground_position(&self, xyz: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_POSITION);
        s.ground_position = xyz;
        s
    }

    pub fn with_antenna_delta_hen(&self, hen: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_DELTA_HEN);
        s.antenna_delta_hen = hen;
        s
    }

    pub fn with_antenna_delta_xyz(&self, xyz: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_DELTA_XYZ);
        s.antenna_delta_xyz = xyz;
        s
    }

    pub fn with_phase_center(&self, pc: PhaseCenter) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_PHASE_CENTER);
        s.phase_center = pc;
        s
    }

    pub fn with_antenna_boresight(&self, xyz: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_BORESIGHT_XYZ);
        s.antenna_boresight = xyz;
        s
    }

    pub fn with_antenna_zerodir_azimuth(&self, azimuth: f64) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_ZERODIR_AZIMUTH);
        s.antenna_zerodir_azimuth = azimuth;
        s
    }

    pub fn with_antenna_zerodir_xyz(&self, xyz: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::ANTENNA_ZERODIR_XYZ);
        s.antenna_zerodir_xyz = xyz;
        s
    }

    pub fn with_center_of_mass(&self, xyz: (f64, f64, f64)) -> Self {
        let mut s = self.with_section(Validity::CENTER_OF_MASS);
        s.center_of_mass = xyz;
        s
    }

    /// Declares observables of given system
    pub fn with_observables(&self, constellation: Constellation, observables: &[ObsID]) -> Self {
        let mut s = self.with_section(Validity::SYSTEM_OBS_TYPES);
        s.obs_types.insert(constellation, observables.to_vec());
        s
    }

    pub fn with_signal_strength_unit(&self, unit: &str) -> Self {
        let mut s = self.with_section(Validity::SIGNAL_STRENGTH_UNIT);
        s.signal_strength_unit = unit.to_string();
        s
    }

    /// Sets sampling interval (s)
    pub fn with_sampling_interval(&self, interval: f64) -> Self {
        let mut s = self.with_section(Validity::INTERVAL);
        s.sampling_interval = interval;
        s
    }

    pub fn with_first_obs(&self, t: CivilTime) -> Self {
        let mut s = self.with_section(Validity::FIRST_TIME);
        s.first_obs = t;
        s
    }

    pub fn with_last_obs(&self, t: CivilTime) -> Self {
        let mut s = self.with_section(Validity::LAST_TIME);
        s.last_obs = t;
        s
    }

    pub fn with_receiver_clock_offset_applied(&self, applied: bool) -> Self {
        let mut s = self.with_section(Validity::RECEIVER_OFFSET);
        s.rcvr_clock_offset_applied = applied;
        s
    }

    pub fn with_dcbs_compensation(&self, dcb: CorrectionInfo) -> Self {
        let mut s = self.with_section(Validity::SYSTEM_DCBS_APPLIED);
        s.dcbs_compensations.push(dcb);
        s
    }

    pub fn with_pcvs_compensation(&self, pcv: CorrectionInfo) -> Self {
        let mut s = self.with_section(Validity::SYSTEM_PCVS_APPLIED);
        s.pcvs_compensations.push(pcv);
        s
    }

    /// Applies scale `factor` to these observables of given system
    pub fn with_scale_factor(
        &self,
        constellation: Constellation,
        factor: u16,
        observables: &[ObsID],
    ) -> Self {
        let mut s = self.with_section(Validity::SYSTEM_SCALE_FACTOR);
        let factors = s.scale_factors.entry(constellation).or_default();
        for obs in observables {
            factors.insert(*obs, factor);
        }
        s
    }

    pub fn with_leap_seconds(&self, leap: i32) -> Self {
        let mut s = self.with_section(Validity::LEAP_SECONDS);
        s.leap_seconds = leap;
        s
    }

    pub fn with_nb_satellites(&self, n: u32) -> Self {
        let mut s = self.with_section(Validity::NUM_SATS);
        s.nb_satellites = n;
        s
    }

    /// Sets number of observations of this satellite, per observable
    pub fn with_prn_obs(&self, sv: SV, counts: &[u32]) -> Self {
        let mut s = self.with_section(Validity::PRN_OBS);
        s.prn_obs.insert(sv, counts.to_vec());
        s
    }

    /// Marks this header as terminated
    pub fn with_end_of_header(&self) -> Self {
        self.with_section(Validity::END_OF_HEADER)
    }
}

//! Human readable header summary
use crate::{
    columns::system_code,
    epoch::CivilTime,
    header::{CorrectionInfo, Header, Validity},
    obs_id::Registry,
    prelude::{Constellation, SV},
};

use itertools::Itertools;
use std::io::{BufWriter, Write};

fn system_name(constellation: Constellation) -> String {
    match system_code(constellation) {
        Some(code) => format!("{} ({:?})", code, constellation),
        None => format!("{:?}", constellation),
    }
}

fn fmt_sv(sv: &SV) -> String {
    match system_code(sv.constellation) {
        Some(code) => format!("{}{:02}", code, sv.prn),
        None => format!("{:?}{:02}", sv.constellation, sv.prn),
    }
}

fn fmt_epoch(t: &CivilTime) -> String {
    format!(
        "{:04}/{:02}/{:02} {:02}:{:02}:{:010.7} {}",
        t.year, t.month, t.day, t.hour, t.minute, t.second, t.time_system
    )
}

fn fmt_xyz(xyz: (f64, f64, f64)) -> String {
    format!("({:.4}, {:.4}, {:.4})", xyz.0, xyz.1, xyz.2)
}

impl Header {
    /// Writes a human readable summary of this [Header]: required sections
    /// first, followed by a validity verdict and every optional section present.
    /// Observables are described with `registry` names.
    pub fn dump<W: Write>(&self, registry: &Registry, w: &mut BufWriter<W>) -> std::io::Result<()> {
        writeln!(w, "{:-^80}", " REQUIRED ")?;
        let system = self
            .constellation
            .map(system_name)
            .unwrap_or_else(|| "undefined".to_string());
        writeln!(
            w,
            "Rinex Version {},  File type OBSERVATION DATA,  System {}.",
            self.version, system
        )?;
        writeln!(
            w,
            "Prgm: {},  Run: {},  By: {}",
            self.program, self.date, self.run_by
        )?;
        writeln!(
            w,
            "Marker name: {}, Marker type: {}.",
            self.marker_name, self.marker_type
        )?;
        writeln!(w, "Observer : {},  Agency: {}", self.observer, self.agency)?;
        writeln!(
            w,
            "Rec#: {},  Type: {},  Vers: {}",
            self.rcvr.sn, self.rcvr.model, self.rcvr.firmware
        )?;
        writeln!(
            w,
            "Antenna # : {},  Type : {}",
            self.rcvr_antenna.sn, self.rcvr_antenna.model
        )?;
        writeln!(w, "Position      (XYZ,m) : {}.", fmt_xyz(self.ground_position))?;
        writeln!(w, "Antenna Delta (HEN,m) : {}.", fmt_xyz(self.antenna_delta_hen))?;

        for (constellation, observables) in self.obs_types.iter() {
            writeln!(
                w,
                "{} Observation types ({}):",
                system_name(*constellation),
                observables.len()
            )?;
            for (nth, obs) in observables.iter().enumerate() {
                writeln!(w, " Type #{} = {}", nth + 1, registry.dump(obs))?;
            }
        }

        writeln!(w, "Time of first obs {}", fmt_epoch(&self.first_obs))?;

        match Validity::required(self.version) {
            Ok(required) => {
                if self.validity.is_complete(required) {
                    writeln!(w, "(This header is VALID {} RINEX 3.)", self.version)?;
                } else {
                    writeln!(w, "(This header is NOT VALID RINEX 3.)")?;
                    for label in self.validity.missing(required).labels() {
                        writeln!(w, " {:<20} is NOT valid", label)?;
                    }
                }
            },
            Err(_) => {
                writeln!(w, "(Revision {} is not supported.)", self.version)?;
            },
        }

        writeln!(w, "{:-^80}", " OPTIONAL ")?;
        if self.validity.contains(Validity::MARKER_NUMBER) {
            writeln!(w, "Marker number : {}", self.marker_number)?;
        }
        if self.validity.contains(Validity::ANTENNA_DELTA_XYZ) {
            writeln!(
                w,
                "Antenna Delta    (XYZ,m) : {}",
                fmt_xyz(self.antenna_delta_xyz)
            )?;
        }
        if self.validity.contains(Validity::ANTENNA_PHASE_CENTER) {
            writeln!(
                w,
                "Antenna PhaseCtr (XYZ,m) : {} {} {}",
                system_name(self.phase_center.constellation),
                self.phase_center.observable,
                fmt_xyz(self.phase_center.offset)
            )?;
        }
        if self.validity.contains(Validity::ANTENNA_BORESIGHT_XYZ) {
            writeln!(
                w,
                "Antenna B.sight  (XYZ,m) : {}",
                fmt_xyz(self.antenna_boresight)
            )?;
        }
        if self.validity.contains(Validity::ANTENNA_ZERODIR_AZIMUTH) {
            writeln!(
                w,
                "Antenna ZeroDir  (deg)   : {:.4}",
                self.antenna_zerodir_azimuth
            )?;
        }
        if self.validity.contains(Validity::ANTENNA_ZERODIR_XYZ) {
            writeln!(
                w,
                "Antenna ZeroDir  (XYZ,m) : {}",
                fmt_xyz(self.antenna_zerodir_xyz)
            )?;
        }
        if self.validity.contains(Validity::CENTER_OF_MASS) {
            writeln!(
                w,
                "Center of Mass   (XYZ,m) : {}",
                fmt_xyz(self.center_of_mass)
            )?;
        }
        if self.validity.contains(Validity::SIGNAL_STRENGTH_UNIT) {
            writeln!(w, "Signal Strength Unit = {}", self.signal_strength_unit)?;
        }
        if self.validity.contains(Validity::INTERVAL) {
            writeln!(w, "Interval = {:7.3}", self.sampling_interval)?;
        }
        if self.validity.contains(Validity::LAST_TIME) {
            writeln!(w, "Time of Last Obs {}", fmt_epoch(&self.last_obs))?;
        }
        if self.validity.contains(Validity::RECEIVER_OFFSET) {
            writeln!(
                w,
                "Clock offset record is present and offsets {} applied.",
                if self.rcvr_clock_offset_applied {
                    "ARE"
                } else {
                    "are NOT"
                }
            )?;
        }
        if self.validity.contains(Validity::SYSTEM_DCBS_APPLIED) {
            Self::dump_corrections("DCBS", &self.dcbs_compensations, w)?;
        }
        if self.validity.contains(Validity::SYSTEM_PCVS_APPLIED) {
            Self::dump_corrections("PCVS", &self.pcvs_compensations, w)?;
        }
        if self.validity.contains(Validity::SYSTEM_SCALE_FACTOR) {
            for (constellation, factors) in self.scale_factors.iter() {
                writeln!(w, "{} scale factors applied:", system_name(*constellation))?;
                for (obs, factor) in factors.iter() {
                    writeln!(w, "   {} {}", registry.dump(obs), factor)?;
                }
            }
        }
        if self.validity.contains(Validity::LEAP_SECONDS) {
            writeln!(w, "Leap seconds: {}", self.leap_seconds)?;
        }
        if self.validity.contains(Validity::NUM_SATS) {
            writeln!(w, "Number of Satellites with data : {}", self.nb_satellites)?;
        }
        if self.validity.contains(Validity::PRN_OBS) {
            writeln!(w, " PRN and number of observations for each obs type:")?;
            for (sv, counts) in self.prn_obs.iter() {
                writeln!(
                    w,
                    " {}  {}",
                    fmt_sv(sv),
                    counts.iter().map(|n| format!("{:>6}", n)).join(" ")
                )?;
            }
        }

        writeln!(w, "Comments ({}) :", self.comments.len())?;
        for comment in self.comments.iter() {
            writeln!(w, "{}", comment)?;
        }
        writeln!(w, "{:-^80}", " END OF HEADER ")?;
        Ok(())
    }

    fn dump_corrections<W: Write>(
        kind: &str,
        corrections: &[CorrectionInfo],
        w: &mut BufWriter<W>,
    ) -> std::io::Result<()> {
        for correction in corrections {
            writeln!(
                w,
                "System {} Correction Applied to {} data using program {}",
                kind,
                system_name(correction.constellation),
                correction.program
            )?;
            writeln!(w, " from source {}.", correction.source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        epoch::TimeSystem,
        obs_id::{CarrierBand, ObsID, ObservationType, TrackingCode},
        version::SUPPORTED_VERSION,
    };

    fn dump(header: &Header) -> String {
        let mut w = BufWriter::new(Vec::new());
        header.dump(&Registry::default(), &mut w).unwrap();
        String::from_utf8(w.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn valid_header() {
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_general_information("teqc", "UNAVCO", "20060324 13:10:36UTC")
            .with_marker_name("A 9080")
            .with_observables(
                Constellation::GPS,
                &[ObsID::new(
                    ObservationType::RANGE,
                    CarrierBand::L1,
                    TrackingCode::CA,
                )],
            )
            .with_first_obs(CivilTime::new(2006, 3, 24, 13, 10, 36.0, TimeSystem::GPS))
            .with_leap_seconds(14)
            .with_comment("first comment")
            .with_end_of_header();

        let content = dump(&header);
        assert!(content.contains("(This header is VALID 3.00 RINEX 3.)"));
        assert!(content.contains(" Type #1 = L1/E1 C/A pseudorange"));
        assert!(content.contains("Time of first obs 2006/03/24 13:10:36.0000000 GPS"));
        assert!(content.contains("Leap seconds: 14"));
        assert!(content.contains("Comments (1) :\nfirst comment\n"));
        assert!(!content.contains("NOT valid"));
    }

    #[test]
    fn missing_sections() {
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_marker_name("A 9080");
        let content = dump(&header);
        assert!(content.contains("(This header is NOT VALID RINEX 3.)"));
        assert!(content.contains(" PGM / RUN BY / DATE  is NOT valid"));
        assert!(content.contains(" END OF HEADER        is NOT valid"));
        assert!(!content.contains(" MARKER NAME          is NOT valid"));
    }
}

//! Header formatting
use crate::{
    columns::{fit, fixed, fmt_triplet, system_code, system_key},
    fmt_comment, fmt_rinex,
    header::{
        parsing::{OBS_TYPES_PER_LINE, PRN_OBS_PER_LINE, SCALE_FACTOR_OBS_PER_LINE},
        CorrectionInfo, Header, Validity, LABELS, SCALE_FACTORS,
    },
    obs_id::{ObsID, Registry},
    prelude::{Constellation, FormattingError},
};

use num_integer::div_ceil;
use std::io::{BufWriter, Write};

#[cfg(feature = "log")]
use log::debug;

/// File type and system description, columns 21-60
fn system_description(constellation: Constellation) -> Option<&'static str> {
    match system_code(constellation)? {
        'G' => Some("G: GPS"),
        'R' => Some("R: GLONASS"),
        'E' => Some("E: GALILEO"),
        'C' => Some("C: BEIDOU"),
        'J' => Some("J: QZSS"),
        'I' => Some("I: IRNSS"),
        'S' => Some("S: SBAS PAYLOAD"),
        'M' => Some("M: MIXED"),
        _ => None,
    }
}

fn invalid_system(what: &str, constellation: Constellation) -> FormattingError {
    FormattingError::InvalidHeaderState(format!("{}: no system code for {:?}", what, constellation))
}

fn writeln_rinex<W: Write>(
    w: &mut BufWriter<W>,
    content: &str,
    label: &str,
) -> Result<(), FormattingError> {
    writeln!(w, "{}", fmt_rinex(content, label))?;
    Ok(())
}

impl Header {
    /// Formats [Header] into [Write]able interface, using efficient buffering.
    /// Sections are written in standard order, for every [Validity] flag that is set.
    /// Nothing is written if one of the sections cannot be described.
    /// Completeness is not verified here, see [Header::check_completeness].
    pub fn format<W: Write>(
        &self,
        registry: &Registry,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        if !self.version.is_supported() {
            return Err(FormattingError::UnsupportedVersion(self.version.to_string()));
        }

        let mut buf = BufWriter::new(Vec::<u8>::with_capacity(81 * self.number_of_lines()));
        for (section, _) in LABELS.iter() {
            if self.validity.contains(*section) {
                if self.section_lines(*section) == 0 {
                    return Err(FormattingError::InvalidHeaderState(format!(
                        "\"{}\" is flagged but has no content",
                        section.label().unwrap_or_default()
                    )));
                }
                self.format_section(*section, registry, &mut buf)?;
            }
        }

        let content = buf
            .into_inner()
            .map_err(|e| FormattingError::Io(e.into_error()))?;

        #[cfg(feature = "log")]
        debug!("formatted header: {} bytes", content.len());

        w.write_all(&content)?;
        Ok(())
    }

    /// Number of lines [Header::format] will produce
    pub fn number_of_lines(&self) -> usize {
        LABELS
            .iter()
            .filter(|(section, _)| self.validity.contains(*section))
            .map(|(section, _)| self.section_lines(*section))
            .sum()
    }

    fn section_lines(&self, section: Validity) -> usize {
        if section == Validity::COMMENT {
            self.comments
                .iter()
                .map(|c| div_ceil(c.len(), 60).max(1))
                .sum()
        } else if section == Validity::SYSTEM_OBS_TYPES {
            self.obs_types
                .values()
                .map(|observables| div_ceil(observables.len(), OBS_TYPES_PER_LINE).max(1))
                .sum()
        } else if section == Validity::SYSTEM_DCBS_APPLIED {
            self.dcbs_compensations.len()
        } else if section == Validity::SYSTEM_PCVS_APPLIED {
            self.pcvs_compensations.len()
        } else if section == Validity::SYSTEM_SCALE_FACTOR {
            self.scale_factors
                .values()
                .map(|factors| {
                    SCALE_FACTORS
                        .iter()
                        .map(|factor| {
                            let nb = factors.values().filter(|f| *f == factor).count();
                            div_ceil(nb, SCALE_FACTOR_OBS_PER_LINE)
                        })
                        .sum::<usize>()
                })
                .sum()
        } else if section == Validity::PRN_OBS {
            self.prn_obs
                .values()
                .map(|counts| div_ceil(counts.len(), PRN_OBS_PER_LINE).max(1))
                .sum()
        } else {
            1
        }
    }

    fn format_section<W: Write>(
        &self,
        section: Validity,
        registry: &Registry,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        let label = section.label().unwrap_or_default();
        if section == Validity::VERSION {
            self.format_rinex_version(w)?;
        } else if section == Validity::RUN_BY {
            let content = format!(
                "{:<20}{:<20}{:<20}",
                fit(&self.program, 20, "program")?,
                fit(&self.run_by, 20, "run by")?,
                fit(&self.date, 20, "date")?,
            );
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::COMMENT {
            for comment in self.comments.iter() {
                fit(comment, usize::MAX, "comment")?;
                writeln!(w, "{}", fmt_comment(comment))?;
            }
        } else if section == Validity::MARKER_NAME {
            writeln_rinex(w, fit(&self.marker_name, 60, "marker name")?, label)?;
        } else if section == Validity::MARKER_NUMBER {
            writeln_rinex(w, fit(&self.marker_number, 20, "marker number")?, label)?;
        } else if section == Validity::MARKER_TYPE {
            writeln_rinex(w, fit(&self.marker_type, 20, "marker type")?, label)?;
        } else if section == Validity::OBSERVER {
            let content = format!(
                "{:<20}{}",
                fit(&self.observer, 20, "observer")?,
                fit(&self.agency, 40, "agency")?,
            );
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::RECEIVER {
            self.rcvr.format(w)?;
        } else if section == Validity::ANTENNA_TYPE {
            self.rcvr_antenna.format(w)?;
        } else if section == Validity::ANTENNA_POSITION {
            writeln_rinex(w, &fmt_triplet(self.ground_position, label)?, label)?;
        } else if section == Validity::ANTENNA_DELTA_HEN {
            writeln_rinex(w, &fmt_triplet(self.antenna_delta_hen, label)?, label)?;
        } else if section == Validity::ANTENNA_DELTA_XYZ {
            writeln_rinex(w, &fmt_triplet(self.antenna_delta_xyz, label)?, label)?;
        } else if section == Validity::ANTENNA_PHASE_CENTER {
            self.phase_center.format(w)?;
        } else if section == Validity::ANTENNA_BORESIGHT_XYZ {
            writeln_rinex(w, &fmt_triplet(self.antenna_boresight, label)?, label)?;
        } else if section == Validity::ANTENNA_ZERODIR_AZIMUTH {
            let content = fixed(format!("{:>14.4}", self.antenna_zerodir_azimuth), 14, label)?;
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::ANTENNA_ZERODIR_XYZ {
            writeln_rinex(w, &fmt_triplet(self.antenna_zerodir_xyz, label)?, label)?;
        } else if section == Validity::CENTER_OF_MASS {
            writeln_rinex(w, &fmt_triplet(self.center_of_mass, label)?, label)?;
        } else if section == Validity::SYSTEM_OBS_TYPES {
            self.format_obs_types(registry, w)?;
        } else if section == Validity::SIGNAL_STRENGTH_UNIT {
            let unit = fit(&self.signal_strength_unit, 20, label)?;
            writeln_rinex(w, unit, label)?;
        } else if section == Validity::INTERVAL {
            let content = fixed(format!("{:>10.3}", self.sampling_interval), 10, label)?;
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::FIRST_TIME {
            writeln_rinex(w, &fixed(self.first_obs.format(), 51, label)?, label)?;
        } else if section == Validity::LAST_TIME {
            writeln_rinex(w, &fixed(self.last_obs.format(), 51, label)?, label)?;
        } else if section == Validity::RECEIVER_OFFSET {
            let applied = if self.rcvr_clock_offset_applied { 1 } else { 0 };
            writeln_rinex(w, &format!("{:>6}", applied), label)?;
        } else if section == Validity::SYSTEM_DCBS_APPLIED {
            Self::format_corrections(&self.dcbs_compensations, label, w)?;
        } else if section == Validity::SYSTEM_PCVS_APPLIED {
            Self::format_corrections(&self.pcvs_compensations, label, w)?;
        } else if section == Validity::SYSTEM_SCALE_FACTOR {
            self.format_scale_factors(registry, w)?;
        } else if section == Validity::LEAP_SECONDS {
            let content = fixed(format!("{:>6}", self.leap_seconds), 6, label)?;
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::NUM_SATS {
            let content = fixed(format!("{:>6}", self.nb_satellites), 6, label)?;
            writeln_rinex(w, &content, label)?;
        } else if section == Validity::PRN_OBS {
            self.format_prn_obs(w)?;
        } else if section == Validity::END_OF_HEADER {
            writeln_rinex(w, "", label)?;
        }
        Ok(())
    }

    /// Formats "RINEX VERSION / TYPE"
    fn format_rinex_version<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        let constellation = self.constellation.ok_or_else(|| {
            FormattingError::InvalidHeaderState("satellite system not specified".to_string())
        })?;
        let description = system_description(constellation)
            .ok_or_else(|| invalid_system("RINEX VERSION / TYPE", constellation))?;
        writeln_rinex(
            w,
            &format!(
                "{:>9}           {:<20}{:<20}",
                self.version.to_string(),
                "OBSERVATION DATA",
                description
            ),
            "RINEX VERSION / TYPE",
        )
    }

    /// Three letter codes of these observables
    fn observable_codes(
        registry: &Registry,
        constellation: Constellation,
        observables: &[&ObsID],
    ) -> Result<Vec<String>, FormattingError> {
        observables
            .iter()
            .map(|obs| {
                let code = registry.encode(constellation, obs).ok_or_else(|| {
                    FormattingError::InvalidHeaderState(format!(
                        "no {:?} observable code for \"{}\"",
                        constellation,
                        registry.dump(obs)
                    ))
                })?;
                fit(&code, 3, "observable code")?;
                Ok(code)
            })
            .collect()
    }

    /// Formats "SYS / # / OBS TYPES"
    fn format_obs_types<W: Write>(
        &self,
        registry: &Registry,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        let label = "SYS / # / OBS TYPES";
        for (constellation, observables) in self.obs_types.iter() {
            let system = match system_code(*constellation) {
                Some('M') | None => return Err(invalid_system(label, *constellation)),
                Some(system) => system,
            };
            let observables = observables.iter().collect::<Vec<_>>();
            let codes = Self::observable_codes(registry, *constellation, &observables)?;
            let count = fixed(format!("{:>3}", codes.len()), 3, label)?;

            if codes.is_empty() {
                writeln_rinex(w, &format!("{}  {}", system, count), label)?;
                continue;
            }
            for (nth, chunk) in codes.chunks(OBS_TYPES_PER_LINE).enumerate() {
                let mut content = if nth == 0 {
                    format!("{}  {}", system, count)
                } else {
                    " ".repeat(6)
                };
                for code in chunk {
                    content.push(' ');
                    content.push_str(code);
                }
                writeln_rinex(w, &content, label)?;
            }
        }
        Ok(())
    }

    /// Formats "SYS / DCBS APPLIED" or "SYS / PCVS APPLIED"
    fn format_corrections<W: Write>(
        corrections: &[CorrectionInfo],
        label: &str,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        for correction in corrections {
            let system = system_code(correction.constellation)
                .ok_or_else(|| invalid_system(label, correction.constellation))?;
            let content = format!(
                "{} {:<17} {}",
                system,
                fit(&correction.program, 17, label)?,
                fit(&correction.source, 40, label)?,
            );
            writeln_rinex(w, &content, label)?;
        }
        Ok(())
    }

    /// Formats "SYS / SCALE FACTOR", one group per factor value
    fn format_scale_factors<W: Write>(
        &self,
        registry: &Registry,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        let label = "SYS / SCALE FACTOR";
        for (constellation, factors) in self.scale_factors.iter() {
            let system = system_code(*constellation)
                .ok_or_else(|| invalid_system(label, *constellation))?;
            if let Some(invalid) = factors.values().find(|f| !SCALE_FACTORS.contains(f)) {
                return Err(FormattingError::InvalidHeaderState(format!(
                    "invalid scale factor {}",
                    invalid
                )));
            }
            for factor in SCALE_FACTORS {
                let observables = factors
                    .iter()
                    .filter_map(|(obs, f)| if *f == factor { Some(obs) } else { None })
                    .collect::<Vec<_>>();
                if observables.is_empty() {
                    continue;
                }
                if observables.len() > 99 {
                    return Err(FormattingError::InvalidHeaderState(format!(
                        "{} observables scaled by {}, 99 at most",
                        observables.len(),
                        factor
                    )));
                }
                let codes = Self::observable_codes(registry, *constellation, &observables)?;
                for (nth, chunk) in codes.chunks(SCALE_FACTOR_OBS_PER_LINE).enumerate() {
                    let mut content = if nth == 0 {
                        format!("{} {:>4}  {:>2}", system, factor, codes.len())
                    } else {
                        " ".repeat(10)
                    };
                    for code in chunk {
                        content.push(' ');
                        content.push_str(code);
                    }
                    writeln_rinex(w, &content, label)?;
                }
            }
        }
        Ok(())
    }

    /// Formats "PRN / # OF OBS"
    fn format_prn_obs<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        let label = "PRN / # OF OBS";
        for (sv, counts) in self.prn_obs.iter() {
            let declared = self
                .obs_types
                .get(&system_key(sv.constellation))
                .map(|observables| observables.len())
                .unwrap_or_default();
            if declared == 0 {
                return Err(FormattingError::InvalidHeaderState(format!(
                    "{:?}: no observables declared for this system",
                    sv
                )));
            }
            if counts.len() != declared {
                return Err(FormattingError::InvalidHeaderState(format!(
                    "{:?}: {} counts for {} observables",
                    sv,
                    counts.len(),
                    declared
                )));
            }
            let system = system_code(sv.constellation)
                .ok_or_else(|| invalid_system(label, sv.constellation))?;
            let sv_str = format!("{}{:02}", system, sv.prn);
            fit(&sv_str, 3, label)?;

            for (nth, chunk) in counts.chunks(PRN_OBS_PER_LINE).enumerate() {
                let mut content = if nth == 0 {
                    format!("   {}", sv_str)
                } else {
                    " ".repeat(6)
                };
                for count in chunk {
                    content.push_str(&fixed(format!("{:>6}", count), 6, label)?);
                }
                writeln_rinex(w, &content, label)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        epoch::{CivilTime, TimeSystem},
        obs_id::{CarrierBand, ObservationType, TrackingCode},
        prelude::SV,
        version::{Version, SUPPORTED_VERSION},
    };

    fn format(header: &Header) -> Result<String, FormattingError> {
        let registry = Registry::default();
        let mut w = BufWriter::new(Vec::new());
        header.format(&registry, &mut w)?;
        Ok(String::from_utf8(w.into_inner().unwrap()).unwrap())
    }

    fn c1c() -> ObsID {
        ObsID::new(ObservationType::RANGE, CarrierBand::L1, TrackingCode::CA)
    }

    #[test]
    fn version_line() {
        let header = Header::default().with_version(SUPPORTED_VERSION, Constellation::Mixed);
        assert_eq!(
            format(&header).unwrap(),
            "     3.00           OBSERVATION DATA    M: MIXED            RINEX VERSION / TYPE\n"
        );
    }

    #[test]
    fn preconditions() {
        // unsupported revision
        let header = Header::default().with_version(Version::new(3, 2), Constellation::GPS);
        assert!(matches!(
            format(&header),
            Err(FormattingError::UnsupportedVersion(_))
        ));

        // no system
        let mut header = Header::default().with_version(SUPPORTED_VERSION, Constellation::GPS);
        header.constellation = None;
        assert!(matches!(
            format(&header),
            Err(FormattingError::InvalidHeaderState(_))
        ));

        // observable without RINEX code
        let lli = ObsID::new(ObservationType::LLI, CarrierBand::L1, TrackingCode::CA);
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_observables(Constellation::GPS, &[lli]);
        assert!(matches!(
            format(&header),
            Err(FormattingError::InvalidHeaderState(_))
        ));

        // invalid scale factor
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_observables(Constellation::GPS, &[c1c()])
            .with_scale_factor(Constellation::GPS, 5, &[c1c()]);
        assert!(matches!(
            format(&header),
            Err(FormattingError::InvalidHeaderState(_))
        ));

        // counts for undeclared system
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::Mixed)
            .with_observables(Constellation::GPS, &[c1c()])
            .with_prn_obs(SV::new(Constellation::Glonass, 1), &[10]);
        assert!(matches!(
            format(&header),
            Err(FormattingError::InvalidHeaderState(_))
        ));

        // text overflow
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_marker_number("0123456789012345678901");
        assert!(matches!(
            format(&header),
            Err(FormattingError::InvalidHeaderState(_))
        ));
    }

    #[test]
    fn nothing_written_on_failure() {
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_marker_name("A 9080")
            .with_marker_number("0123456789012345678901");
        let registry = Registry::default();
        let mut w = BufWriter::new(Vec::new());
        assert!(header.format(&registry, &mut w).is_err());
        assert!(w.into_inner().unwrap().is_empty());
    }

    #[test]
    fn optional_sections() {
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_sampling_interval(30.0)
            .with_leap_seconds(14)
            .with_receiver_clock_offset_applied(true)
            .with_antenna_zerodir_azimuth(90.0)
            .with_dcbs_compensation(CorrectionInfo::new(
                Constellation::GPS,
                "CC2NONCC",
                "http://www.ngs.noaa.gov/IGSWorkshop2008",
            ))
            .with_last_obs(CivilTime::new(2006, 3, 24, 23, 59, 30.0, TimeSystem::GPS));
        let content = format(&header).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), header.number_of_lines());
        assert_eq!(
            lines[1],
            "       90.0000                                              ANTENNA: ZERODIR AZI"
        );
        assert_eq!(
            lines[2],
            "    30.000                                                  INTERVAL"
        );
        assert_eq!(
            lines[3],
            "  2006     3    24    23    59   30.0000000     GPS         TIME OF LAST OBS"
        );
        assert_eq!(
            lines[4],
            "     1                                                      RCV CLOCK OFFS APPL"
        );
        assert_eq!(
            lines[5],
            "G CC2NONCC          http://www.ngs.noaa.gov/IGSWorkshop2008 SYS / DCBS APPLIED"
        );
        assert_eq!(
            lines[6],
            "    14                                                      LEAP SECONDS"
        );
    }

    #[test]
    fn flagged_sections_without_content() {
        for section in [
            Validity::COMMENT,
            Validity::SYSTEM_OBS_TYPES,
            Validity::SYSTEM_DCBS_APPLIED,
            Validity::SYSTEM_PCVS_APPLIED,
            Validity::SYSTEM_SCALE_FACTOR,
            Validity::PRN_OBS,
        ] {
            let mut header = Header::default().with_version(SUPPORTED_VERSION, Constellation::GPS);
            if section != Validity::SYSTEM_OBS_TYPES {
                header = header.with_observables(Constellation::GPS, &[c1c()]);
            }
            header.validity |= section;
            match format(&header) {
                Err(FormattingError::InvalidHeaderState(msg)) => {
                    assert!(msg.contains(section.label().unwrap()), "{}", msg)
                },
                other => panic!("{:?}: unexpected result {:?}", section, other),
            }
        }
    }

    #[test]
    fn long_comments_are_wrapped() {
        let comment = "x".repeat(75);
        let header = Header::default()
            .with_version(SUPPORTED_VERSION, Constellation::GPS)
            .with_comment(&comment)
            .with_comment("short");
        let content = format(&header).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert_eq!(header.number_of_lines(), 4);
    }
}

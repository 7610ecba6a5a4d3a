//! Header parsing
use crate::{
    columns::{column, parse_float, parse_int, parse_system, parse_triplet, system_key},
    epoch::{CivilTime, TimeSystem},
    error::Malformation,
    hardware::{Antenna, PhaseCenter, Receiver},
    header::{CorrectionInfo, Header, Validity, SCALE_FACTORS},
    obs_id::Registry,
    prelude::{Constellation, ParsingError, SV},
    reader::{HeaderStream, Reader},
    version::Version,
};

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::debug;

/// Observables per SYS / # / OBS TYPES line
pub(crate) const OBS_TYPES_PER_LINE: usize = 13;
/// Observables per SYS / SCALE FACTOR line
pub(crate) const SCALE_FACTOR_OBS_PER_LINE: usize = 12;
/// Counts per PRN / # OF OBS line
pub(crate) const PRN_OBS_PER_LINE: usize = 9;

/// List currently spread over several lines
#[derive(Debug, Clone, Copy, PartialEq)]
enum Continuation {
    None,
    ObsTypes {
        constellation: Constellation,
        declared: usize,
        found: usize,
    },
    ScaleFactor {
        constellation: Constellation,
        factor: u16,
        declared: usize,
        found: usize,
    },
    PrnObs {
        sv: SV,
        declared: usize,
        found: usize,
    },
}

impl Continuation {
    /// (declared, found) when list is not complete yet
    fn pending(&self) -> Option<(usize, usize)> {
        match self {
            Self::ObsTypes {
                declared, found, ..
            }
            | Self::ScaleFactor {
                declared, found, ..
            }
            | Self::PrnObs {
                declared, found, ..
            } if found < declared => Some((*declared, *found)),
            _ => None,
        }
    }
}

/// [Parser] interprets header lines one at a time,
/// carrying the state of multi line records from one line to the next.
/// ```
/// use rinex_obs_header::prelude::*;
///
/// let registry = Registry::default();
/// let mut parser = Parser::new(&registry);
/// let mut header = Header::default();
///
/// let line = format!("{:<60}{}", "  A 9080", "MARKER NAME");
/// let done = parser.parse_line(&mut header, &line, 1).unwrap();
/// assert!(!done);
/// assert_eq!(header.marker_name, "A 9080");
/// assert!(header.validity.contains(Validity::MARKER_NAME));
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    registry: &'a Registry,
    continuation: Continuation,
}

impl<'a> Parser<'a> {
    /// Builds a new [Parser] that will interpret observables with this [Registry]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            continuation: Continuation::None,
        }
    }

    /// Consumes the stream up to END OF HEADER, into its own [Header].
    /// Returns immediately if the stream header was already read.
    pub fn read_header<S: HeaderStream>(&mut self, stream: &mut S) -> Result<(), ParsingError> {
        if stream.header_read() {
            return Ok(());
        }
        stream.header_mut().clear();
        self.continuation = Continuation::None;
        loop {
            let line = match stream.next_line()? {
                Some(line) => line,
                None => {
                    return Err(ParsingError::malformed(
                        stream.line_number(),
                        "END OF HEADER",
                        Malformation::NoData,
                    ));
                },
            };
            let line_number = stream.line_number();
            if self.parse_line(stream.header_mut(), &line, line_number)? {
                break;
            }
        }
        stream.set_header_read();
        Ok(())
    }

    /// Parses one header line into [Header].
    /// Returns true once END OF HEADER was reached and
    /// the header was verified to be complete.
    pub fn parse_line(
        &mut self,
        header: &mut Header,
        line: &str,
        line_number: usize,
    ) -> Result<bool, ParsingError> {
        let line = line.trim_end();
        if !line.is_ascii() {
            // label starts at the 61st character
            let label = line
                .char_indices()
                .nth(60)
                .and_then(|(offset, _)| line.get(offset..))
                .unwrap_or_default();
            return Err(ParsingError::malformed(
                line_number,
                label,
                Malformation::NonAscii,
            ));
        }
        if !(60..=80).contains(&line.len()) {
            return Err(ParsingError::malformed(
                line_number,
                column(line, 60, 80),
                Malformation::Length(line.len()),
            ));
        }

        let (content, label) = line.split_at(60);
        let section =
            Validity::from_label(label).ok_or_else(|| ParsingError::UnrecognizedLabel {
                line: line_number,
                label: label.to_string(),
            })?;

        let is_continuation = if section == Validity::SYSTEM_OBS_TYPES
            || section == Validity::SYSTEM_SCALE_FACTOR
        {
            column(content, 0, 1).trim().is_empty()
        } else if section == Validity::PRN_OBS {
            column(content, 3, 6).trim().is_empty()
        } else {
            false
        };

        if !is_continuation {
            if let Some((declared, found)) = self.continuation.pending() {
                return Err(ParsingError::malformed(
                    line_number,
                    label,
                    Malformation::TruncatedContinuation { declared, found },
                ));
            }
            self.continuation = Continuation::None;
        }

        let field = |content: &str| ParsingError::field(line_number, label, content);

        if section == Validity::VERSION {
            let version_str = column(content, 0, 20).trim();
            let version = Version::from_str(version_str).map_err(|_| field(version_str))?;
            if !version.is_supported() {
                return Err(ParsingError::UnsupportedVersion(version_str.to_string()));
            }

            let file_type = column(content, 20, 40).trim();
            if !file_type.starts_with(['O', 'o']) {
                return Err(field(file_type));
            }

            let system = column(content, 40, 60).trim();
            let constellation = parse_system(column(system, 0, 1)).map_err(|_| field(system))?;

            header.version = version;
            header.constellation = Some(constellation);
        } else if section == Validity::RUN_BY {
            header.program = column(content, 0, 20).trim().to_string();
            header.run_by = column(content, 20, 40).trim().to_string();
            header.date = column(content, 40, 60).trim().to_string();
        } else if section == Validity::COMMENT {
            header.comments.push(content.trim_end().to_string());
        } else if section == Validity::MARKER_NAME {
            header.marker_name = content.trim().to_string();
        } else if section == Validity::MARKER_NUMBER {
            header.marker_number = column(content, 0, 20).trim().to_string();
        } else if section == Validity::MARKER_TYPE {
            header.marker_type = column(content, 0, 20).trim().to_string();
        } else if section == Validity::OBSERVER {
            header.observer = column(content, 0, 20).trim().to_string();
            header.agency = column(content, 20, 60).trim().to_string();
        } else if section == Validity::RECEIVER {
            header.rcvr = Receiver::from_str(content).unwrap_or_default();
        } else if section == Validity::ANTENNA_TYPE {
            header.rcvr_antenna = Antenna::from_str(content).unwrap_or_default();
        } else if section == Validity::ANTENNA_POSITION {
            header.ground_position = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_DELTA_HEN {
            header.antenna_delta_hen = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_DELTA_XYZ {
            header.antenna_delta_xyz = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_PHASE_CENTER {
            header.phase_center = PhaseCenter::parse(content).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_BORESIGHT_XYZ {
            header.antenna_boresight = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_ZERODIR_AZIMUTH {
            header.antenna_zerodir_azimuth =
                parse_float(column(content, 0, 14)).map_err(|e| field(&e))?;
        } else if section == Validity::ANTENNA_ZERODIR_XYZ {
            header.antenna_zerodir_xyz = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::CENTER_OF_MASS {
            header.center_of_mass = parse_triplet(content).map_err(|e| field(&e))?;
        } else if section == Validity::SYSTEM_OBS_TYPES {
            let (constellation, declared, found) = if is_continuation {
                match self.continuation {
                    Continuation::ObsTypes {
                        constellation,
                        declared,
                        found,
                    } if found < declared => (constellation, declared, found),
                    _ => {
                        return Err(ParsingError::malformed(
                            line_number,
                            label,
                            Malformation::OrphanContinuation,
                        ))
                    },
                }
            } else {
                let system = column(content, 0, 1);
                let constellation = parse_system(system).map_err(|e| field(&e))?;
                if constellation == Constellation::Mixed {
                    return Err(field(system));
                }
                let declared =
                    parse_int::<usize>(column(content, 3, 6)).map_err(|e| field(&e))?;
                header
                    .obs_types
                    .insert(constellation, Vec::with_capacity(declared));
                (constellation, declared, 0)
            };

            let nb = OBS_TYPES_PER_LINE.min(declared - found);
            let observables = header.obs_types.entry(constellation).or_default();
            for i in 0..nb {
                let code = column(content, 7 + 4 * i, 10 + 4 * i);
                let obs = self
                    .registry
                    .decode(constellation, code.trim())
                    .ok_or_else(|| field(code))?;
                observables.push(obs);
            }

            self.continuation = Continuation::ObsTypes {
                constellation,
                declared,
                found: found + nb,
            };
        } else if section == Validity::SIGNAL_STRENGTH_UNIT {
            header.signal_strength_unit = column(content, 0, 20).trim().to_string();
        } else if section == Validity::INTERVAL {
            header.sampling_interval =
                parse_float(column(content, 0, 10)).map_err(|e| field(&e))?;
        } else if section == Validity::FIRST_TIME || section == Validity::LAST_TIME {
            let default_system = header
                .constellation
                .map(TimeSystem::default_for)
                .unwrap_or_default();
            let t = CivilTime::parse(content, default_system).map_err(|e| field(&e))?;
            if section == Validity::FIRST_TIME {
                header.first_obs = t;
            } else {
                header.last_obs = t;
            }
        } else if section == Validity::RECEIVER_OFFSET {
            let applied = parse_int::<i32>(column(content, 0, 6)).map_err(|e| field(&e))?;
            header.rcvr_clock_offset_applied = applied > 0;
        } else if section == Validity::SYSTEM_DCBS_APPLIED
            || section == Validity::SYSTEM_PCVS_APPLIED
        {
            let constellation = parse_system(column(content, 0, 1)).map_err(|e| field(&e))?;
            let info = CorrectionInfo::new(
                constellation,
                column(content, 2, 19).trim(),
                column(content, 20, 60).trim(),
            );
            if section == Validity::SYSTEM_DCBS_APPLIED {
                header.dcbs_compensations.push(info);
            } else {
                header.pcvs_compensations.push(info);
            }
        } else if section == Validity::SYSTEM_SCALE_FACTOR {
            let (constellation, factor, declared, found) = if is_continuation {
                match self.continuation {
                    Continuation::ScaleFactor {
                        constellation,
                        factor,
                        declared,
                        found,
                    } if found < declared => (constellation, factor, declared, found),
                    _ => {
                        return Err(ParsingError::malformed(
                            line_number,
                            label,
                            Malformation::OrphanContinuation,
                        ))
                    },
                }
            } else {
                let constellation =
                    parse_system(column(content, 0, 1)).map_err(|e| field(&e))?;
                let factor_str = column(content, 2, 6);
                let factor = parse_int::<u16>(factor_str).map_err(|e| field(&e))?;
                if !SCALE_FACTORS.contains(&factor) {
                    return Err(field(factor_str.trim()));
                }
                let declared =
                    parse_int::<usize>(column(content, 8, 10)).map_err(|e| field(&e))?;
                (constellation, factor, declared, 0)
            };

            let observables = if declared == 0 {
                // applies to all observables of this system
                header
                    .obs_types
                    .get(&constellation)
                    .cloned()
                    .unwrap_or_default()
            } else {
                let nb = SCALE_FACTOR_OBS_PER_LINE.min(declared - found);
                let mut observables = Vec::with_capacity(nb);
                for i in 0..nb {
                    let code = column(content, 11 + 4 * i, 14 + 4 * i);
                    let obs = self
                        .registry
                        .decode(constellation, code.trim())
                        .ok_or_else(|| field(code))?;
                    observables.push(obs);
                }
                self.continuation = Continuation::ScaleFactor {
                    constellation,
                    factor,
                    declared,
                    found: found + nb,
                };
                observables
            };

            let factors = header.scale_factors.entry(constellation).or_default();
            for obs in observables {
                factors.insert(obs, factor);
            }
        } else if section == Validity::LEAP_SECONDS {
            header.leap_seconds =
                parse_int::<i32>(column(content, 0, 6)).map_err(|e| field(&e))?;
        } else if section == Validity::NUM_SATS {
            header.nb_satellites =
                parse_int::<u32>(column(content, 0, 6)).map_err(|e| field(&e))?;
        } else if section == Validity::PRN_OBS {
            let (sv, declared, found) = if is_continuation {
                match self.continuation {
                    Continuation::PrnObs {
                        sv,
                        declared,
                        found,
                    } if found < declared => (sv, declared, found),
                    _ => {
                        return Err(ParsingError::malformed(
                            line_number,
                            label,
                            Malformation::OrphanContinuation,
                        ))
                    },
                }
            } else {
                let sv_str = column(content, 3, 6);
                let sv = SV::from_str(sv_str.trim()).map_err(|_| field(sv_str))?;
                let declared = header
                    .obs_types
                    .get(&system_key(sv.constellation))
                    .map(|observables| observables.len())
                    .unwrap_or_default();
                if declared == 0 {
                    // no observables declared for this system
                    return Err(field(sv_str));
                }
                header.prn_obs.insert(sv, Vec::with_capacity(declared));
                (sv, declared, 0)
            };

            let nb = PRN_OBS_PER_LINE.min(declared - found);
            let counts = header.prn_obs.entry(sv).or_default();
            for i in 0..nb {
                let count = parse_int::<u32>(column(content, 6 + 6 * i, 12 + 6 * i))
                    .map_err(|e| field(&e))?;
                counts.push(count);
            }

            self.continuation = Continuation::PrnObs {
                sv,
                declared,
                found: found + nb,
            };
        } else {
            // END OF HEADER
            header.validity |= Validity::END_OF_HEADER;
            header.check_completeness()?;
            #[cfg(feature = "log")]
            debug!("header complete: {}", header.validity.describe());
            return Ok(true);
        }

        header.validity |= section;
        Ok(false)
    }
}

impl Header {
    /// Parses [Header] by consuming [BufRead]able interface until end of this section.
    /// ```
    /// use rinex_obs_header::prelude::*;
    ///
    /// let content = format!(
    ///     "{:<60}{}\n{:<60}{}\n{:<60}{}\n{:<60}{}\n{:<60}{}\n{:<60}{}\n",
    ///     "     3.00           OBSERVATION DATA    G: GPS",
    ///     "RINEX VERSION / TYPE",
    ///     "teqc                UNAVCO              20060324 13:10:36UTC",
    ///     "PGM / RUN BY / DATE",
    ///     "A 9080",
    ///     "MARKER NAME",
    ///     "G    1 C1C",
    ///     "SYS / # / OBS TYPES",
    ///     "  2006     3    24    13    10   36.0000000     GPS",
    ///     "TIME OF FIRST OBS",
    ///     "",
    ///     "END OF HEADER",
    /// );
    ///
    /// let registry = Registry::default();
    /// let header = Header::parse(content.as_bytes(), &registry).unwrap();
    /// assert_eq!(header.marker_name, "A 9080");
    /// assert_eq!(header.constellation, Some(Constellation::GPS));
    /// ```
    pub fn parse<R: BufRead>(reader: R, registry: &Registry) -> Result<Self, ParsingError> {
        let mut stream = Reader::new(reader);
        Parser::new(registry).read_header(&mut stream)?;
        Ok(stream.into_header())
    }

    /// Parses [Header] from readable local file
    pub fn from_file<P: AsRef<Path>>(path: P, registry: &Registry) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        Self::parse(BufReader::new(fd), registry)
    }

    /// Parses [Header] from gzip compressed local file
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(
        path: P,
        registry: &Registry,
    ) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        Self::parse(BufReader::new(GzDecoder::new(fd)), registry)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        fmt_rinex,
        obs_id::{CarrierBand, ObsID, ObservationType, TrackingCode},
    };

    fn parse_lines(lines: &[String]) -> Result<Header, ParsingError> {
        let registry = Registry::default();
        let mut parser = Parser::new(&registry);
        let mut header = Header::default();
        for (nth, line) in lines.iter().enumerate() {
            parser.parse_line(&mut header, line, nth + 1)?;
        }
        Ok(header)
    }

    #[test]
    fn line_length() {
        let registry = Registry::default();
        let mut parser = Parser::new(&registry);
        let mut header = Header::default();

        let short = format!("{:<48}{}", "A 9080", "MARKER NAME");
        assert_eq!(short.len(), 59);
        match parser.parse_line(&mut header, &short, 1) {
            Err(ParsingError::MalformedLine {
                line,
                reason: Malformation::Length(59),
                ..
            }) => assert_eq!(line, 1),
            other => panic!("unexpected result {:?}", other),
        }

        let long = format!("{:<60}{:<20}X", "A 9080", "MARKER NAME");
        assert_eq!(long.len(), 81);
        assert!(matches!(
            parser.parse_line(&mut header, &long, 2),
            Err(ParsingError::MalformedLine {
                reason: Malformation::Length(81),
                ..
            })
        ));

        // trailing blanks do not count
        let padded = format!("{:<60}{:<30}", "A 9080", "MARKER NAME");
        assert!(parser.parse_line(&mut header, &padded, 3).is_ok());
        assert_eq!(header.marker_name, "A 9080");
    }

    #[test]
    fn unrecognized_label() {
        let registry = Registry::default();
        let mut parser = Parser::new(&registry);
        let mut header = Header::default();
        let line = fmt_rinex("A 9080", "MARKER NAMES");
        match parser.parse_line(&mut header, &line, 7) {
            Err(ParsingError::UnrecognizedLabel { line, label }) => {
                assert_eq!(line, 7);
                assert_eq!(label, "MARKER NAMES");
            },
            other => panic!("unexpected result {:?}", other),
        }
        let line = format!("{:<61}{}", "A 9080", "MARKER NAME");
        assert!(matches!(
            parser.parse_line(&mut header, &line, 8),
            Err(ParsingError::UnrecognizedLabel { .. })
        ));
    }

    #[test]
    fn unsupported_version() {
        let line = fmt_rinex(
            "     3.02           OBSERVATION DATA    G: GPS",
            "RINEX VERSION / TYPE",
        );
        match parse_lines(&[line]) {
            Err(ParsingError::UnsupportedVersion(version)) => assert_eq!(version, "3.02"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn not_an_observation_file() {
        let line = fmt_rinex(
            "     3.00           N: GNSS NAV DATA    G: GPS",
            "RINEX VERSION / TYPE",
        );
        match parse_lines(&[line]) {
            Err(ParsingError::MalformedLine {
                reason: Malformation::Field(content),
                ..
            }) => assert_eq!(content, "N: GNSS NAV DATA"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn lowercase_file_type() {
        let line = fmt_rinex(
            "     3.00           observation data    G: GPS",
            "RINEX VERSION / TYPE",
        );
        let header = parse_lines(&[line]).unwrap();
        assert_eq!(header.constellation, Some(Constellation::GPS));
    }

    #[test]
    fn non_ascii_line() {
        let line = format!("{:<60}{}", "données", "COMMENT");
        match parse_lines(&[line]) {
            Err(ParsingError::MalformedLine {
                line,
                label,
                reason: Malformation::NonAscii,
            }) => {
                assert_eq!(line, 1);
                assert_eq!(label, "COMMENT");
            },
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn malformed_field() {
        let line = fmt_rinex(
            "  4789028.4701   176610.x133  4195017.0310",
            "APPROX POSITION XYZ",
        );
        match parse_lines(&[line]) {
            Err(ParsingError::MalformedLine {
                line,
                label,
                reason: Malformation::Field(content),
            }) => {
                assert_eq!(line, 1);
                assert_eq!(label, "APPROX POSITION XYZ");
                assert_eq!(content, "176610.x133");
            },
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn obs_types_continuation() {
        let header = parse_lines(&[
            fmt_rinex(
                "G   14 C1C L1C D1C S1C C2W L2W D2W S2W C5X L5X D5X S5X C1P",
                "SYS / # / OBS TYPES",
            ),
            fmt_rinex("       L1P", "SYS / # / OBS TYPES"),
        ])
        .unwrap();
        let observables = header.obs_types.get(&Constellation::GPS).unwrap();
        assert_eq!(observables.len(), 14);
        assert_eq!(
            observables[0],
            ObsID::new(ObservationType::RANGE, CarrierBand::L1, TrackingCode::CA)
        );
        assert_eq!(
            observables[13],
            ObsID::new(ObservationType::PHASE, CarrierBand::L1, TrackingCode::P)
        );
    }

    #[test]
    fn orphan_continuation() {
        for (content, label) in [
            ("       L1P", "SYS / # / OBS TYPES"),
            ("          C1C", "SYS / SCALE FACTOR"),
            ("         12345", "PRN / # OF OBS"),
        ] {
            match parse_lines(&[fmt_rinex(content, label)]) {
                Err(ParsingError::MalformedLine {
                    reason: Malformation::OrphanContinuation,
                    ..
                }) => {},
                other => panic!("unexpected result {:?} for {}", other, label),
            }
        }

        // complete list cannot be continued
        let lines = [
            fmt_rinex("G    1 C1C", "SYS / # / OBS TYPES"),
            fmt_rinex("       L1C", "SYS / # / OBS TYPES"),
        ];
        assert!(matches!(
            parse_lines(&lines),
            Err(ParsingError::MalformedLine {
                line: 2,
                reason: Malformation::OrphanContinuation,
                ..
            })
        ));
    }

    #[test]
    fn truncated_continuation() {
        let lines = [
            fmt_rinex(
                "G   14 C1C L1C D1C S1C C2W L2W D2W S2W C5X L5X D5X S5X C1P",
                "SYS / # / OBS TYPES",
            ),
            fmt_rinex("R    1 C1C", "SYS / # / OBS TYPES"),
        ];
        match parse_lines(&lines) {
            Err(ParsingError::MalformedLine {
                line,
                reason: Malformation::TruncatedContinuation { declared, found },
                ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(declared, 14);
                assert_eq!(found, 13);
            },
            other => panic!("unexpected result {:?}", other),
        }

        let lines = [
            fmt_rinex(
                "G   14 C1C L1C D1C S1C C2W L2W D2W S2W C5X L5X D5X S5X C1P",
                "SYS / # / OBS TYPES",
            ),
            fmt_rinex("A 9080", "MARKER NAME"),
        ];
        assert!(matches!(
            parse_lines(&lines),
            Err(ParsingError::MalformedLine {
                reason: Malformation::TruncatedContinuation { .. },
                ..
            })
        ));
    }

    #[test]
    fn scale_factor_applies_to_all() {
        let header = parse_lines(&[
            fmt_rinex("G    2 C1C L1C", "SYS / # / OBS TYPES"),
            fmt_rinex("G   10", "SYS / SCALE FACTOR"),
        ])
        .unwrap();
        let factors = header.scale_factors.get(&Constellation::GPS).unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.values().all(|f| *f == 10));
        assert!(header.validity.contains(Validity::SYSTEM_SCALE_FACTOR));
    }

    #[test]
    fn invalid_scale_factor() {
        let lines = [
            fmt_rinex("G    2 C1C L1C", "SYS / # / OBS TYPES"),
            fmt_rinex("G   20  1 C1C", "SYS / SCALE FACTOR"),
        ];
        match parse_lines(&lines) {
            Err(ParsingError::MalformedLine {
                reason: Malformation::Field(content),
                ..
            }) => assert_eq!(content, "20"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn prn_obs_requires_observables() {
        let lines = [
            fmt_rinex("G    2 C1C L1C", "SYS / # / OBS TYPES"),
            fmt_rinex("   R01  1000   998", "PRN / # OF OBS"),
        ];
        match parse_lines(&lines) {
            Err(ParsingError::MalformedLine {
                reason: Malformation::Field(content),
                ..
            }) => assert_eq!(content, "R01"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn unknown_observable() {
        let lines = [fmt_rinex("G    2 C1C K1C", "SYS / # / OBS TYPES")];
        match parse_lines(&lines) {
            Err(ParsingError::MalformedLine {
                reason: Malformation::Field(content),
                ..
            }) => assert_eq!(content, "K1C"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn incomplete_header() {
        let lines = [
            fmt_rinex(
                "     3.00           OBSERVATION DATA    G: GPS",
                "RINEX VERSION / TYPE",
            ),
            fmt_rinex("", "END OF HEADER"),
        ];
        match parse_lines(&lines) {
            Err(ParsingError::IncompleteHeader { missing }) => {
                assert_eq!(
                    missing,
                    Validity::RUN_BY
                        | Validity::MARKER_NAME
                        | Validity::SYSTEM_OBS_TYPES
                        | Validity::FIRST_TIME
                );
            },
            other => panic!("unexpected result {:?}", other),
        }
    }
}

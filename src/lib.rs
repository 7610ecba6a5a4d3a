#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

pub mod epoch;
pub mod hardware;
pub mod header;
pub mod obs_id;
pub mod reader;
pub mod version;

mod columns;
mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    // export
    pub use crate::{
        epoch::{CivilTime, TimeSystem},
        error::{Error, FormattingError, Malformation, ParsingError},
        hardware::{Antenna, PhaseCenter, Receiver},
        header::{CorrectionInfo, Header, Parser, Validity, SCALE_FACTORS},
        obs_id::{
            Axis, AxisTable, CarrierBand, ObsID, ObservationType, Registry, TrackingCode,
        },
        reader::{HeaderStream, Reader},
        version::{Version, SUPPORTED_VERSION},
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Epoch, TimeScale};
}

/// Pads `content` to 60 columns and appends the section label.
/// Content wider than 60 columns is spread over as many lines as needed.
/// `content` must be ASCII.
pub(crate) fn fmt_rinex(content: &str, marker: &str) -> String {
    if content.len() < 60 {
        format!("{:<padding$}{}", content, marker, padding = 60)
    } else {
        let nb_lines = num_integer::div_ceil(content.len(), 60);
        let mut string = String::with_capacity(nb_lines * 81);
        for i in 0..nb_lines {
            let start_off = i * 60;
            let end_off = std::cmp::min(start_off + 60, content.len());
            let chunk = &content[start_off..end_off];
            string.push_str(&format!("{:<padding$}{}", chunk, marker, padding = 60));
            if i < nb_lines - 1 {
                string.push('\n');
            }
        }
        string
    }
}

/// Formats one (possibly multi-line) COMMENT
pub(crate) fn fmt_comment(content: &str) -> String {
    fmt_rinex(content, "COMMENT")
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn fmt_comments_singleline() {
        for desc in ["", "test", "just a basic comment"] {
            let comment = fmt_comment(desc);
            assert_eq!(comment.len(), 60 + "COMMENT".len());
            assert!(comment.starts_with(desc));
            assert!(comment.ends_with("COMMENT"));
        }
    }
    #[test]
    fn fmt_comments_multiline() {
        let desc = "o".repeat(60) + "trailing content";
        let comment = fmt_comment(&desc);
        let lines = comment.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{}COMMENT", "o".repeat(60)));
        assert_eq!(lines[1], format!("{:<60}COMMENT", "trailing content"));

        let exact = "x".repeat(60);
        assert_eq!(fmt_comment(&exact), format!("{}COMMENT", exact));
    }
    #[test]
    fn fmt_labels() {
        assert_eq!(
            fmt_rinex("", "END OF HEADER"),
            format!("{}END OF HEADER", " ".repeat(60))
        );
    }
}

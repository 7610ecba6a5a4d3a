use thiserror::Error;

use crate::header::Validity;

/// Describes why a header line was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum Malformation {
    /// Header lines must be 60 to 80 columns wide (trailing blanks excluded)
    Length(usize),
    /// Fixed columns only make sense on ASCII content
    NonAscii,
    /// A fixed-width field could not be interpreted: offending content
    Field(String),
    /// Continuation line (blank key column) without a previous line to extend
    OrphanContinuation,
    /// A list was interrupted before reaching its declared length
    TruncatedContinuation { declared: usize, found: usize },
    /// Stream ended before END OF HEADER
    NoData,
}

impl std::fmt::Display for Malformation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Length(len) => write!(f, "invalid line length {}", len),
            Self::NonAscii => write!(f, "non ascii content"),
            Self::Field(content) => write!(f, "invalid field \"{}\"", content),
            Self::OrphanContinuation => write!(f, "continuation line without previous record"),
            Self::TruncatedContinuation { declared, found } => {
                write!(f, "declared {} items but only {} found", declared, found)
            },
            Self::NoData => write!(f, "no data read"),
        }
    }
}

/// Errors that may rise in Parsing process
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("unsupported RINEX version \"{0}\"")]
    UnsupportedVersion(String),
    #[error("line {line}: \"{label}\": {reason}")]
    MalformedLine {
        line: usize,
        label: String,
        reason: Malformation,
    },
    #[error("line {line}: unrecognized label \"{label}\"")]
    UnrecognizedLabel { line: usize, label: String },
    #[error("incomplete header, missing: {}", .missing.describe())]
    IncompleteHeader { missing: Validity },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParsingError {
    pub(crate) fn field(line: usize, label: &str, content: &str) -> Self {
        Self::MalformedLine {
            line,
            label: label.to_string(),
            reason: Malformation::Field(content.to_string()),
        }
    }
    pub(crate) fn malformed(line: usize, label: &str, reason: Malformation) -> Self {
        Self::MalformedLine {
            line,
            label: label.to_string(),
            reason,
        }
    }
}

/// Errors that may rise in Formatting process
#[derive(Error, Debug)]
pub enum FormattingError {
    #[error("unsupported RINEX version \"{0}\"")]
    UnsupportedVersion(String),
    #[error("invalid header state: {0}")]
    InvalidHeaderState(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any error this library may return
#[derive(Error, Debug)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("formatting error: {0}")]
    Formatting(#[from] FormattingError),
}

//! Fixed-width column helpers
use crate::prelude::{Constellation, FormattingError};
use std::str::FromStr;

/// Returns columns `start..end` of this (ASCII) content,
/// possibly shorter or empty when content is not wide enough.
pub(crate) fn column(content: &str, start: usize, end: usize) -> &str {
    let len = content.len();
    content
        .get(start.min(len)..end.min(len))
        .unwrap_or_default()
}

/// Parses integer field, blank fields being interpreted as zero.
/// Returns the trimmed field on failure.
pub(crate) fn parse_int<T: FromStr + Default>(field: &str) -> Result<T, String> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(T::default());
    }
    field.parse::<T>().map_err(|_| field.to_string())
}

/// Parses float field, blank fields being interpreted as zero.
/// Returns the trimmed field on failure.
pub(crate) fn parse_float(field: &str) -> Result<f64, String> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(0.0);
    }
    field.parse::<f64>().map_err(|_| field.to_string())
}

/// Parses three 14-column floats starting at column 0
pub(crate) fn parse_triplet(content: &str) -> Result<(f64, f64, f64), String> {
    Ok((
        parse_float(column(content, 0, 14))?,
        parse_float(column(content, 14, 28))?,
        parse_float(column(content, 28, 42))?,
    ))
}

/// Formats three floats as 14-column fields
pub(crate) fn fmt_triplet(value: (f64, f64, f64), what: &str) -> Result<String, FormattingError> {
    Ok(format!(
        "{}{}{}",
        fixed(format!("{:>14.4}", value.0), 14, what)?,
        fixed(format!("{:>14.4}", value.1), 14, what)?,
        fixed(format!("{:>14.4}", value.2), 14, what)?,
    ))
}

/// Parses the one letter system code
pub(crate) fn parse_system(field: &str) -> Result<Constellation, String> {
    let code = field.trim();
    if code.len() != 1 {
        return Err(code.to_string());
    }
    Constellation::from_str(code).map_err(|_| code.to_string())
}

/// One letter system code, None for systems RINEX cannot describe
pub(crate) fn system_code(constellation: Constellation) -> Option<char> {
    match constellation {
        Constellation::GPS => Some('G'),
        Constellation::Glonass => Some('R'),
        Constellation::Galileo => Some('E'),
        Constellation::BeiDou => Some('C'),
        Constellation::QZSS => Some('J'),
        Constellation::IRNSS => Some('I'),
        Constellation::Mixed => Some('M'),
        c if c.is_sbas() => Some('S'),
        _ => None,
    }
}

/// Geostationary augmentation vehicles all share the `S` system code
pub(crate) fn system_key(constellation: Constellation) -> Constellation {
    if constellation.is_sbas() {
        Constellation::SBAS
    } else {
        constellation
    }
}

/// Makes sure text fits in a `width` wide field
pub(crate) fn fit<'a>(text: &'a str, width: usize, what: &str) -> Result<&'a str, FormattingError> {
    if !text.is_ascii() {
        return Err(FormattingError::InvalidHeaderState(format!(
            "{}: non ascii content \"{}\"",
            what, text
        )));
    }
    if text.len() > width {
        return Err(FormattingError::InvalidHeaderState(format!(
            "{}: \"{}\" exceeds {} columns",
            what, text, width
        )));
    }
    Ok(text)
}

/// Makes sure a formatted number did not overflow its `width` wide field
pub(crate) fn fixed(field: String, width: usize, what: &str) -> Result<String, FormattingError> {
    if field.len() > width {
        Err(FormattingError::InvalidHeaderState(format!(
            "{}: {} does not fit in {} columns",
            what,
            field.trim(),
            width
        )))
    } else {
        Ok(field)
    }
}

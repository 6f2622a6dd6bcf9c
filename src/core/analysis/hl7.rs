//! HL7 v2 analysis
//!
//! Segments are terminated by a carriage return. The MSH segment declares the
//! field separator at offset 3 and the message version in MSH-12.

use super::FormatFields;
use crate::domain::{EdiError, Result};

/// HL7 v2 segment terminator
pub const SEGMENT_TERMINATOR: char = '\r';

/// Index of MSH-12 (version ID) after splitting on the field separator
const MSH_VERSION_FIELD: usize = 11;

/// Splits an HL7 message into segments, dropping empty ones
///
/// Line feeds around the terminator are ignored so `\r\n` endings don't
/// produce phantom segments.
pub fn segments(message: &str) -> Vec<&str> {
    message
        .trim_start()
        .split(SEGMENT_TERMINATOR)
        .map(|segment| segment.trim_matches('\n'))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Returns true if a segment is an MSH segment, ignoring ASCII case
pub fn is_msh(segment: &str) -> bool {
    segment
        .as_bytes()
        .get(..3)
        .is_some_and(|id| id.eq_ignore_ascii_case(b"MSH"))
}

/// Returns the field separator declared by an MSH segment
pub fn field_separator(msh: &str) -> Result<char> {
    msh.chars().nth(3).ok_or_else(|| {
        EdiError::DataValidation(
            "MSH segment is too short to contain a field separator".to_string(),
        )
    })
}

/// Extracts version and record count from an HL7 v2 message
///
/// The specification version is the raw MSH-12 value, which is also the
/// single implementation version.
pub fn analyze(message: &str) -> Result<FormatFields> {
    let segments = segments(message);
    let msh = segments.first().copied().unwrap_or_default();

    let separator = field_separator(msh)?;
    let version = msh
        .split(separator)
        .nth(MSH_VERSION_FIELD)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            EdiError::DataValidation(
                "MSH segment does not contain a version identifier (MSH-12)".to_string(),
            )
        })?;

    Ok(FormatFields {
        specification_version: Some(version.to_string()),
        implementation_versions: vec![version.to_string()],
        record_count: Some(segments.len()),
    })
}

//! X12 analysis
//!
//! Segments are terminated by `~`. The GS functional group header carries its
//! element separator at offset 2 and the version/release/industry identifier
//! in GS08, e.g. `005010X279A1`.

use super::FormatFields;
use crate::domain::{EdiError, Result};

/// X12 segment terminator
pub const SEGMENT_TERMINATOR: char = '~';

/// Index of GS08 after splitting on the element separator
const GS_VERSION_ELEMENT: usize = 8;

/// Splits an X12 message into non-empty segments
///
/// Carriage returns and line feeds are removed first; they only wrap lines
/// for readability and never carry data.
pub fn segments(message: &str) -> Vec<String> {
    let cleaned: String = message
        .trim_start()
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    cleaned
        .split(SEGMENT_TERMINATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns true if a segment starts with `id`, ignoring ASCII case
pub fn has_segment_id(segment: &str, id: &str) -> bool {
    segment
        .as_bytes()
        .get(..id.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(id.as_bytes()))
}

/// Extracts versions and record count from an X12 message
///
/// The specification version is the GS08 prefix before the first `X`
/// (`005010X279A1` → `005010`), or the whole value when there is no `X` or
/// the prefix would be empty.
pub fn analyze(message: &str) -> Result<FormatFields> {
    let segments = segments(message);
    if segments.len() < 2 {
        return Err(EdiError::DataValidation(
            "X12 message requires at least two segments (ISA, GS)".to_string(),
        ));
    }

    let gs = segments[1].trim_start();
    if !has_segment_id(gs, "GS") {
        return Err(EdiError::DataValidation(format!(
            "Expected GS segment after ISA, found '{}'",
            gs.chars().take(3).collect::<String>()
        )));
    }

    let delimiter = gs.chars().nth(2).ok_or_else(|| {
        EdiError::DataValidation("GS segment is missing its element separator".to_string())
    })?;

    let implementation_version = gs
        .split(delimiter)
        .nth(GS_VERSION_ELEMENT)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            EdiError::DataValidation(
                "GS segment does not contain a version identifier (GS08)".to_string(),
            )
        })?;

    let specification_version = match implementation_version.find('X') {
        Some(index) if index > 0 => &implementation_version[..index],
        _ => implementation_version,
    };

    Ok(FormatFields {
        specification_version: Some(specification_version.to_string()),
        implementation_versions: vec![implementation_version.to_string()],
        record_count: Some(segments.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = "ISA*00*          *00*          *ZZ*890069730      *ZZ*154663145      *200929*1705*|*00501*000000001*0*T*:~\nGS*HS*890069730*154663145*20200929*1705*0001*X*005010X279A1~\nST*270*0001*005010X279A1~\nSE*2*0001~\nGE*1*0001~\nIEA*1*000000001~\n";

    #[test]
    fn test_analyze_versions_and_count() {
        let fields = analyze(ENVELOPE).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("005010"));
        assert_eq!(
            fields.implementation_versions,
            vec!["005010X279A1".to_string()]
        );
        assert_eq!(fields.record_count, Some(6));
    }

    #[test]
    fn test_version_without_x_is_kept_whole() {
        let message = "ISA*00~GS*HC*A*B*20200101*1200*1*X*004010~";
        let fields = analyze(message).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("004010"));
    }

    #[test]
    fn test_leading_x_keeps_whole_version() {
        let message = "ISA*00~GS*HC*A*B*20200101*1200*1*X*X279A1~";
        let fields = analyze(message).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("X279A1"));
        assert_eq!(fields.implementation_versions, vec!["X279A1".to_string()]);
    }

    #[test]
    fn test_lowercase_segment_ids() {
        let message = ENVELOPE.to_ascii_lowercase().replace("x279a1", "X279A1");
        let fields = analyze(&message).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("005010"));
        assert_eq!(fields.record_count, Some(6));
    }

    #[test]
    fn test_has_segment_id() {
        assert!(has_segment_id("GS*HS", "GS"));
        assert!(has_segment_id("gs*HS", "GS"));
        assert!(!has_segment_id("G", "GS"));
        assert!(!has_segment_id("ST*270", "GS"));
    }

    #[test]
    fn test_single_segment_is_rejected() {
        let result = analyze("ISA*00*          *00~");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_second_segment_must_be_gs() {
        let result = analyze("ISA*00~ST*270*0001~");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_gs_without_version_is_rejected() {
        let result = analyze("ISA*00~GS*HS*A*B~");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_segments_strip_line_breaks() {
        let segments = segments("ISA*00~\r\nGS*HS~\r\n");
        assert_eq!(segments, vec!["ISA*00".to_string(), "GS*HS".to_string()]);
    }
}

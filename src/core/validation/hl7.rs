//! HL7 v2 structural loader

use crate::core::analysis::hl7::{field_separator, is_msh, segments};
use crate::domain::{EdiError, Result};

/// A parsed HL7 segment
///
/// `fields[0]` is the segment id. For MSH the separator itself is MSH-1, so
/// `fields[n]` is MSH-(n+1); for every other segment `fields[n]` is field n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hl7Segment {
    /// Segment id, uppercased
    pub id: String,
    pub fields: Vec<String>,
}

/// HL7 v2 message split into segments and fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hl7Model {
    pub field_separator: char,
    pub segments: Vec<Hl7Segment>,
}

impl Hl7Model {
    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment with the given id
    pub fn segment(&self, id: &str) -> Option<&Hl7Segment> {
        self.segments.iter().find(|segment| segment.id == id)
    }

    /// Message type from MSH-9, e.g. `ADT^A01`
    pub fn message_type(&self) -> Option<&str> {
        self.segment("MSH")
            .and_then(|msh| msh.fields.get(8))
            .map(String::as_str)
    }
}

fn parse_segment(raw: &str, separator: char, position: usize) -> Result<Hl7Segment> {
    let id: String = raw.chars().take(3).collect();
    let well_formed_id = id.len() == 3 && id.chars().all(|c| c.is_ascii_alphanumeric());
    let delimited = well_formed_id && (raw.len() == 3 || raw[3..].starts_with(separator));

    if !delimited {
        return Err(EdiError::DataValidation(format!(
            "HL7 segment {} has an invalid segment id '{}'",
            position + 1,
            id
        )));
    }

    Ok(Hl7Segment {
        id: id.to_ascii_uppercase(),
        fields: raw.split(separator).map(str::to_string).collect(),
    })
}

/// Loads an HL7 v2 message
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the message doesn't start with an
/// MSH segment or a segment id is malformed.
pub fn load(message: &str) -> Result<Hl7Model> {
    let raw_segments = segments(message);
    let msh = match raw_segments.first() {
        Some(msh) if is_msh(msh) => *msh,
        _ => {
            return Err(EdiError::DataValidation(
                "HL7 message must start with an MSH segment".to_string(),
            ))
        }
    };

    let separator = field_separator(msh)?;
    if separator.is_ascii_alphanumeric() {
        return Err(EdiError::DataValidation(format!(
            "HL7 field separator '{separator}' must not be alphanumeric"
        )));
    }

    let segments = raw_segments
        .iter()
        .enumerate()
        .map(|(position, raw)| parse_segment(raw, separator, position))
        .collect::<Result<Vec<_>>>()?;

    Ok(Hl7Model {
        field_separator: separator,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORU: &str = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20240101||ORU^R01|42|P|2.5.1\r\nPID|1||123\r\nOBR|1\r\nOBX|1|NM|GLU||5.4\r\n";

    #[test]
    fn test_load_segments_and_fields() {
        let model = load(ORU).unwrap();
        assert_eq!(model.len(), 4);
        assert_eq!(model.field_separator, '|');
        assert_eq!(model.message_type(), Some("ORU^R01"));
        assert_eq!(model.segment("OBX").unwrap().fields[5], "5.4");
    }

    #[test]
    fn test_lowercase_segment_ids_are_uppercased() {
        let model = load(&ORU.to_ascii_lowercase()).unwrap();
        assert_eq!(model.len(), 4);
        assert_eq!(model.segments[0].id, "MSH");
        assert_eq!(model.message_type(), Some("oru^r01"));
        assert!(model.segment("OBX").is_some());
    }

    #[test]
    fn test_bare_segment_id_is_accepted() {
        let model = load("MSH|^~\\&|A\rNTE\r").unwrap();
        assert_eq!(model.segment("NTE").unwrap().fields, vec!["NTE".to_string()]);
    }

    #[test]
    fn test_missing_msh_is_rejected() {
        assert!(matches!(load("PID|1||123\r"), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_malformed_segment_id_is_rejected() {
        let result = load("MSH|^~\\&|A\rP-D|1\r");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));

        let result = load("MSH|^~\\&|A\rPIDX|1\r");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_alphanumeric_separator_is_rejected() {
        assert!(matches!(load("MSHA^~\\&A"), Err(EdiError::DataValidation(_))));
    }
}

//! X12 structural loader
//!
//! Checks the interchange envelope: ISA/IEA, GS/GE and ST/SE must pair up and
//! nest in that order.

use crate::core::analysis::x12::{has_segment_id, segments};
use crate::domain::{EdiError, Result};

/// Offset of the element separator within the ISA segment
const ISA_ELEMENT_SEPARATOR: usize = 3;

/// A parsed X12 segment; `elements[0]` is the segment id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X12Segment {
    /// Segment id, uppercased
    pub id: String,
    pub elements: Vec<String>,
}

/// X12 interchange split into segments and elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X12Model {
    pub element_separator: char,
    pub segments: Vec<X12Segment>,
    pub group_count: usize,
    pub transaction_count: usize,
}

impl X12Model {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Transaction set identifiers from ST01, e.g. `270`
    pub fn transaction_sets(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|segment| segment.id == "ST")
            .filter_map(|segment| segment.elements.get(1))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Envelope {
    Interchange,
    Group,
    Transaction,
}

impl Envelope {
    fn header(&self) -> &'static str {
        match self {
            Envelope::Interchange => "ISA",
            Envelope::Group => "GS",
            Envelope::Transaction => "ST",
        }
    }

    fn trailer(&self) -> &'static str {
        match self {
            Envelope::Interchange => "IEA",
            Envelope::Group => "GE",
            Envelope::Transaction => "SE",
        }
    }

    fn parent(&self) -> Option<Envelope> {
        match self {
            Envelope::Interchange => None,
            Envelope::Group => Some(Envelope::Interchange),
            Envelope::Transaction => Some(Envelope::Group),
        }
    }

    fn opened_by(id: &str) -> Option<Envelope> {
        match id {
            "ISA" => Some(Envelope::Interchange),
            "GS" => Some(Envelope::Group),
            "ST" => Some(Envelope::Transaction),
            _ => None,
        }
    }

    fn closed_by(id: &str) -> Option<Envelope> {
        match id {
            "IEA" => Some(Envelope::Interchange),
            "GE" => Some(Envelope::Group),
            "SE" => Some(Envelope::Transaction),
            _ => None,
        }
    }
}

fn envelope_error(msg: String) -> EdiError {
    EdiError::DataValidation(format!("Invalid X12 envelope: {msg}"))
}

/// Loads an X12 interchange
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the interchange doesn't start with
/// ISA, or if envelope headers and trailers don't balance and nest.
pub fn load(message: &str) -> Result<X12Model> {
    let raw_segments = segments(message);
    let isa = raw_segments.first().map(|s| s.trim()).unwrap_or_default();
    if !has_segment_id(isa, "ISA") {
        return Err(envelope_error("interchange must start with ISA".to_string()));
    }

    let separator = isa.chars().nth(ISA_ELEMENT_SEPARATOR).ok_or_else(|| {
        envelope_error("ISA segment is missing its element separator".to_string())
    })?;

    let mut open: Vec<Envelope> = Vec::new();
    let mut segments = Vec::with_capacity(raw_segments.len());
    let mut group_count = 0;
    let mut transaction_count = 0;

    for raw in &raw_segments {
        let elements: Vec<String> = raw.trim().split(separator).map(str::to_string).collect();
        let id = elements
            .first()
            .map(|element| element.to_ascii_uppercase())
            .unwrap_or_default();

        if open.is_empty() && !segments.is_empty() {
            return Err(envelope_error(format!("segment '{id}' follows IEA")));
        }

        if let Some(envelope) = Envelope::opened_by(&id) {
            if open.last().copied() != envelope.parent() {
                return Err(envelope_error(format!(
                    "{} is not allowed here",
                    envelope.header()
                )));
            }
            match envelope {
                Envelope::Group => group_count += 1,
                Envelope::Transaction => transaction_count += 1,
                Envelope::Interchange => {}
            }
            open.push(envelope);
        } else if let Some(envelope) = Envelope::closed_by(&id) {
            if open.last() != Some(&envelope) {
                return Err(envelope_error(format!(
                    "{} without a matching {}",
                    envelope.trailer(),
                    envelope.header()
                )));
            }
            open.pop();
        } else if open.last() != Some(&Envelope::Transaction) {
            return Err(envelope_error(format!(
                "segment '{id}' is outside a transaction set"
            )));
        }

        segments.push(X12Segment { id, elements });
    }

    if let Some(envelope) = open.last() {
        return Err(envelope_error(format!(
            "{} is never closed by {}",
            envelope.header(),
            envelope.trailer()
        )));
    }

    Ok(X12Model {
        element_separator: separator,
        segments,
        group_count,
        transaction_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISA: &str = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*P*:~";

    fn interchange(body: &str) -> String {
        format!("{ISA}{body}IEA*1*000000001~")
    }

    #[test]
    fn test_load_balanced_interchange() {
        let message = interchange(
            "GS*HS*S*R*20240101*1200*1*X*005010X279A1~ST*270*0001~BHT*0022*13~SE*3*0001~GE*1*1~",
        );
        let model = load(&message).unwrap();
        assert_eq!(model.len(), 7);
        assert_eq!(model.element_separator, '*');
        assert_eq!(model.group_count, 1);
        assert_eq!(model.transaction_count, 1);
        assert_eq!(model.transaction_sets(), vec!["270"]);
    }

    #[test]
    fn test_lowercase_segment_ids() {
        let message = interchange(
            "gs*HS*S*R*20240101*1200*1*X*005010X279A1~st*270*0001~bht*0022*13~se*3*0001~ge*1*1~",
        )
        .replacen("ISA", "isa", 1)
        .replace("IEA", "iea");
        let model = load(&message).unwrap();
        assert_eq!(model.len(), 7);
        assert_eq!(model.segments[0].id, "ISA");
        assert_eq!(model.transaction_sets(), vec!["270"]);
    }

    #[test]
    fn test_missing_trailer_is_rejected() {
        let message = interchange("GS*HS*S*R*20240101*1200*1*X*005010~ST*270*0001~GE*1*1~");
        assert!(matches!(load(&message), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_unclosed_interchange_is_rejected() {
        let message = format!("{ISA}GS*HS*S*R*20240101*1200*1*X*005010~GE*0*1~");
        assert!(matches!(load(&message), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_transaction_outside_group_is_rejected() {
        let message = interchange("ST*270*0001~SE*2*0001~");
        assert!(matches!(load(&message), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_data_segment_outside_transaction_is_rejected() {
        let message = interchange("GS*HS*S*R*20240101*1200*1*X*005010~BHT*0022~GE*0*1~");
        assert!(matches!(load(&message), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_segments_after_iea_are_rejected() {
        let message = format!("{}GS*HS~", interchange(""));
        assert!(matches!(load(&message), Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_missing_isa_is_rejected() {
        assert!(matches!(load("GS*HS~GE*0*1~"), Err(EdiError::DataValidation(_))));
    }
}

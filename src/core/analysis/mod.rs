//! Message analysis
//!
//! The analyzer classifies a message's base encoding and EDI format, then
//! extracts format-specific metadata. It is a pure function of the message
//! bytes.
//!
//! Detection order, first match wins:
//!
//! 1. Binary content → `BINARY`; DICOM if `DICM` sits at offset 128.
//! 2. First non-whitespace character `{` or `[` → `JSON`; FHIR if the document
//!    has a `resourceType`.
//! 3. `<` → `XML`; FHIR if the root element is in the FHIR namespace.
//! 4. Anything else → `TEXT`; `MSH` is HL7 and `ISA` is X12 (case-insensitive).
//!
//! # Example
//!
//! ```
//! use edi::core::analysis::analyze;
//! use edi::domain::{EdiMessageFormat, InputMessage};
//!
//! let message = InputMessage::from(r#"{"resourceType":"Patient"}"#);
//! let metadata = analyze(&message).unwrap();
//! assert_eq!(metadata.edi_message_format, EdiMessageFormat::Fhir);
//! assert_eq!(metadata.record_count, Some(1));
//! ```

pub mod checksum;
pub mod dicom;
pub mod fhir;
pub mod hl7;
pub mod x12;

use crate::domain::{
    BaseMessageFormat, EdiError, EdiMessageFormat, EdiMessageMetadata, InputMessage, Result,
};
use checksum::create_checksum;

/// Minimum message length required for signature inspection
pub const MESSAGE_SAMPLE_SIZE: usize = 3;

/// Format-specific metadata fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatFields {
    pub specification_version: Option<String>,
    pub implementation_versions: Vec<String>,
    pub record_count: Option<usize>,
}

/// Per-format metadata extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAnalyzer {
    Hl7,
    X12,
    Fhir,
    /// Formats without additional fields (DICOM)
    Passthrough,
}

impl FormatAnalyzer {
    /// Selects the analyzer for a detected format
    ///
    /// # Errors
    ///
    /// Returns `EdiError::Analysis` for formats that have no analyzer.
    pub fn for_format(format: EdiMessageFormat) -> Result<Self> {
        match format {
            EdiMessageFormat::Hl7 => Ok(Self::Hl7),
            EdiMessageFormat::X12 => Ok(Self::X12),
            EdiMessageFormat::Fhir => Ok(Self::Fhir),
            EdiMessageFormat::Dicom => Ok(Self::Passthrough),
            EdiMessageFormat::Ccda => Err(EdiError::Analysis(format!(
                "No analyzer available for {format} messages"
            ))),
        }
    }

    /// Extracts the format-specific fields of a message
    pub fn analyze_message_data(
        &self,
        message: &InputMessage,
        base_format: BaseMessageFormat,
    ) -> Result<FormatFields> {
        match self {
            FormatAnalyzer::Passthrough => Ok(FormatFields::default()),
            FormatAnalyzer::Hl7 => hl7::analyze(require_text(message, "HL7")?),
            FormatAnalyzer::X12 => x12::analyze(require_text(message, "X12")?),
            FormatAnalyzer::Fhir => {
                let text = require_text(message, "FHIR")?;
                match base_format {
                    BaseMessageFormat::Json => fhir::analyze_json(text),
                    BaseMessageFormat::Xml => fhir::analyze_xml(text),
                    other => Err(EdiError::Analysis(format!(
                        "FHIR analysis requires JSON or XML, found {other}"
                    ))),
                }
            }
        }
    }
}

fn require_text<'a>(message: &'a InputMessage, format: &str) -> Result<&'a str> {
    message.as_text().ok_or_else(|| {
        EdiError::Analysis(format!("{format} analysis requires a text message"))
    })
}

fn check_sample(message: &InputMessage) -> Result<()> {
    let length = match message {
        InputMessage::Text(text) => {
            if text.trim().is_empty() {
                return Err(EdiError::DataValidation(
                    "Input message is empty or blank".to_string(),
                ));
            }
            text.chars().count()
        }
        InputMessage::Binary(bytes) => bytes.len(),
    };

    if length < MESSAGE_SAMPLE_SIZE {
        return Err(EdiError::DataValidation(format!(
            "Invalid input message: at least {MESSAGE_SAMPLE_SIZE} characters are required"
        )));
    }
    Ok(())
}

/// Returns the base message format of a message
pub fn detect_base_format(message: &InputMessage) -> BaseMessageFormat {
    match message {
        InputMessage::Binary(_) => BaseMessageFormat::Binary,
        InputMessage::Text(text) => match text.trim_start().chars().next() {
            Some('{') | Some('[') => BaseMessageFormat::Json,
            Some('<') => BaseMessageFormat::Xml,
            _ => BaseMessageFormat::Text,
        },
    }
}

/// Returns the EDI message format of a message
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if no known signature matches or if a
/// JSON/XML document is malformed.
pub fn detect_edi_format(
    message: &InputMessage,
    base_format: BaseMessageFormat,
) -> Result<EdiMessageFormat> {
    let detected = match (message, base_format) {
        (InputMessage::Binary(bytes), _) => {
            dicom::has_dicom_marker(bytes).then_some(EdiMessageFormat::Dicom)
        }
        (InputMessage::Text(text), BaseMessageFormat::Json) => {
            let document = fhir::load_json(text)?;
            fhir::is_fhir_json(&document).then_some(EdiMessageFormat::Fhir)
        }
        (InputMessage::Text(text), BaseMessageFormat::Xml) => {
            let summary = fhir::scan_document(text)?;
            summary.is_fhir().then_some(EdiMessageFormat::Fhir)
        }
        (InputMessage::Text(text), _) => {
            let signature: String = text.trim_start().chars().take(3).collect();
            match signature.to_ascii_uppercase().as_str() {
                "MSH" => Some(EdiMessageFormat::Hl7),
                "ISA" => Some(EdiMessageFormat::X12),
                _ => None,
            }
        }
    };

    detected.ok_or_else(|| {
        EdiError::DataValidation(
            "Unable to determine edi message format for input message".to_string(),
        )
    })
}

/// Returns `EdiMessageMetadata` for a message
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the message is blank, shorter than
/// [`MESSAGE_SAMPLE_SIZE`], unrecognized, or missing required structure.
pub fn analyze(message: &InputMessage) -> Result<EdiMessageMetadata> {
    check_sample(message)?;

    let base_message_format = detect_base_format(message);
    let edi_message_format = detect_edi_format(message, base_message_format)?;
    let analyzer = FormatAnalyzer::for_format(edi_message_format)?;
    let fields = analyzer.analyze_message_data(message, base_message_format)?;

    tracing::debug!(
        base_message_format = %base_message_format,
        edi_message_format = %edi_message_format,
        message_size = message.len(),
        "Analyzed EDI message"
    );

    Ok(EdiMessageMetadata {
        base_message_format,
        edi_message_format,
        specification_version: fields.specification_version,
        implementation_versions: fields.implementation_versions,
        message_size: message.len(),
        checksum: create_checksum(message.as_bytes()),
        record_count: fields.record_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dicom_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; dicom::PREAMBLE_LENGTH];
        bytes.extend_from_slice(dicom::DICOM_MARKER);
        bytes.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x02, 0x00, b'1', 0xff]);
        bytes
    }

    #[test]
    fn test_detect_base_format() {
        assert_eq!(detect_base_format(&"  {\"a\":1}".into()), BaseMessageFormat::Json);
        assert_eq!(detect_base_format(&"[1]".into()), BaseMessageFormat::Json);
        assert_eq!(detect_base_format(&"\n<Patient/>".into()), BaseMessageFormat::Xml);
        assert_eq!(detect_base_format(&"MSH|".into()), BaseMessageFormat::Text);
        assert_eq!(
            detect_base_format(&InputMessage::Binary(vec![0xff; 4])),
            BaseMessageFormat::Binary
        );
    }

    #[test]
    fn test_text_signatures_are_case_insensitive() {
        let message: InputMessage = "msh|^~\\&|".into();
        assert_eq!(
            detect_edi_format(&message, BaseMessageFormat::Text).unwrap(),
            EdiMessageFormat::Hl7
        );
        let message: InputMessage = "  isa*00".into();
        assert_eq!(
            detect_edi_format(&message, BaseMessageFormat::Text).unwrap(),
            EdiMessageFormat::X12
        );
    }

    #[test]
    fn test_unknown_text_is_rejected() {
        let result = analyze(&"PID|1||12345".into());
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_json_without_resource_type_is_rejected() {
        let result = analyze(&r#"{"id": "123"}"#.into());
        assert!(matches!(result, Err(EdiError::DataValidation(_))));

        let result = analyze(&r#"[{"resourceType": "Patient"}]"#.into());
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let result = analyze(&r#"{"resourceType": "#.into());
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_non_fhir_xml_is_rejected() {
        let result = analyze(&"<note><to>Tove</to></note>".into());
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_analyze_dicom() {
        let bytes = dicom_bytes();
        let metadata = analyze(&InputMessage::Binary(bytes.clone())).unwrap();
        assert_eq!(metadata.base_message_format, BaseMessageFormat::Binary);
        assert_eq!(metadata.edi_message_format, EdiMessageFormat::Dicom);
        assert_eq!(metadata.specification_version, None);
        assert!(metadata.implementation_versions.is_empty());
        assert_eq!(metadata.record_count, None);
        assert_eq!(metadata.message_size, bytes.len());
        assert_eq!(metadata.checksum, create_checksum(&bytes));
    }

    #[test]
    fn test_binary_without_marker_is_rejected() {
        let result = analyze(&InputMessage::Binary(vec![0xff; 256]));
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_short_binary_is_rejected() {
        let result = analyze(&InputMessage::Binary(vec![0xff, 0xfe]));
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_ccda_has_no_analyzer() {
        let result = FormatAnalyzer::for_format(EdiMessageFormat::Ccda);
        assert!(matches!(result, Err(EdiError::Analysis(_))));
    }

    #[test]
    fn test_text_analyzer_on_binary_is_internal_error() {
        let result = FormatAnalyzer::Hl7
            .analyze_message_data(&InputMessage::Binary(vec![0; 4]), BaseMessageFormat::Binary);
        assert!(matches!(result, Err(EdiError::Analysis(_))));
    }
}

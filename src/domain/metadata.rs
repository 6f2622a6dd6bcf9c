//! Message formats and analyzer metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base encoding of an EDI message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaseMessageFormat {
    /// Opaque bytes
    Binary,
    /// JSON document
    Json,
    /// Delimited text
    Text,
    /// XML document
    Xml,
}

impl BaseMessageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseMessageFormat::Binary => "BINARY",
            BaseMessageFormat::Json => "JSON",
            BaseMessageFormat::Text => "TEXT",
            BaseMessageFormat::Xml => "XML",
        }
    }
}

impl fmt::Display for BaseMessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EDI standard a message conforms to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdiMessageFormat {
    /// Consolidated CDA, reserved; never produced by detection
    #[serde(rename = "C-CDA")]
    Ccda,
    #[serde(rename = "DICOM")]
    Dicom,
    #[serde(rename = "FHIR")]
    Fhir,
    #[serde(rename = "HL7")]
    Hl7,
    #[serde(rename = "X12")]
    X12,
}

impl EdiMessageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdiMessageFormat::Ccda => "C-CDA",
            EdiMessageFormat::Dicom => "DICOM",
            EdiMessageFormat::Fhir => "FHIR",
            EdiMessageFormat::Hl7 => "HL7",
            EdiMessageFormat::X12 => "X12",
        }
    }
}

impl fmt::Display for EdiMessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata produced by the analyzer
///
/// Created once per analyze stage and immutable afterwards. `message_size` is
/// always the byte length of the original message and `checksum` is the
/// SHA-256 hex digest of those same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdiMessageMetadata {
    pub base_message_format: BaseMessageFormat,

    pub edi_message_format: EdiMessageFormat,

    /// Version of the base standard, e.g. "2.6", "005010" or "R4"
    pub specification_version: Option<String>,

    /// Implementation guides or profiles, in message order
    #[serde(default)]
    pub implementation_versions: Vec<String>,

    /// Size of the raw message in bytes
    pub message_size: usize,

    /// SHA-256 hex digest of the raw message bytes
    pub checksum: String,

    /// Number of records (segments, bundle entries); unset for DICOM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
}

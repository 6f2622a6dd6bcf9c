//! FHIR loader for JSON and XML resources

use crate::core::analysis::detect_base_format;
use crate::core::analysis::fhir::{
    load_json, resolve_release, resource_type, scan_document, FhirRelease, XmlDocumentSummary,
};
use crate::domain::{BaseMessageFormat, EdiError, InputMessage, Result};
use serde_json::Value;

/// Parsed body of a FHIR resource
#[derive(Debug, Clone, PartialEq)]
pub enum FhirContent {
    Json(Value),
    Xml(XmlDocumentSummary),
}

/// FHIR resource bound to the release that defines it
#[derive(Debug, Clone, PartialEq)]
pub struct FhirModel {
    pub release: FhirRelease,
    pub resource_type: String,
    pub content: FhirContent,
}

/// Loads a FHIR resource
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the document is malformed, is not a
/// JSON object or FHIR XML document, or its resource type isn't defined by a
/// supported release.
pub fn load(message: &InputMessage) -> Result<FhirModel> {
    let text = message.as_text().ok_or_else(|| {
        EdiError::Validation("FHIR loader requires a text message".to_string())
    })?;

    match detect_base_format(message) {
        BaseMessageFormat::Json => {
            let document = load_json(text)?;
            if !document.is_object() {
                return Err(EdiError::DataValidation(
                    "FHIR JSON resource must be an object".to_string(),
                ));
            }
            let resource_type = resource_type(&document)?.to_string();
            Ok(FhirModel {
                release: resolve_release(&resource_type)?,
                resource_type,
                content: FhirContent::Json(document),
            })
        }
        BaseMessageFormat::Xml => {
            let summary = scan_document(text)?;
            if !summary.is_fhir() {
                return Err(EdiError::DataValidation(format!(
                    "XML root element '{}' is not a FHIR resource",
                    summary.qualified_root()
                )));
            }
            Ok(FhirModel {
                release: resolve_release(&summary.root_name)?,
                resource_type: summary.root_name.clone(),
                content: FhirContent::Xml(summary),
            })
        }
        other => Err(EdiError::DataValidation(format!(
            "FHIR resources must be JSON or XML, found {other}"
        ))),
    }
}

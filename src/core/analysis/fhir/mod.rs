//! FHIR analysis for JSON and XML resources
//!
//! The specification version is the first FHIR release (R4, STU3, DSTU2)
//! that defines the resource type. Profiles come from `meta.profile`, and a
//! Bundle counts one record per entry.

pub mod release;
pub mod xml;

use super::FormatFields;
use crate::domain::{EdiError, Result};
use serde_json::Value;

pub use release::{resolve_release, FhirRelease};
pub use xml::{scan_document, XmlDocumentSummary};

/// Base URL of the FHIR specification, also its XML namespace
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

const BUNDLE: &str = "Bundle";

/// Parses a JSON message
pub fn load_json(message: &str) -> Result<Value> {
    serde_json::from_str(message)
        .map_err(|e| EdiError::DataValidation(format!("Malformed JSON: {e}")))
}

/// Returns true if a JSON document carries a `resourceType`
pub fn is_fhir_json(document: &Value) -> bool {
    document
        .get("resourceType")
        .is_some_and(|resource_type| !resource_type.is_null())
}

/// Returns the `resourceType` of a FHIR JSON resource
pub fn resource_type(document: &Value) -> Result<&str> {
    document
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            EdiError::DataValidation("FHIR resource has no string resourceType".to_string())
        })
}

fn profiles(document: &Value) -> Result<Vec<String>> {
    let Some(profiles) = document.pointer("/meta/profile") else {
        return Ok(Vec::new());
    };

    let invalid =
        || EdiError::DataValidation("meta.profile must be an array of strings".to_string());
    profiles
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|profile| profile.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

/// Extracts release, profiles and record count from a FHIR JSON resource
pub fn analyze_json(message: &str) -> Result<FormatFields> {
    let document = load_json(message)?;
    let resource_type = resource_type(&document)?;
    let release = resolve_release(resource_type)?;

    let record_count = if resource_type.eq_ignore_ascii_case(BUNDLE) {
        document
            .get("entry")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    } else {
        1
    };

    Ok(FormatFields {
        specification_version: Some(release.to_string()),
        implementation_versions: profiles(&document)?,
        record_count: Some(record_count),
    })
}

/// Extracts release, profiles and record count from a FHIR XML resource
pub fn analyze_xml(message: &str) -> Result<FormatFields> {
    let summary = scan_document(message)?;
    if !summary.is_fhir() {
        return Err(EdiError::DataValidation(format!(
            "XML root element '{}' is not in the FHIR namespace",
            summary.qualified_root()
        )));
    }

    let release = resolve_release(&summary.root_name)?;
    let record_count = if summary.root_name.eq_ignore_ascii_case(BUNDLE) {
        summary.entry_count
    } else {
        1
    };

    Ok(FormatFields {
        specification_version: Some(release.to_string()),
        implementation_versions: summary.profiles,
        record_count: Some(record_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_json_patient() {
        let message = r#"{"resourceType":"Patient","meta":{"profile":["http://hl7.org/fhir/us/someprofile"]}}"#;
        let fields = analyze_json(message).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("R4"));
        assert_eq!(
            fields.implementation_versions,
            vec!["http://hl7.org/fhir/us/someprofile".to_string()]
        );
        assert_eq!(fields.record_count, Some(1));
    }

    #[test]
    fn test_analyze_json_bundle_counts_entries() {
        let message = r#"{"resourceType":"Bundle","type":"collection","entry":[{},{},{}]}"#;
        let fields = analyze_json(message).unwrap();
        assert_eq!(fields.record_count, Some(3));
        assert!(fields.implementation_versions.is_empty());
    }

    #[test]
    fn test_analyze_json_bundle_without_entries() {
        let fields = analyze_json(r#"{"resourceType":"Bundle"}"#).unwrap();
        assert_eq!(fields.record_count, Some(0));
    }

    #[test]
    fn test_analyze_json_stu3_resource() {
        let fields = analyze_json(r#"{"resourceType":"ReferralRequest"}"#).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("STU3"));
    }

    #[test]
    fn test_analyze_json_rejects_bad_profiles() {
        let result = analyze_json(r#"{"resourceType":"Patient","meta":{"profile":"x"}}"#);
        assert!(matches!(result, Err(EdiError::DataValidation(_))));

        let result = analyze_json(r#"{"resourceType":"Patient","meta":{"profile":[1]}}"#);
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_analyze_json_requires_string_resource_type() {
        let result = analyze_json(r#"{"resourceType":7}"#);
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_is_fhir_json() {
        assert!(is_fhir_json(&serde_json::json!({"resourceType": "Patient"})));
        assert!(!is_fhir_json(&serde_json::json!({"resourceType": null})));
        assert!(!is_fhir_json(&serde_json::json!([{"resourceType": "Patient"}])));
    }

    #[test]
    fn test_analyze_xml_bundle() {
        let message = r#"<Bundle xmlns="http://hl7.org/fhir"><type value="collection"/><entry/><entry/></Bundle>"#;
        let fields = analyze_xml(message).unwrap();
        assert_eq!(fields.specification_version.as_deref(), Some("R4"));
        assert_eq!(fields.record_count, Some(2));
    }

    #[test]
    fn test_analyze_xml_rejects_foreign_namespace() {
        let result = analyze_xml(r#"<Patient xmlns="urn:not-fhir"/>"#);
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }
}

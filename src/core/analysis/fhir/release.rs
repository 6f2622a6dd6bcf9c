//! FHIR release catalogues
//!
//! A resource is compatible with a release when the release defines its
//! resource type. Releases are checked newest first.

use crate::domain::{EdiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported FHIR releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FhirRelease {
    R4,
    Stu3,
    Dstu2,
}

impl FhirRelease {
    /// Order in which releases are checked for a resource type
    pub const PREFERENCE: [FhirRelease; 3] =
        [FhirRelease::R4, FhirRelease::Stu3, FhirRelease::Dstu2];

    pub fn as_str(&self) -> &'static str {
        match self {
            FhirRelease::R4 => "R4",
            FhirRelease::Stu3 => "STU3",
            FhirRelease::Dstu2 => "DSTU2",
        }
    }

    /// Returns true if the release defines the resource type
    pub fn defines(&self, resource_type: &str) -> bool {
        let catalogue = match self {
            FhirRelease::R4 => R4_RESOURCES,
            FhirRelease::Stu3 => STU3_RESOURCES,
            FhirRelease::Dstu2 => DSTU2_RESOURCES,
        };
        catalogue.contains(&resource_type)
    }
}

impl fmt::Display for FhirRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the first release in [`FhirRelease::PREFERENCE`] that defines the
/// resource type
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if no supported release defines it.
pub fn resolve_release(resource_type: &str) -> Result<FhirRelease> {
    for release in FhirRelease::PREFERENCE {
        if release.defines(resource_type) {
            return Ok(release);
        }
        tracing::debug!(
            resource_type,
            release = %release,
            "FHIR resource is not defined by release"
        );
    }

    Err(EdiError::DataValidation(format!(
        "Resource '{resource_type}' is not compatible with FHIR R4, STU3, DSTU2"
    )))
}

const R4_RESOURCES: &[&str] = &[
    "Account", "ActivityDefinition", "AdverseEvent", "AllergyIntolerance", "Appointment",
    "AppointmentResponse", "AuditEvent", "Basic", "Binary", "BiologicallyDerivedProduct",
    "BodyStructure", "Bundle", "CapabilityStatement", "CarePlan", "CareTeam", "CatalogEntry",
    "ChargeItem", "ChargeItemDefinition", "Claim", "ClaimResponse", "ClinicalImpression",
    "CodeSystem", "Communication", "CommunicationRequest", "CompartmentDefinition",
    "Composition", "ConceptMap", "Condition", "Consent", "Contract", "Coverage",
    "CoverageEligibilityRequest", "CoverageEligibilityResponse", "DetectedIssue", "Device",
    "DeviceDefinition", "DeviceMetric", "DeviceRequest", "DeviceUseStatement",
    "DiagnosticReport", "DocumentManifest", "DocumentReference", "EffectEvidenceSynthesis",
    "Encounter", "Endpoint", "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare",
    "EventDefinition", "Evidence", "EvidenceVariable", "ExampleScenario",
    "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "Goal", "GraphDefinition", "Group",
    "GuidanceResponse", "HealthcareService", "ImagingStudy", "Immunization",
    "ImmunizationEvaluation", "ImmunizationRecommendation", "ImplementationGuide",
    "InsurancePlan", "Invoice", "Library", "Linkage", "List", "Location", "Measure",
    "MeasureReport", "Media", "Medication", "MedicationAdministration", "MedicationDispense",
    "MedicationKnowledge", "MedicationRequest", "MedicationStatement", "MedicinalProduct",
    "MedicinalProductAuthorization", "MedicinalProductContraindication",
    "MedicinalProductIndication", "MedicinalProductIngredient", "MedicinalProductInteraction",
    "MedicinalProductManufactured", "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical", "MedicinalProductUndesirableEffect",
    "MessageDefinition", "MessageHeader", "MolecularSequence", "NamingSystem",
    "NutritionOrder", "Observation", "ObservationDefinition", "OperationDefinition",
    "OperationOutcome", "Organization", "OrganizationAffiliation", "Parameters", "Patient",
    "PaymentNotice", "PaymentReconciliation", "Person", "PlanDefinition", "Practitioner",
    "PractitionerRole", "Procedure", "Provenance", "Questionnaire", "QuestionnaireResponse",
    "RelatedPerson", "RequestGroup", "ResearchDefinition", "ResearchElementDefinition",
    "ResearchStudy", "ResearchSubject", "RiskAssessment", "RiskEvidenceSynthesis", "Schedule",
    "SearchParameter", "ServiceRequest", "Slot", "Specimen", "SpecimenDefinition",
    "StructureDefinition", "StructureMap", "Subscription", "Substance",
    "SubstanceNucleicAcid", "SubstancePolymer", "SubstanceProtein",
    "SubstanceReferenceInformation", "SubstanceSourceMaterial", "SubstanceSpecification",
    "SupplyDelivery", "SupplyRequest", "Task", "TerminologyCapabilities", "TestReport",
    "TestScript", "ValueSet", "VerificationResult", "VisionPrescription",
];

const STU3_RESOURCES: &[&str] = &[
    "Account", "ActivityDefinition", "AdverseEvent", "AllergyIntolerance", "Appointment",
    "AppointmentResponse", "AuditEvent", "Basic", "Binary", "BodySite", "Bundle",
    "CapabilityStatement", "CarePlan", "CareTeam", "ChargeItem", "Claim", "ClaimResponse",
    "ClinicalImpression", "CodeSystem", "Communication", "CommunicationRequest",
    "CompartmentDefinition", "Composition", "ConceptMap", "Condition", "Consent", "Contract",
    "Coverage", "DataElement", "DetectedIssue", "Device", "DeviceComponent", "DeviceMetric",
    "DeviceRequest", "DeviceUseStatement", "DiagnosticReport", "DocumentManifest",
    "DocumentReference", "EligibilityRequest", "EligibilityResponse", "Encounter", "Endpoint",
    "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare", "ExpansionProfile",
    "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "Goal", "GraphDefinition", "Group",
    "GuidanceResponse", "HealthcareService", "ImagingManifest", "ImagingStudy", "Immunization",
    "ImmunizationRecommendation", "ImplementationGuide", "Library", "Linkage", "List",
    "Location", "Measure", "MeasureReport", "Media", "Medication", "MedicationAdministration",
    "MedicationDispense", "MedicationRequest", "MedicationStatement", "MessageDefinition",
    "MessageHeader", "NamingSystem", "NutritionOrder", "Observation", "OperationDefinition",
    "OperationOutcome", "Organization", "Parameters", "Patient", "PaymentNotice",
    "PaymentReconciliation", "Person", "PlanDefinition", "Practitioner", "PractitionerRole",
    "Procedure", "ProcedureRequest", "ProcessRequest", "ProcessResponse", "Provenance",
    "Questionnaire", "QuestionnaireResponse", "ReferralRequest", "RelatedPerson",
    "RequestGroup", "ResearchStudy", "ResearchSubject", "RiskAssessment", "Schedule",
    "SearchParameter", "Sequence", "ServiceDefinition", "Slot", "Specimen",
    "StructureDefinition", "StructureMap", "Subscription", "Substance", "SupplyDelivery",
    "SupplyRequest", "Task", "TestReport", "TestScript", "ValueSet", "VisionPrescription",
];

const DSTU2_RESOURCES: &[&str] = &[
    "Account", "AllergyIntolerance", "Appointment", "AppointmentResponse", "AuditEvent",
    "Basic", "Binary", "BodySite", "Bundle", "CarePlan", "Claim", "ClaimResponse",
    "ClinicalImpression", "Communication", "CommunicationRequest", "Composition",
    "ConceptMap", "Condition", "Conformance", "Contract", "Coverage", "DataElement",
    "DetectedIssue", "Device", "DeviceComponent", "DeviceMetric", "DeviceUseRequest",
    "DeviceUseStatement", "DiagnosticOrder", "DiagnosticReport", "DocumentManifest",
    "DocumentReference", "EligibilityRequest", "EligibilityResponse", "Encounter",
    "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare", "ExplanationOfBenefit",
    "FamilyMemberHistory", "Flag", "Goal", "Group", "HealthcareService",
    "ImagingObjectSelection", "ImagingStudy", "Immunization", "ImmunizationRecommendation",
    "ImplementationGuide", "List", "Location", "Media", "Medication",
    "MedicationAdministration", "MedicationDispense", "MedicationOrder", "MedicationStatement",
    "MessageHeader", "NamingSystem", "NutritionOrder", "Observation", "OperationDefinition",
    "OperationOutcome", "Order", "OrderResponse", "Organization", "Parameters", "Patient",
    "PaymentNotice", "PaymentReconciliation", "Person", "Practitioner", "Procedure",
    "ProcedureRequest", "ProcessRequest", "ProcessResponse", "Provenance", "Questionnaire",
    "QuestionnaireResponse", "ReferralRequest", "RelatedPerson", "RiskAssessment", "Schedule",
    "SearchParameter", "Slot", "Specimen", "StructureDefinition", "Subscription", "Substance",
    "SupplyDelivery", "SupplyRequest", "TestScript", "ValueSet", "VisionPrescription",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r4_preferred_for_shared_resources() {
        assert_eq!(resolve_release("Patient").unwrap(), FhirRelease::R4);
        assert_eq!(resolve_release("Bundle").unwrap(), FhirRelease::R4);
    }

    #[test]
    fn test_retired_resources_fall_back() {
        assert_eq!(resolve_release("ProcedureRequest").unwrap(), FhirRelease::Stu3);
        assert_eq!(resolve_release("DiagnosticOrder").unwrap(), FhirRelease::Dstu2);
        assert_eq!(resolve_release("Conformance").unwrap(), FhirRelease::Dstu2);
    }

    #[test]
    fn test_unknown_resource_is_rejected() {
        let result = resolve_release("Spaceship");
        assert!(matches!(result, Err(EdiError::DataValidation(_))));
    }

    #[test]
    fn test_resource_types_are_case_sensitive() {
        assert!(resolve_release("patient").is_err());
    }

    #[test]
    fn test_release_display() {
        assert_eq!(FhirRelease::Stu3.to_string(), "STU3");
    }
}

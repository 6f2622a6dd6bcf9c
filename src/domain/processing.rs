//! Workflow operations, error records and the terminal result document

use crate::domain::errors::{EdiError, ErrorKind};
use crate::domain::metadata::EdiMessageMetadata;
use crate::domain::metrics::EdiProcessingMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation recorded in a workflow's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdiOperation {
    Analyze,
    Enrich,
    Validate,
    Translate,
    Complete,
    Cancel,
    Fail,
}

impl EdiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdiOperation::Analyze => "ANALYZE",
            EdiOperation::Enrich => "ENRICH",
            EdiOperation::Validate => "VALIDATE",
            EdiOperation::Translate => "TRANSLATE",
            EdiOperation::Complete => "COMPLETE",
            EdiOperation::Cancel => "CANCEL",
            EdiOperation::Fail => "FAIL",
        }
    }
}

impl fmt::Display for EdiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in a result's error list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human readable message
    pub msg: String,

    /// Error classification
    pub kind: ErrorKind,
}

impl ErrorRecord {
    pub fn new(msg: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            msg: msg.into(),
            kind,
        }
    }

    /// Record for a reason supplied to a `fail` transition
    pub fn workflow(msg: impl Into<String>) -> Self {
        Self::new(msg, ErrorKind::Workflow)
    }
}

impl From<&EdiError> for ErrorRecord {
    fn from(err: &EdiError) -> Self {
        Self::new(err.message(), err.kind())
    }
}

/// Terminal output of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdiResult {
    /// None when the analyze stage never completed
    pub metadata: Option<EdiMessageMetadata>,

    pub metrics: EdiProcessingMetrics,

    /// Error records in the order they were raised
    #[serde(default)]
    pub errors: Vec<ErrorRecord>,

    /// Completed operations in execution order
    #[serde(default)]
    pub operations: Vec<EdiOperation>,

    /// Echo of the input message, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_message: Option<String>,
}

impl EdiResult {
    /// Returns true if no errors were recorded
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any recorded error is attributable to the input
    pub fn has_input_errors(&self) -> bool {
        self.errors.iter().any(|e| e.kind.is_input_error())
    }

    /// Log the result
    pub fn log_summary(&self) {
        tracing::info!(
            edi_message_format = self
                .metadata
                .as_ref()
                .map(|m| m.edi_message_format.as_str())
                .unwrap_or("unknown"),
            operations = ?self.operations,
            total_time = self.metrics.total_time(),
            error_count = self.errors.len(),
            "EDI workflow finished"
        );

        for error in &self.errors {
            tracing::warn!(kind = %error.kind, msg = %error.msg, "Workflow error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_wire_names() {
        assert_eq!(serde_json::to_string(&EdiOperation::Cancel).unwrap(), "\"CANCEL\"");
        assert_eq!(EdiOperation::Analyze.to_string(), "ANALYZE");
    }

    #[test]
    fn test_error_record_from_edi_error() {
        let err = EdiError::DataValidation("Invalid input message".to_string());
        let record = ErrorRecord::from(&err);
        assert_eq!(record.msg, "Invalid input message");
        assert_eq!(record.kind, ErrorKind::DataValidation);
    }

    #[test]
    fn test_result_serialization() {
        let result = EdiResult {
            metadata: None,
            metrics: EdiProcessingMetrics::new(),
            errors: vec![ErrorRecord::workflow("oops")],
            operations: vec![EdiOperation::Fail],
            input_message: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["metadata"], json!(null));
        assert_eq!(value["errors"], json!([{"msg": "oops", "kind": "WORKFLOW"}]));
        assert_eq!(value["operations"], json!(["FAIL"]));
        assert_eq!(value["metrics"]["totalTime"], json!(0.0));
        assert!(value.get("inputMessage").is_none());
        assert!(!result.is_successful());
        assert!(!result.has_input_errors());
    }
}

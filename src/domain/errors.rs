//! Domain error types
//!
//! This module defines the error hierarchy for EDI processing. Errors are
//! domain-specific and don't expose third-party parser types; parser failures
//! are converted to their message text at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main EDI error type
///
/// Every fallible library operation returns this type. The variants separate
/// problems with the input message from problems inside the processor, see
/// [`EdiError::is_input_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdiError {
    /// The input message is present but structurally invalid or unrecognized
    #[error("Data validation error: {0}")]
    DataValidation(String),

    /// Unexpected failure while extracting metadata from a recognized message
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Failure while loading a message into its format-specific model
    #[error("Validation error: {0}")]
    Validation(String),

    /// An enrich or translate stage can't handle this kind of message
    ///
    /// Not raised by the built-in stages; [`Enricher`] and [`Translator`]
    /// implementations return it to reject input they don't support.
    ///
    /// [`Enricher`]: crate::core::workflow::Enricher
    /// [`Translator`]: crate::core::workflow::Translator
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// A workflow stage was requested from a state that doesn't permit it
    #[error("Invalid transition: cannot {transition} from state '{state}'")]
    InvalidTransition { state: String, transition: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl EdiError {
    /// Returns the error record kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdiError::DataValidation(_) => ErrorKind::DataValidation,
            EdiError::Analysis(_) => ErrorKind::Analysis,
            EdiError::Validation(_) => ErrorKind::Validation,
            EdiError::Unsupported(_) => ErrorKind::Unsupported,
            EdiError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            EdiError::Configuration(_)
            | EdiError::Io(_)
            | EdiError::Serialization(_)
            | EdiError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the error was caused by the caller's input rather than
    /// by the processor itself (4xx vs 5xx at a service boundary)
    pub fn is_input_error(&self) -> bool {
        self.kind().is_input_error()
    }

    /// Returns the bare error message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            EdiError::DataValidation(msg)
            | EdiError::Analysis(msg)
            | EdiError::Validation(msg)
            | EdiError::Unsupported(msg)
            | EdiError::Configuration(msg)
            | EdiError::Io(msg)
            | EdiError::Serialization(msg)
            | EdiError::Other(msg) => msg.clone(),
            EdiError::InvalidTransition { .. } => self.to_string(),
        }
    }
}

/// Classification attached to every error record in an `EdiResult`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Reason supplied to a `fail` transition
    Workflow,
    /// Invalid or unrecognized input message
    DataValidation,
    /// Internal analyzer failure
    Analysis,
    /// Internal validate-stage failure
    Validation,
    /// Message rejected by an enrich or translate stage
    Unsupported,
    /// Stage invoked out of order
    InvalidTransition,
    /// Anything else
    Internal,
}

impl ErrorKind {
    /// Returns true for kinds attributable to the input message
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::DataValidation | ErrorKind::Unsupported | ErrorKind::InvalidTransition
        )
    }

    /// Returns the wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Workflow => "WORKFLOW",
            ErrorKind::DataValidation => "DATA_VALIDATION",
            ErrorKind::Analysis => "ANALYSIS",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Unsupported => "UNSUPPORTED",
            ErrorKind::InvalidTransition => "INVALID_TRANSITION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for EdiError {
    fn from(err: std::io::Error) -> Self {
        EdiError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EdiError {
    fn from(err: serde_json::Error) -> Self {
        EdiError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EdiError {
    fn from(err: toml::de::Error) -> Self {
        EdiError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Malformed XML is always an input problem
impl From<quick_xml::Error> for EdiError {
    fn from(err: quick_xml::Error) -> Self {
        EdiError::DataValidation(format!("Malformed XML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edi_error_display() {
        let err = EdiError::DataValidation("Invalid input message".to_string());
        assert_eq!(err.to_string(), "Data validation error: Invalid input message");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = EdiError::InvalidTransition {
            state: "init".to_string(),
            transition: "validate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: cannot validate from state 'init'"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_input_errors_are_distinguished_from_internal_errors() {
        assert!(EdiError::DataValidation("bad".into()).is_input_error());
        assert!(EdiError::Unsupported("xml".into()).is_input_error());
        assert!(!EdiError::Analysis("bug".into()).is_input_error());
        assert!(!EdiError::Validation("bug".into()).is_input_error());
        assert!(!EdiError::Io("disk".into()).is_input_error());
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = EdiError::DataValidation("Invalid input message".to_string());
        assert_eq!(err.message(), "Invalid input message");
    }

    #[test]
    fn test_error_kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::DataValidation).unwrap();
        assert_eq!(json, "\"DATA_VALIDATION\"");
        assert_eq!(ErrorKind::InvalidTransition.to_string(), "INVALID_TRANSITION");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let edi_err: EdiError = io_err.into();
        assert!(matches!(edi_err, EdiError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let edi_err: EdiError = json_err.into();
        assert!(matches!(edi_err, EdiError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let edi_err: EdiError = toml_err.into();
        assert!(matches!(edi_err, EdiError::Configuration(_)));
        assert!(edi_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_edi_error_implements_std_error() {
        let err = EdiError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}

// EDI - HL7v2, X12, FHIR and DICOM message processing
// Copyright (c) 2025 EDI Contributors
// Licensed under the MIT License

//! # EDI - Healthcare message analysis and processing
//!
//! This library detects the format of EDI messages (HL7 v2, X12, FHIR JSON
//! and XML, DICOM), extracts lightweight metadata and drives each message
//! through a staged, timed workflow.
//!
//! ## Overview
//!
//! - **Analyzing** a message: base encoding, EDI format, specification and
//!   implementation versions, record count, size and SHA-256 checksum
//! - **Validating** it by loading the format-specific structure
//! - **Enriching** and **translating** through pluggable stages
//! - **Reporting** a result document with metadata, per-stage timings and
//!   errors
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Analysis, format loaders and the workflow state machine
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use edi::core::workflow::{EdiWorkflow, RunOptions};
//! use edi::domain::{BaseMessageFormat, EdiMessageFormat};
//!
//! let message = r#"{"resourceType":"Patient","meta":{"profile":["http://hl7.org/fhir/us/someprofile"]}}"#;
//!
//! let mut workflow = EdiWorkflow::new(message);
//! let result = workflow.run(RunOptions::default());
//!
//! let metadata = result.metadata.expect("analyze succeeded");
//! assert_eq!(metadata.base_message_format, BaseMessageFormat::Json);
//! assert_eq!(metadata.edi_message_format, EdiMessageFormat::Fhir);
//! assert_eq!(metadata.implementation_versions, vec!["http://hl7.org/fhir/us/someprofile"]);
//! assert_eq!(metadata.record_count, Some(1));
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`] with [`domain::EdiError`].
//! Workflow stages also record their errors in the result, so
//! [`core::workflow::EdiWorkflow::run`] always returns a result document:
//!
//! ```rust
//! use edi::core::workflow::{EdiWorkflow, RunOptions};
//! use edi::domain::ErrorKind;
//!
//! let result = EdiWorkflow::new("not an EDI message").run(RunOptions::default());
//!
//! assert!(result.metadata.is_none());
//! assert_eq!(result.errors[1].kind, ErrorKind::DataValidation);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

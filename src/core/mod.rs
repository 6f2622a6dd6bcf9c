//! Core EDI processing.
//!
//! # Modules
//!
//! - [`analysis`] - Format detection and metadata extraction
//! - [`validation`] - Format loaders used by the validate stage
//! - [`workflow`] - The staged workflow state machine
//!
//! # Workflow
//!
//! 1. **Analyze**: detect the base and EDI format, extract versions, record
//!    count, size and checksum
//! 2. **Enrich** (optional): pluggable [`workflow::Enricher`]
//! 3. **Validate** (optional): load the message into its format model
//! 4. **Translate** (optional): pluggable [`workflow::Translator`]
//! 5. **Complete**: produce the [`crate::domain::EdiResult`]
//!
//! # Example
//!
//! ```rust
//! use edi::core::workflow::{EdiWorkflow, RunOptions};
//!
//! let message = "ISA*00*          *00*          *ZZ*S              *ZZ*R              *240101*1200*^*00501*000000001*0*P*:~\
//!                GS*HS*S*R*20240101*1200*1*X*005010X279A1~ST*270*0001~SE*2*0001~GE*1*1~IEA*1*000000001~";
//!
//! let mut workflow = EdiWorkflow::new(message);
//! let result = workflow.run(RunOptions::default());
//!
//! let metadata = result.metadata.unwrap();
//! assert_eq!(metadata.specification_version.as_deref(), Some("005010"));
//! assert_eq!(metadata.record_count, Some(6));
//! ```

pub mod analysis;
pub mod validation;
pub mod workflow;

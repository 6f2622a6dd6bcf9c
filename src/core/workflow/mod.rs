//! Staged EDI workflow
//!
//! - [`state`] - States, transitions and the transition table
//! - [`timer`] - Stage timing
//! - [`stages`] - Enrich and translate extension traits
//! - [`processor`] - The [`EdiWorkflow`] state machine

pub mod processor;
pub mod stages;
pub mod state;
pub mod timer;

pub use processor::{EdiWorkflow, RunOptions, WORKFLOW_ERROR_MESSAGE};
pub use stages::{Enricher, NoopEnricher, NoopTranslator, Translator};
pub use state::{next_state, Transition, WorkflowState};

//! Workflow state machine
//!
//! States only move forward. Stages may be skipped but never reordered, and
//! terminal states accept no further transitions.
//!
//! | transition  | from                                          | to          |
//! |-------------|-----------------------------------------------|-------------|
//! | `analyze`   | init                                          | analyzed    |
//! | `enrich`    | analyzed                                      | enriched    |
//! | `validate`  | analyzed, enriched                            | validated   |
//! | `translate` | analyzed, enriched, validated                 | translated  |
//! | `complete`  | analyzed, enriched, validated, translated     | completed   |
//! | `cancel`    | any non-terminal                              | cancelled   |
//! | `fail`      | any non-terminal                              | failed      |

use crate::domain::{EdiError, EdiOperation, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    #[default]
    Init,
    Analyzed,
    Enriched,
    Validated,
    Translated,
    Completed,
    Cancelled,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Init => "init",
            WorkflowState::Analyzed => "analyzed",
            WorkflowState::Enriched => "enriched",
            WorkflowState::Validated => "validated",
            WorkflowState::Translated => "translated",
            WorkflowState::Completed => "completed",
            WorkflowState::Cancelled => "cancelled",
            WorkflowState::Failed => "failed",
        }
    }

    /// Returns true for completed, cancelled and failed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Completed | WorkflowState::Cancelled | WorkflowState::Failed
        )
    }

    // Position along the stage pipeline; terminal states have none
    fn rank(&self) -> Option<u8> {
        match self {
            WorkflowState::Init => Some(0),
            WorkflowState::Analyzed => Some(1),
            WorkflowState::Enriched => Some(2),
            WorkflowState::Validated => Some(3),
            WorkflowState::Translated => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested workflow transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Analyze,
    Enrich,
    Validate,
    Translate,
    Complete,
    Cancel,
    Fail,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Analyze => "analyze",
            Transition::Enrich => "enrich",
            Transition::Validate => "validate",
            Transition::Translate => "translate",
            Transition::Complete => "complete",
            Transition::Cancel => "cancel",
            Transition::Fail => "fail",
        }
    }

    /// Operation appended to the history when the transition succeeds
    pub fn operation(&self) -> EdiOperation {
        match self {
            Transition::Analyze => EdiOperation::Analyze,
            Transition::Enrich => EdiOperation::Enrich,
            Transition::Validate => EdiOperation::Validate,
            Transition::Translate => EdiOperation::Translate,
            Transition::Complete => EdiOperation::Complete,
            Transition::Cancel => EdiOperation::Cancel,
            Transition::Fail => EdiOperation::Fail,
        }
    }

    fn target(&self) -> WorkflowState {
        match self {
            Transition::Analyze => WorkflowState::Analyzed,
            Transition::Enrich => WorkflowState::Enriched,
            Transition::Validate => WorkflowState::Validated,
            Transition::Translate => WorkflowState::Translated,
            Transition::Complete => WorkflowState::Completed,
            Transition::Cancel => WorkflowState::Cancelled,
            Transition::Fail => WorkflowState::Failed,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the state reached by applying `transition` in `state`
///
/// # Errors
///
/// Returns `EdiError::InvalidTransition` if the transition isn't permitted.
pub fn next_state(state: WorkflowState, transition: Transition) -> Result<WorkflowState> {
    let target = transition.target();

    let permitted = match (state.rank(), transition) {
        (None, _) => false,
        (Some(_), Transition::Cancel | Transition::Fail) => true,
        (Some(rank), Transition::Analyze) => rank == 0,
        (Some(rank), Transition::Complete) => rank >= 1,
        (Some(rank), _) => target.rank().is_some_and(|to| rank >= 1 && rank < to),
    };

    if permitted {
        Ok(target)
    } else {
        Err(EdiError::InvalidTransition {
            state: state.to_string(),
            transition: transition.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(WorkflowState::Init, Transition::Analyze, WorkflowState::Analyzed)]
    #[test_case(WorkflowState::Analyzed, Transition::Enrich, WorkflowState::Enriched)]
    #[test_case(WorkflowState::Analyzed, Transition::Validate, WorkflowState::Validated)]
    #[test_case(WorkflowState::Enriched, Transition::Validate, WorkflowState::Validated)]
    #[test_case(WorkflowState::Analyzed, Transition::Translate, WorkflowState::Translated)]
    #[test_case(WorkflowState::Validated, Transition::Translate, WorkflowState::Translated)]
    #[test_case(WorkflowState::Analyzed, Transition::Complete, WorkflowState::Completed)]
    #[test_case(WorkflowState::Translated, Transition::Complete, WorkflowState::Completed)]
    #[test_case(WorkflowState::Init, Transition::Cancel, WorkflowState::Cancelled)]
    #[test_case(WorkflowState::Init, Transition::Fail, WorkflowState::Failed)]
    #[test_case(WorkflowState::Validated, Transition::Fail, WorkflowState::Failed)]
    fn test_permitted(state: WorkflowState, transition: Transition, expected: WorkflowState) {
        assert_eq!(next_state(state, transition).unwrap(), expected);
    }

    #[test_case(WorkflowState::Init, Transition::Enrich)]
    #[test_case(WorkflowState::Init, Transition::Validate)]
    #[test_case(WorkflowState::Init, Transition::Translate)]
    #[test_case(WorkflowState::Init, Transition::Complete)]
    #[test_case(WorkflowState::Analyzed, Transition::Analyze)]
    #[test_case(WorkflowState::Enriched, Transition::Enrich)]
    #[test_case(WorkflowState::Validated, Transition::Enrich)]
    #[test_case(WorkflowState::Translated, Transition::Validate)]
    #[test_case(WorkflowState::Completed, Transition::Cancel)]
    #[test_case(WorkflowState::Cancelled, Transition::Fail)]
    #[test_case(WorkflowState::Failed, Transition::Complete)]
    fn test_rejected(state: WorkflowState, transition: Transition) {
        let err = next_state(state, transition).unwrap_err();
        assert_eq!(
            err,
            EdiError::InvalidTransition {
                state: state.to_string(),
                transition: transition.to_string(),
            }
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Completed.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(!WorkflowState::Init.is_terminal());
        assert!(!WorkflowState::Translated.is_terminal());
    }
}

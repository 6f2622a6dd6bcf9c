//! EDI workflow processor
//!
//! An [`EdiWorkflow`] owns one input message and drives it through the
//! analyze, enrich, validate and translate stages before a terminal
//! complete, cancel or fail transition.
//!
//! Every stage is timed, and its elapsed time is recorded in the workflow
//! metrics whether it succeeds or fails. A stage that fails moves the
//! workflow to `failed`, records a generic workflow error followed by the
//! underlying error, and returns that error to the caller. A stage requested
//! from a state that doesn't permit it returns `EdiError::InvalidTransition`
//! and leaves the workflow untouched.

use super::stages::{Enricher, NoopEnricher, NoopTranslator, Translator};
use super::state::{next_state, Transition, WorkflowState};
use super::timer::timed;
use crate::core::analysis;
use crate::core::validation::{default_registry, DataModel, LoaderRegistry};
use crate::domain::{
    EdiError, EdiMessageMetadata, EdiOperation, EdiProcessingMetrics, EdiResult, ErrorRecord,
    InputMessage, Result, Stage,
};
use crate::{log_error_with_context, log_stage_complete};
use std::sync::Arc;
use uuid::Uuid;

/// Error message recorded when a stage fails
pub const WORKFLOW_ERROR_MESSAGE: &str = "An error occurred executing the EDI workflow";

/// Stage flags for [`EdiWorkflow::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub enrich: bool,
    pub validate: bool,
    pub translate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            enrich: true,
            validate: true,
            translate: true,
        }
    }
}

/// Staged processing of a single EDI message
///
/// # Example
///
/// ```
/// use edi::core::workflow::{EdiWorkflow, RunOptions, WorkflowState};
/// use edi::domain::EdiMessageFormat;
///
/// let mut workflow = EdiWorkflow::new(r#"{"resourceType":"Patient"}"#);
/// let result = workflow.run(RunOptions::default());
///
/// assert!(result.is_successful());
/// assert_eq!(workflow.state(), WorkflowState::Completed);
/// assert_eq!(
///     result.metadata.map(|m| m.edi_message_format),
///     Some(EdiMessageFormat::Fhir)
/// );
/// ```
pub struct EdiWorkflow {
    id: Uuid,
    span: tracing::Span,
    message: InputMessage,
    state: WorkflowState,
    metadata: Option<EdiMessageMetadata>,
    metrics: EdiProcessingMetrics,
    errors: Vec<ErrorRecord>,
    operations: Vec<EdiOperation>,
    data_model: Option<DataModel>,
    loaders: Arc<LoaderRegistry>,
    enricher: Arc<dyn Enricher>,
    translator: Arc<dyn Translator>,
    include_input_message: bool,
}

impl EdiWorkflow {
    /// Creates a workflow in the `init` state with the default loaders and
    /// no-op enrich/translate stages
    pub fn new(message: impl Into<InputMessage>) -> Self {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("edi_workflow", workflow_id = %id);

        Self {
            id,
            span,
            message: message.into(),
            state: WorkflowState::Init,
            metadata: None,
            metrics: EdiProcessingMetrics::new(),
            errors: Vec::new(),
            operations: Vec::new(),
            data_model: None,
            loaders: default_registry(),
            enricher: Arc::new(NoopEnricher),
            translator: Arc::new(NoopTranslator),
            include_input_message: false,
        }
    }

    /// Uses a custom loader registry for the validate stage
    pub fn with_loaders(mut self, loaders: Arc<LoaderRegistry>) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Echo the input message in results
    pub fn include_input_message(mut self, include: bool) -> Self {
        self.include_input_message = include;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn message(&self) -> &InputMessage {
        &self.message
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Returns true until a terminal transition has run
    pub fn is_active(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Most recent operation, if any
    pub fn current_operation(&self) -> Option<EdiOperation> {
        self.operations.last().copied()
    }

    pub fn metadata(&self) -> Option<&EdiMessageMetadata> {
        self.metadata.as_ref()
    }

    pub fn metrics(&self) -> &EdiProcessingMetrics {
        &self.metrics
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn operations(&self) -> &[EdiOperation] {
        &self.operations
    }

    /// Model produced by the validate stage
    pub fn data_model(&self) -> Option<&DataModel> {
        self.data_model.as_ref()
    }

    /// Analyzes the input message and stores its metadata
    ///
    /// # Errors
    ///
    /// Returns `EdiError::InvalidTransition` unless the workflow is in `init`,
    /// or the analyzer's error, in which case the workflow has failed.
    pub fn analyze(&mut self) -> Result<()> {
        let metadata = self.run_stage(Stage::Analyze, Transition::Analyze, |workflow| {
            analysis::analyze(&workflow.message)
        })?;
        self.metadata = Some(metadata);
        Ok(())
    }

    /// Runs the configured [`Enricher`]
    pub fn enrich(&mut self) -> Result<()> {
        self.run_stage(Stage::Enrich, Transition::Enrich, |workflow| {
            let metadata = workflow.require_metadata()?;
            workflow.enricher.enrich(&workflow.message, metadata)
        })
    }

    /// Loads the message into its format-specific model
    ///
    /// # Errors
    ///
    /// Returns `EdiError::DataValidation` if no loader is registered for the
    /// detected format or the message doesn't load, in which case the
    /// workflow has failed.
    pub fn validate(&mut self) -> Result<()> {
        let model = self.run_stage(Stage::Validate, Transition::Validate, |workflow| {
            let metadata = workflow.require_metadata()?;
            workflow
                .loaders
                .load(metadata.edi_message_format, &workflow.message)
        })?;
        self.data_model = Some(model);
        Ok(())
    }

    /// Runs the configured [`Translator`]
    pub fn translate(&mut self) -> Result<()> {
        self.run_stage(Stage::Translate, Transition::Translate, |workflow| {
            let metadata = workflow.require_metadata()?;
            workflow.translator.translate(&workflow.message, metadata)
        })
    }

    /// Completes the workflow
    ///
    /// # Errors
    ///
    /// Returns `EdiError::InvalidTransition` before analysis or after a
    /// terminal transition.
    pub fn complete(&mut self) -> Result<EdiResult> {
        self.terminate(Transition::Complete, Vec::new())?;
        Ok(self.result())
    }

    /// Cancels the workflow from any non-terminal state
    pub fn cancel(&mut self) -> Result<EdiResult> {
        self.terminate(Transition::Cancel, Vec::new())?;
        Ok(self.result())
    }

    /// Fails the workflow from any non-terminal state
    ///
    /// Records `reason`, then the error's message when one is supplied.
    pub fn fail(&mut self, reason: &str, error: Option<&EdiError>) -> Result<EdiResult> {
        let mut records = vec![ErrorRecord::workflow(reason)];
        if let Some(error) = error {
            records.push(ErrorRecord::from(error));
        }
        self.terminate(Transition::Fail, records)?;
        Ok(self.result())
    }

    /// Runs analyze, the enabled stages and complete
    ///
    /// Never returns an error: stage failures end up in the result's
    /// `errors`. Running a workflow that has already terminated returns its
    /// existing result.
    pub fn run(&mut self, options: RunOptions) -> EdiResult {
        if let Err(err) = self.run_stages(options) {
            if self.is_active() {
                // the workflow didn't fail itself, e.g. a stage was out of order
                let _ = self.fail(WORKFLOW_ERROR_MESSAGE, Some(&err));
            } else {
                tracing::debug!(parent: &self.span, error = %err, "Workflow run stopped");
            }
        }

        let result = self.result();
        self.span.in_scope(|| result.log_summary());
        result
    }

    /// Snapshot of the workflow as a result document
    pub fn result(&self) -> EdiResult {
        EdiResult {
            metadata: self.metadata.clone(),
            metrics: self.metrics.clone(),
            errors: self.errors.clone(),
            operations: self.operations.clone(),
            input_message: self
                .include_input_message
                .then(|| self.message.to_display_string().into_owned()),
        }
    }

    fn run_stages(&mut self, options: RunOptions) -> Result<()> {
        self.analyze()?;
        if options.enrich {
            self.enrich()?;
        }
        if options.validate {
            self.validate()?;
        }
        if options.translate {
            self.translate()?;
        }
        self.complete()?;
        Ok(())
    }

    fn require_metadata(&self) -> Result<&EdiMessageMetadata> {
        self.metadata
            .as_ref()
            .ok_or_else(|| EdiError::Other("Workflow has no message metadata".to_string()))
    }

    fn run_stage<T>(
        &mut self,
        stage: Stage,
        transition: Transition,
        f: impl FnOnce(&Self) -> Result<T>,
    ) -> Result<T> {
        let next = next_state(self.state, transition)?;
        let span = self.span.clone();
        let _entered = span.enter();

        let (outcome, elapsed) = timed(|| f(self));
        self.metrics.record(stage, elapsed);

        match outcome {
            Ok(value) => {
                self.state = next;
                self.operations.push(transition.operation());
                log_stage_complete!(stage.as_str(), elapsed);
                Ok(value)
            }
            Err(err) => {
                log_error_with_context!(&err, stage.as_str());
                self.terminate(
                    Transition::Fail,
                    vec![ErrorRecord::workflow(WORKFLOW_ERROR_MESSAGE), ErrorRecord::from(&err)],
                )?;
                Err(err)
            }
        }
    }

    fn terminate(&mut self, transition: Transition, records: Vec<ErrorRecord>) -> Result<()> {
        let next = next_state(self.state, transition)?;
        self.errors.extend(records);
        self.operations.push(transition.operation());
        self.state = next;

        tracing::debug!(
            parent: &self.span,
            transition = transition.as_str(),
            state = next.as_str(),
            "Workflow terminated"
        );
        Ok(())
    }
}

impl std::fmt::Debug for EdiWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdiWorkflow")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("operations", &self.operations)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

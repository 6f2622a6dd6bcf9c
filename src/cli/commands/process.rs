//! Process command implementation
//!
//! Runs the full workflow over one or more message files and prints one JSON
//! result per file, in argument order. Files are processed concurrently on
//! the blocking pool, each by its own workflow.

use crate::config::{EdiConfig, WorkflowConfig};
use crate::core::workflow::{EdiWorkflow, RunOptions};
use crate::domain::{load_message_from_file, EdiError, EdiResult};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Message files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Skip the enrich stage
    #[arg(long)]
    pub no_enrich: bool,

    /// Skip the validate stage
    #[arg(long)]
    pub no_validate: bool,

    /// Skip the translate stage
    #[arg(long)]
    pub no_translate: bool,

    /// Echo the input message in each result
    #[arg(long)]
    pub include_input: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ProcessArgs {
    /// Stage flags from configuration, narrowed by the `--no-*` flags
    pub fn run_options(&self, config: &WorkflowConfig) -> RunOptions {
        RunOptions {
            enrich: config.enrich && !self.no_enrich,
            validate: config.validate && !self.no_validate,
            translate: config.translate && !self.no_translate,
        }
    }

    /// Execute the process command
    pub async fn execute(&self, config: &EdiConfig) -> anyhow::Result<i32> {
        let options = self.run_options(&config.workflow);
        let include_input = self.include_input || config.workflow.include_input_message;
        let sample_size = config.workflow.utf8_sample_size;

        tracing::info!(files = self.files.len(), ?options, "Processing EDI messages");

        let handles: Vec<_> = self
            .files
            .iter()
            .cloned()
            .map(|path| {
                tokio::task::spawn_blocking(move || {
                    process_file(&path, sample_size, options, include_input)
                })
            })
            .collect();

        let mut exit_code = 0;
        for (path, handle) in self.files.iter().zip(handles) {
            let code = match handle.await? {
                Ok(result) => {
                    let json = if self.pretty {
                        serde_json::to_string_pretty(&result)?
                    } else {
                        serde_json::to_string(&result)?
                    };
                    println!("{json}");
                    if result.is_successful() {
                        0
                    } else {
                        1
                    }
                }
                Err(e) => {
                    crate::log_error_with_context!(&e, "Failed to load message file");
                    eprintln!("❌ {}: {}", path.display(), e);
                    3
                }
            };
            exit_code = exit_code.max(code);
        }

        Ok(exit_code)
    }
}

/// Loads a message file and runs it through a new workflow
///
/// # Errors
///
/// Returns `EdiError::Io` if the file cannot be read. Workflow failures are
/// reported inside the returned result.
pub fn process_file(
    path: &Path,
    sample_size: usize,
    options: RunOptions,
    include_input: bool,
) -> Result<EdiResult, EdiError> {
    let message = load_message_from_file(path, sample_size)?;
    let mut workflow = EdiWorkflow::new(message).include_input_message(include_input);

    tracing::debug!(
        workflow_id = %workflow.id(),
        path = %path.display(),
        "Starting workflow"
    );
    Ok(workflow.run(options))
}

//! Analyze command implementation
//!
//! Prints the metadata of a single message file without running the rest of
//! the workflow.

use crate::config::EdiConfig;
use crate::core::analysis::analyze;
use crate::domain::load_message_from_file;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Message file to analyze
    pub file: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config: &EdiConfig) -> anyhow::Result<i32> {
        let message = match load_message_from_file(&self.file, config.workflow.utf8_sample_size) {
            Ok(message) => message,
            Err(e) => {
                eprintln!("❌ {}: {}", self.file.display(), e);
                return Ok(3);
            }
        };

        match analyze(&message) {
            Ok(metadata) => {
                let json = if self.pretty {
                    serde_json::to_string_pretty(&metadata)?
                } else {
                    serde_json::to_string(&metadata)?
                };
                println!("{json}");
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Message analysis failed");
                eprintln!("❌ {}: {}", self.file.display(), e);
                Ok(if e.is_input_error() { 1 } else { 5 })
            }
        }
    }
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a default
//! configuration file.

use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "edi.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        if self.output.exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output.display());
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output.display());
                println!("  2. Validate configuration: edi validate-config");
                println!("  3. Process messages: edi process <FILES>...");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Default configuration with comments
    pub fn generate_config() -> String {
        r#"# EDI Configuration File
# Message analysis and processing for HL7v2, X12, FHIR and DICOM

[application]
log_level = "info"  # trace | debug | info | warn | error

[workflow]
# Stages run by `edi process`; analyze always runs
enrich = true
validate = true
translate = true

# Echo the input message in each result (binary content is base64 encoded)
include_input_message = false

# Bytes sampled when deciding whether a file is text or binary
utf8_sample_size = 1024

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

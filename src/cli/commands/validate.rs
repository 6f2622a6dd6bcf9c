//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the EDI configuration file.

use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &Path) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path.display(), "Validating configuration");

        println!("🔍 Validating configuration file: {}", config_path.display());
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Enrich: {}", config.workflow.enrich);
        println!("  Validate: {}", config.workflow.validate);
        println!("  Translate: {}", config.workflow.translate);
        println!(
            "  Include Input Message: {}",
            config.workflow.include_input_message
        );
        println!("  UTF-8 Sample Size: {}", config.workflow.utf8_sample_size);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({:?} rotation)",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  Log Files: disabled");
        }
        println!();
        Ok(0)
    }
}

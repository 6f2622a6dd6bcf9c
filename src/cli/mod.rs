//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for EDI processing using
//! clap.
//!
//! Exit codes: 0 success, 1 a result carries errors, 2 configuration error,
//! 3 input file error, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration file used by `validate-config` when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "edi.toml";

/// EDI - HL7v2, X12, FHIR and DICOM message processing
#[derive(Parser, Debug)]
#[command(name = "edi")]
#[command(version, about, long_about = None)]
#[command(author = "EDI Contributors")]
pub struct Cli {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, env = "EDI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDI_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file given on the command line, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the EDI workflow over message files
    Process(commands::process::ProcessArgs),

    /// Print the metadata of a message file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

// EDI - HL7v2, X12, FHIR and DICOM message processing
// Copyright (c) 2025 EDI Contributors
// Licensed under the MIT License

use clap::Parser;
use edi::cli::{Cli, Commands, DEFAULT_CONFIG_FILE};
use edi::config::{load_config_or_default, EdiConfig, LoggingConfig};
use edi::domain::Result;
use edi::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = load_config_or_default(cli.config_path());

    // Fall back to console-only logging when the configuration is unusable;
    // the command reports the configuration error itself
    let (log_level, logging_config) = match &loaded {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "EDI message processing");

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, loaded: Result<EdiConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Process(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(report_config_error(&e)),
        },
        Commands::Analyze(args) => match loaded {
            Ok(config) => args.execute(&config).await,
            Err(e) => Ok(report_config_error(&e)),
        },
        Commands::ValidateConfig(args) => {
            let path = cli
                .config_path()
                .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
            args.execute(path).await
        }
        Commands::Init(args) => args.execute().await,
    }
}

fn report_config_error(error: &edi::domain::EdiError) -> i32 {
    edi::log_error_with_context!(error, "Failed to load configuration");
    eprintln!("❌ {error}");
    2
}

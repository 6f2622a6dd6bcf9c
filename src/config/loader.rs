//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EdiConfig;
use crate::domain::{EdiError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EdiConfig
/// 4. Applies environment variable overrides (EDI_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `EdiError::Configuration` if the file cannot be read, a referenced
/// variable is unset, the TOML is invalid, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use edi::config::loader::load_config;
///
/// let config = load_config("edi.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EdiConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EdiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EdiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<EdiConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: EdiConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if given, otherwise the defaults
///
/// Environment overrides apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<EdiConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = EdiConfig::default();
            apply_env_overrides(&mut config)?;
            validate(&config)?;
            Ok(config)
        }
    }
}

fn validate(config: &EdiConfig) -> Result<()> {
    config.validate().map_err(|e| {
        EdiError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EdiError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing_vars: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            re.replace_all(line, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                })
            })
            .into_owned()
        })
        .collect();

    if !missing_vars.is_empty() {
        return Err(EdiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        EdiError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Applies environment variable overrides using the EDI_* prefix
///
/// Variables follow the pattern EDI_<SECTION>_<KEY>, for example
/// EDI_WORKFLOW_VALIDATE or EDI_LOGGING_LOCAL_PATH.
fn apply_env_overrides(config: &mut EdiConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("EDI_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Workflow overrides
    if let Some(val) = var("EDI_WORKFLOW_ENRICH") {
        config.workflow.enrich = parse_override("EDI_WORKFLOW_ENRICH", &val)?;
    }
    if let Some(val) = var("EDI_WORKFLOW_VALIDATE") {
        config.workflow.validate = parse_override("EDI_WORKFLOW_VALIDATE", &val)?;
    }
    if let Some(val) = var("EDI_WORKFLOW_TRANSLATE") {
        config.workflow.translate = parse_override("EDI_WORKFLOW_TRANSLATE", &val)?;
    }
    if let Some(val) = var("EDI_WORKFLOW_INCLUDE_INPUT_MESSAGE") {
        config.workflow.include_input_message =
            parse_override("EDI_WORKFLOW_INCLUDE_INPUT_MESSAGE", &val)?;
    }
    if let Some(val) = var("EDI_WORKFLOW_UTF8_SAMPLE_SIZE") {
        config.workflow.utf8_sample_size = parse_override("EDI_WORKFLOW_UTF8_SAMPLE_SIZE", &val)?;
    }

    // Logging overrides
    if let Some(val) = var("EDI_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("EDI_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("EDI_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("EDI_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = parse_override("EDI_LOGGING_LOCAL_ROTATION", &val)?;
    }

    Ok(())
}

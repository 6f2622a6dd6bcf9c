//! Configuration schema types

use serde::{Deserialize, Serialize};

/// Main EDI configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; the defaults form a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdiConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Workflow defaults
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EdiConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.workflow.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Run the enrich stage
    #[serde(default = "default_true")]
    pub enrich: bool,

    /// Run the validate stage
    #[serde(default = "default_true")]
    pub validate: bool,

    /// Run the translate stage
    #[serde(default = "default_true")]
    pub translate: bool,

    /// Echo the input message in each result
    #[serde(default)]
    pub include_input_message: bool,

    /// Bytes sampled when deciding whether a file is text or binary
    #[serde(default = "default_utf8_sample_size")]
    pub utf8_sample_size: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            enrich: true,
            validate: true,
            translate: true,
            include_input_message: false,
            utf8_sample_size: default_utf8_sample_size(),
        }
    }
}

impl WorkflowConfig {
    fn validate(&self) -> Result<(), String> {
        if self.utf8_sample_size == 0 {
            return Err("workflow.utf8_sample_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl std::str::FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(LogRotation::Daily),
            "hourly" => Ok(LogRotation::Hourly),
            "never" => Ok(LogRotation::Never),
            _ => Err(format!(
                "Invalid local_rotation '{s}'. Must be one of: daily, hourly, never"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON log files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log file rotation
    #[serde(default)]
    pub local_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: LogRotation::Daily,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled is true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_utf8_sample_size() -> usize {
    crate::domain::DEFAULT_UTF8_SAMPLE_SIZE
}

fn default_local_path() -> String {
    "./logs".to_string()
}

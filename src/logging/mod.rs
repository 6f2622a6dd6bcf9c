//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output at a configurable level
//! - Optional JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use edi::logging::init_logging;
//! use edi::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a workflow stage
///
/// # Example
///
/// ```no_run
/// use edi::log_stage_complete;
/// use std::time::Duration;
///
/// log_stage_complete!("analyze", Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $elapsed:expr) => {
        tracing::debug!(
            stage = $stage,
            elapsed_secs = $elapsed.as_secs_f64(),
            "Workflow stage completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use edi::log_error_with_context;
/// use edi::domain::EdiError;
///
/// let error = EdiError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = %$error.kind(),
            context = $context,
            "Error occurred"
        );
    };
}

//! Configuration management for EDI processing.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `EDI_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use edi::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("edi.toml")?;
//! println!("Validate stage enabled: {}", config.workflow.validate);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`WorkflowConfig`] - Default stage flags, result echo, text sample size
//! - [`LoggingConfig`] - JSON log files and rotation
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [workflow]
//! enrich = true
//! validate = true
//! translate = false
//! include_input_message = false
//! utf8_sample_size = 1024
//!
//! [logging]
//! local_enabled = true
//! local_path = "${EDI_LOG_DIR}"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, EdiConfig, LogRotation, LoggingConfig, WorkflowConfig};

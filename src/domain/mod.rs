//! Domain models and types for EDI processing.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input messages** ([`InputMessage`]) as text or binary content
//! - **Formats and metadata** ([`BaseMessageFormat`], [`EdiMessageFormat`], [`EdiMessageMetadata`])
//! - **Metrics** ([`EdiProcessingMetrics`]) with a derived total
//! - **Results** ([`EdiResult`], [`ErrorRecord`], [`EdiOperation`])
//! - **Error types** ([`EdiError`], [`ErrorKind`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EdiError>`]:
//!
//! ```rust
//! use edi::domain::{EdiError, Result};
//!
//! fn example() -> Result<()> {
//!     let metadata = edi::core::analysis::analyze(&"MSH|^~\\&|A|B|C|D|202401010000||ADT^A01|1|P|2.6".into())?;
//!     assert_eq!(metadata.specification_version.as_deref(), Some("2.6"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod message;
pub mod metadata;
pub mod metrics;
pub mod processing;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{EdiError, ErrorKind};
pub use message::{load_message_from_file, InputMessage, DEFAULT_UTF8_SAMPLE_SIZE};
pub use metadata::{BaseMessageFormat, EdiMessageFormat, EdiMessageMetadata};
pub use metrics::{EdiProcessingMetrics, Stage};
pub use processing::{EdiOperation, EdiResult, ErrorRecord};
pub use result::Result;

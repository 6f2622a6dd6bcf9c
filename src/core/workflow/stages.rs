//! Enrich and translate extension points
//!
//! Both stages are pluggable per workflow. The defaults leave the message
//! untouched.

use crate::domain::{EdiMessageMetadata, InputMessage, Result};

/// Adds data to a message after analysis
///
/// Like [`Translator`], an enricher rejects unsupported messages with
/// `EdiError::Unsupported`.
pub trait Enricher: Send + Sync {
    fn enrich(&self, message: &InputMessage, metadata: &EdiMessageMetadata) -> Result<()>;
}

/// Converts a message to another representation
///
/// Messages a translator can't handle are rejected with
/// `EdiError::Unsupported`, which fails the workflow as an input error.
pub trait Translator: Send + Sync {
    fn translate(&self, message: &InputMessage, metadata: &EdiMessageMetadata) -> Result<()>;
}

/// Enricher that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

impl Enricher for NoopEnricher {
    fn enrich(&self, _message: &InputMessage, _metadata: &EdiMessageMetadata) -> Result<()> {
        Ok(())
    }
}

/// Translator that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, _message: &InputMessage, _metadata: &EdiMessageMetadata) -> Result<()> {
        Ok(())
    }
}

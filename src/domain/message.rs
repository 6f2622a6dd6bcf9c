//! Input message model
//!
//! An EDI message is either UTF-8 text (HL7, X12, FHIR) or an opaque byte
//! buffer (DICOM). The distinction is made once, when the message is loaded,
//! and never changes for the lifetime of a workflow.

use crate::domain::{EdiError, Result};
use base64::Engine;
use std::borrow::Cow;
use std::path::Path;

/// Default number of leading bytes sampled when deciding text vs binary
pub const DEFAULT_UTF8_SAMPLE_SIZE: usize = 1024;

/// Raw EDI message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// UTF-8 text content
    Text(String),
    /// Binary content that is not valid UTF-8
    Binary(Vec<u8>),
}

impl InputMessage {
    /// Classifies raw bytes as text or binary
    ///
    /// The first `sample_size` bytes are decoded as UTF-8. A code point cut in
    /// half by the sample boundary doesn't disqualify the sample. Content is
    /// text only if both the sample and the full buffer decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use edi::domain::InputMessage;
    ///
    /// let text = InputMessage::from_bytes(b"MSH|^~\\&|".to_vec(), 1024);
    /// assert!(text.is_text());
    ///
    /// let binary = InputMessage::from_bytes(vec![0xff, 0xfe, 0x00, 0x01], 1024);
    /// assert!(!binary.is_text());
    /// ```
    pub fn from_bytes(bytes: Vec<u8>, sample_size: usize) -> Self {
        let sample = &bytes[..bytes.len().min(sample_size)];
        let sample_is_text = match std::str::from_utf8(sample) {
            Ok(_) => true,
            // error_len() == None means the sample ends mid code point
            Err(e) => e.error_len().is_none(),
        };

        if !sample_is_text {
            return InputMessage::Binary(bytes);
        }

        match String::from_utf8(bytes) {
            Ok(text) => InputMessage::Text(text),
            Err(e) => InputMessage::Binary(e.into_bytes()),
        }
    }

    /// Returns true if the message is text
    pub fn is_text(&self) -> bool {
        matches!(self, InputMessage::Text(_))
    }

    /// Returns the text content, if the message is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InputMessage::Text(text) => Some(text.as_str()),
            InputMessage::Binary(_) => None,
        }
    }

    /// Returns the raw bytes (UTF-8 encoded for text)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InputMessage::Text(text) => text.as_bytes(),
            InputMessage::Binary(bytes) => bytes,
        }
    }

    /// Returns the size in bytes, never the character count
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the message has no content
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the message for inclusion in a result document
    ///
    /// Text is returned verbatim; binary content is base64 encoded.
    pub fn to_display_string(&self) -> Cow<'_, str> {
        match self {
            InputMessage::Text(text) => Cow::Borrowed(text),
            InputMessage::Binary(bytes) => {
                Cow::Owned(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
        }
    }
}

impl From<String> for InputMessage {
    fn from(text: String) -> Self {
        InputMessage::Text(text)
    }
}

impl From<&str> for InputMessage {
    fn from(text: &str) -> Self {
        InputMessage::Text(text.to_string())
    }
}

impl From<Vec<u8>> for InputMessage {
    fn from(bytes: Vec<u8>) -> Self {
        InputMessage::from_bytes(bytes, DEFAULT_UTF8_SAMPLE_SIZE)
    }
}

/// Loads an EDI message from disk, classifying it as text or binary
///
/// # Errors
///
/// Returns `EdiError::Io` if the file cannot be read.
pub fn load_message_from_file(path: impl AsRef<Path>, sample_size: usize) -> Result<InputMessage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| EdiError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "Loaded message file");
    Ok(InputMessage::from_bytes(bytes, sample_size))
}

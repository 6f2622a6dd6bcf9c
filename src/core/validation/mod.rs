//! Format loaders for the validate stage
//!
//! The validate stage loads a message into a format-specific [`DataModel`]
//! through a [`LoaderRegistry`], a dispatch table keyed by
//! [`EdiMessageFormat`]. Registries are read-only once built and are shared
//! between workflows behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use edi::core::validation::{default_registry, DataModel};
//! use edi::domain::{EdiMessageFormat, InputMessage};
//!
//! let registry = default_registry();
//! let message = InputMessage::from(r#"{"resourceType":"Patient"}"#);
//! let model = registry.load(EdiMessageFormat::Fhir, &message).unwrap();
//! assert!(matches!(model, DataModel::Fhir(_)));
//! ```

pub mod dicom;
pub mod fhir;
pub mod hl7;
pub mod x12;

use crate::domain::{EdiError, EdiMessageFormat, InputMessage, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

pub use dicom::DicomModel;
pub use fhir::FhirModel;
pub use hl7::Hl7Model;
pub use x12::X12Model;

/// A message loaded into its format-specific model
#[derive(Debug, Clone, PartialEq)]
pub enum DataModel {
    Hl7(Hl7Model),
    X12(X12Model),
    Fhir(FhirModel),
    Dicom(DicomModel),
}

impl DataModel {
    pub fn format(&self) -> EdiMessageFormat {
        match self {
            DataModel::Hl7(_) => EdiMessageFormat::Hl7,
            DataModel::X12(_) => EdiMessageFormat::X12,
            DataModel::Fhir(_) => EdiMessageFormat::Fhir,
            DataModel::Dicom(_) => EdiMessageFormat::Dicom,
        }
    }
}

/// Loads a message into a [`DataModel`]
pub type LoaderFn = fn(&InputMessage) -> Result<DataModel>;

fn text<'a>(message: &'a InputMessage, format: EdiMessageFormat) -> Result<&'a str> {
    message.as_text().ok_or_else(|| {
        EdiError::Validation(format!("{format} loader requires a text message"))
    })
}

/// Loads an HL7 v2 message
pub fn load_hl7(message: &InputMessage) -> Result<DataModel> {
    hl7::load(text(message, EdiMessageFormat::Hl7)?).map(DataModel::Hl7)
}

/// Loads an X12 interchange
pub fn load_x12(message: &InputMessage) -> Result<DataModel> {
    x12::load(text(message, EdiMessageFormat::X12)?).map(DataModel::X12)
}

/// Loads a FHIR JSON or XML resource
pub fn load_fhir(message: &InputMessage) -> Result<DataModel> {
    fhir::load(message).map(DataModel::Fhir)
}

/// Loads the file-meta group of a DICOM file
pub fn load_dicom(message: &InputMessage) -> Result<DataModel> {
    dicom::load(message.as_bytes()).map(DataModel::Dicom)
}

/// Dispatch table from message format to loader
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: HashMap<EdiMessageFormat, LoaderFn>,
}

impl LoaderRegistry {
    /// Creates a registry with no loaders
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Registers a loader, returning the one it replaces
    pub fn insert(&mut self, format: EdiMessageFormat, loader: LoaderFn) -> Option<LoaderFn> {
        self.loaders.insert(format, loader)
    }

    pub fn remove(&mut self, format: EdiMessageFormat) -> Option<LoaderFn> {
        self.loaders.remove(&format)
    }

    pub fn contains(&self, format: EdiMessageFormat) -> bool {
        self.loaders.contains_key(&format)
    }

    /// Registered formats, sorted by name
    pub fn formats(&self) -> Vec<EdiMessageFormat> {
        let mut formats: Vec<_> = self.loaders.keys().copied().collect();
        formats.sort_by_key(|f| f.as_str());
        formats
    }

    /// Loads a message with the loader registered for `format`
    ///
    /// # Errors
    ///
    /// Returns `EdiError::DataValidation` if no loader is registered for the
    /// format, or the loader's own error if the message is malformed.
    pub fn load(&self, format: EdiMessageFormat, message: &InputMessage) -> Result<DataModel> {
        let loader = self.loaders.get(&format).ok_or_else(|| {
            EdiError::DataValidation(format!("No loader registered for {format} messages"))
        })?;
        loader(message)
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.insert(EdiMessageFormat::Hl7, load_hl7);
        registry.insert(EdiMessageFormat::X12, load_x12);
        registry.insert(EdiMessageFormat::Fhir, load_fhir);
        registry.insert(EdiMessageFormat::Dicom, load_dicom);
        registry
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

static DEFAULT_REGISTRY: Lazy<Arc<LoaderRegistry>> =
    Lazy::new(|| Arc::new(LoaderRegistry::default()));

/// Process-wide registry with the built-in loaders
pub fn default_registry() -> Arc<LoaderRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

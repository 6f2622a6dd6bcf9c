//! FHIR XML document scanning
//!
//! The scanner reads the root element's namespace-qualified name, the
//! `meta/profile/@value` entries under the root and the number of direct
//! `entry` children. Child elements only match when they share the root's
//! namespace.

use crate::domain::{EdiError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

/// Summary of a scanned XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocumentSummary {
    /// Namespace URI of the root element, if bound
    pub namespace: Option<String>,

    /// Local name of the root element
    pub root_name: String,

    /// `meta/profile/@value` entries in document order
    pub profiles: Vec<String>,

    /// Number of direct `entry` children of the root
    pub entry_count: usize,
}

impl XmlDocumentSummary {
    /// Root tag in `{namespace}local` form
    pub fn qualified_root(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{{{namespace}}}{}", self.root_name),
            None => self.root_name.clone(),
        }
    }

    /// Returns true if the root element is in the FHIR namespace
    pub fn is_fhir(&self) -> bool {
        self.qualified_root()
            .to_ascii_lowercase()
            .contains(super::FHIR_NAMESPACE)
    }
}

#[derive(Default)]
struct ScanState {
    root: Option<(Option<String>, String)>,
    in_meta: bool,
    profiles: Vec<String>,
    entry_count: usize,
}

impl ScanState {
    fn visit(
        &mut self,
        namespace: Option<String>,
        element: &BytesStart<'_>,
        depth: usize,
        is_empty: bool,
    ) -> Result<()> {
        let local_name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

        let root_namespace = match &self.root {
            None => {
                self.root = Some((namespace, local_name));
                return Ok(());
            }
            Some((root_namespace, _)) => root_namespace,
        };

        if depth == 0 {
            return Err(EdiError::DataValidation(
                "XML document has more than one root element".to_string(),
            ));
        }

        if namespace != *root_namespace {
            return Ok(());
        }

        match (depth, local_name.as_str()) {
            (1, "meta") => self.in_meta = !is_empty,
            (1, "entry") => self.entry_count += 1,
            (2, "profile") if self.in_meta => {
                if let Some(value) = attribute_value(element, b"value")? {
                    self.profiles.push(value);
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn attribute_value(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| {
            EdiError::DataValidation(format!("Malformed XML attribute: {e}"))
        })?;
        if attribute.key.local_name().as_ref() == name {
            let value = attribute.unescape_value().map_err(|e| {
                EdiError::DataValidation(format!("Malformed XML attribute value: {e}"))
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(Some(
            String::from_utf8_lossy(namespace.as_ref()).into_owned(),
        )),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(EdiError::DataValidation(format!(
            "Unknown XML namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Scans an XML document
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the document is not well formed,
/// uses an undeclared namespace prefix, or has no root element.
pub fn scan_document(message: &str) -> Result<XmlDocumentSummary> {
    let mut reader = NsReader::from_str(message);
    reader.config_mut().trim_text(true);

    let mut state = ScanState::default();
    let mut depth = 0usize;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(element) => {
                let namespace = resolve_namespace(resolved)?;
                state.visit(namespace, &element, depth, false)?;
                depth += 1;
            }
            Event::Empty(element) => {
                let namespace = resolve_namespace(resolved)?;
                state.visit(namespace, &element, depth, true)?;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    state.in_meta = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(EdiError::DataValidation(
            "XML document ended before the root element was closed".to_string(),
        ));
    }

    let (namespace, root_name) = state.root.ok_or_else(|| {
        EdiError::DataValidation("XML document has no root element".to_string())
    })?;

    Ok(XmlDocumentSummary {
        namespace,
        root_name,
        profiles: state.profiles,
        entry_count: state.entry_count,
    })
}

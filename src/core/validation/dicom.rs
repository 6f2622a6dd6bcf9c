//! DICOM file-meta loader
//!
//! Reads the group 0002 elements that follow the `DICM` marker. The file-meta
//! group is always explicit VR little endian, whatever transfer syntax the
//! dataset uses.

use crate::core::analysis::dicom::{has_dicom_marker, DICOM_MARKER, PREAMBLE_LENGTH};
use crate::domain::{EdiError, Result};

const FILE_META_GROUP: u16 = 0x0002;
const TRANSFER_SYNTAX_UID: u16 = 0x0010;

/// VRs with a 2-byte reserved field and a 4-byte length
const LONG_VRS: [&[u8; 2]; 12] = [
    b"OB", b"OD", b"OF", b"OL", b"OV", b"OW", b"SQ", b"SV", b"UC", b"UN", b"UR", b"UT",
];

/// A file-meta data element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicomElement {
    pub group: u16,
    pub element: u16,
    pub vr: String,
    pub value: Vec<u8>,
}

impl DicomElement {
    /// Value as text with DICOM padding removed
    pub fn text_value(&self) -> String {
        String::from_utf8_lossy(&self.value)
            .trim_end_matches(['\0', ' '])
            .to_string()
    }
}

/// File-meta information of a DICOM Part 10 file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicomModel {
    pub meta_elements: Vec<DicomElement>,
}

impl DicomModel {
    /// Transfer Syntax UID (0002,0010), if present
    pub fn transfer_syntax(&self) -> Option<String> {
        self.meta_elements
            .iter()
            .find(|e| e.group == FILE_META_GROUP && e.element == TRANSFER_SYNTAX_UID)
            .map(DicomElement::text_value)
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(len).filter(|end| *end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.offset..end];
                self.offset = end;
                Ok(slice)
            }
            None => Err(EdiError::DataValidation(format!(
                "DICOM file meta information is truncated at offset {}",
                self.offset
            ))),
        }
    }

    fn u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn peek_group(&self) -> Option<u16> {
        self.bytes
            .get(self.offset..self.offset + 2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_element(&mut self) -> Result<DicomElement> {
        let group = self.u16()?;
        let element = self.u16()?;
        let vr = self.take(2)?;

        let length = if LONG_VRS.iter().any(|long| long.as_slice() == vr) {
            self.take(2)?;
            self.u32()?
        } else {
            u32::from(self.u16()?)
        };

        if length == u32::MAX {
            return Err(EdiError::DataValidation(format!(
                "DICOM file meta element ({group:04X},{element:04X}) has undefined length"
            )));
        }

        let value = self.take(length as usize)?.to_vec();
        Ok(DicomElement {
            group,
            element,
            vr: String::from_utf8_lossy(vr).into_owned(),
            value,
        })
    }
}

/// Loads the file-meta group of a DICOM file
///
/// # Errors
///
/// Returns `EdiError::DataValidation` if the marker is missing, the group is
/// empty, or an element is truncated.
pub fn load(bytes: &[u8]) -> Result<DicomModel> {
    if !has_dicom_marker(bytes) {
        return Err(EdiError::DataValidation(
            "DICOM file is missing the DICM marker".to_string(),
        ));
    }

    let mut cursor = Cursor {
        bytes,
        offset: PREAMBLE_LENGTH + DICOM_MARKER.len(),
    };

    let mut meta_elements = Vec::new();
    while cursor.peek_group() == Some(FILE_META_GROUP) {
        meta_elements.push(cursor.read_element()?);
    }

    if meta_elements.is_empty() {
        return Err(EdiError::DataValidation(
            "DICOM file has no file meta information".to_string(),
        ));
    }

    Ok(DicomModel { meta_elements })
}

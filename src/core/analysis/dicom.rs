//! DICOM signature detection

/// Length of the DICOM file preamble
pub const PREAMBLE_LENGTH: usize = 128;

/// Marker that follows the preamble in a DICOM Part 10 file
pub const DICOM_MARKER: &[u8; 4] = b"DICM";

/// Returns true if the `DICM` marker sits at offset 128
pub fn has_dicom_marker(bytes: &[u8]) -> bool {
    bytes.get(PREAMBLE_LENGTH..PREAMBLE_LENGTH + DICOM_MARKER.len())
        == Some(DICOM_MARKER.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_at_offset() {
        let mut bytes = vec![0u8; PREAMBLE_LENGTH];
        bytes.extend_from_slice(DICOM_MARKER);
        assert!(has_dicom_marker(&bytes));
    }

    #[test]
    fn test_marker_elsewhere() {
        let mut bytes = b"DICM".to_vec();
        bytes.extend_from_slice(&[0u8; 200]);
        assert!(!has_dicom_marker(&bytes));
    }

    #[test]
    fn test_short_buffer() {
        assert!(!has_dicom_marker(&[0u8; 130]));
    }
}

//! Message checksums
//!
//! Checksums are content-addressed: they cover the raw message bytes (UTF-8
//! encoded for text) and don't depend on the detected format.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use edi::core::analysis::checksum::create_checksum;
///
/// let checksum = create_checksum(b"ISA*00*");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn create_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

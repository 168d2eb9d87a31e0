//! CRC32 (IEEE) checksums for columnar files
//!
//! Any mismatch is corruption.

use crc32fast::Hasher;

/// CRC32 over `data`
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

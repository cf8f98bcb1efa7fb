use sha2::{Digest, Sha256};

/// SHA-256 of a byte slice as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Leading `len` characters of a hex digest, for display.
pub fn short(digest: &str, len: usize) -> &str {
    &digest[..digest.len().min(len)]
}

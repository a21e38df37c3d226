use sha2::{Digest, Sha256};

/// Compute SHA-256 of an in-memory byte slice.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a raw 32-byte hash as a lowercase hex string (64 chars).
pub fn to_hex(hash: &[u8; 32]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Content key over both face images, used to flag re-scans of the same
/// card. Each buffer is length-prefixed so shuffling bytes across the
/// front/back boundary changes the key.
pub fn scan_key(front: &[u8], back: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((front.len() as u64).to_le_bytes());
    hasher.update(front);
    hasher.update((back.len() as u64).to_le_bytes());
    hasher.update(back);
    to_hex(&hasher.finalize().into())
}

use crate::constants::HASH_SIZE;
use crate::error::CoreError;
use sha2::{Digest, Sha256};

pub type Hash = [u8; HASH_SIZE];

/// SHA-256 of `bytes`. Pure; the only digest used anywhere in the crate.
pub fn digest(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&digest[..]);
    out
}

/// Convert a byte slice into a digest, rejecting any length other than
/// [`HASH_SIZE`].
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash, CoreError> {
    bytes.try_into().map_err(|_| CoreError::InvalidPreviousHash {
        expected: HASH_SIZE,
        got: bytes.len(),
    })
}

/// Decode a hex-encoded digest, e.g. from a persisted or peer-supplied
/// block. Odd length or non-hex characters fail as a hex defect with the
/// raw character count; well-formed hex of the wrong size fails as a
/// length defect.
pub fn decode_hash(hex_str: &str) -> Result<Hash, CoreError> {
    let bytes = hex::decode(hex_str).map_err(|_| CoreError::InvalidHexDigest {
        length: hex_str.len(),
    })?;
    hash_from_slice(&bytes)
}

// Path: crates/jam-crypto/src/hash.rs

//! SHA-256 hashing, the only hash primitive the Reports machinery consumes
//! (work-report digesting, see `jam_types::report::work_report`).

use dcrypt::algorithms::hash::sha2::Sha256 as DcryptSha256;
use dcrypt::algorithms::hash::HashFunction as DcryptHashFunction;
use dcrypt::algorithms::ByteSerializable;
use jam_types::error::CryptoError;

/// Hashes `message` with SHA-256, returning the raw 32-byte digest.
pub fn sha256(message: &[u8]) -> Result<[u8; 32], CryptoError> {
    let digest = DcryptSha256::digest(message).map_err(dcrypt::Error::from)?;
    let bytes = digest.to_bytes();
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| CryptoError::InvalidHashLength {
            expected: 32,
            got: v.len(),
        })
}

/// Hashes `message` with SHA-256, returning 64-char lowercase hex.
pub fn sha256_hex(message: &[u8]) -> Result<String, CryptoError> {
    Ok(hex::encode(sha256(message)?))
}

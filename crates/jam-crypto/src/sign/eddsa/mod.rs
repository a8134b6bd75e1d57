// Path: crates/jam-crypto/src/sign/eddsa/mod.rs
//! Ed25519 sign/verify, the only signing suite the Reports machinery consumes.

use crate::error::CryptoError;
use dcrypt::sign::eddsa;
use rand::rngs::OsRng;

/// An Ed25519 key pair.
#[derive(Clone)]
pub struct Ed25519KeyPair {
    public_key: eddsa::Ed25519PublicKey,
    secret_key: eddsa::Ed25519SecretKey,
}

impl Ed25519KeyPair {
    /// Generates a fresh key pair from the OS RNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = OsRng;
        let (public_key, secret_key) =
            eddsa::Ed25519::keypair(&mut rng).map_err(CryptoError::from)?;
        Ok(Self {
            public_key,
            secret_key,
        })
    }

    /// Derives a key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret_key = eddsa::Ed25519SecretKey::from_seed(seed)
            .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
        let public_key = secret_key
            .public_key()
            .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
        Ok(Self {
            public_key,
            secret_key,
        })
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public_key.to_bytes().to_vec()
    }

    /// Signs `message`, returning the raw signature bytes.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let signature = eddsa::Ed25519::sign(message, &self.secret_key)?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Verifies an Ed25519 signature over `message`.
///
/// This is the concrete backing of the Reports spec's consumed
/// `verify(bytes, signature, publicKey) -> bool` interface.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool, CryptoError> {
    let public_key = eddsa::Ed25519PublicKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
    let signature = eddsa::Ed25519Signature::from_bytes(signature)
        .map_err(|e| CryptoError::InvalidSignature(format!("{e:?}")))?;
    Ok(eddsa::Ed25519::verify(message, &signature, &public_key).is_ok())
}

#[cfg(test)]
mod tests;

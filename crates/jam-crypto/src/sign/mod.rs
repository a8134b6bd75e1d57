// Path: crates/jam-crypto/src/sign/mod.rs

/// Ed25519 signing and verification.
pub mod eddsa;

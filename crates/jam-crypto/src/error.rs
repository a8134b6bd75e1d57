// Path: crates/jam-crypto/src/error.rs
//! Local error type for the `jam-crypto` crate.

// Re-export the canonical error type from the base types crate so callers
// crossing the jam-types/jam-crypto boundary never have to convert between
// two distinct `CryptoError`s.
pub use jam_types::error::CryptoError;

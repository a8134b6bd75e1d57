// Path: crates/jam-crypto/src/lib.rs
//! # jam-crypto lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # jam-crypto
//!
//! The two primitives the Reports spec's `Consumed` interfaces name:
//! Ed25519 sign/verify ([`sign::eddsa`]) and SHA-256 ([`hash`]).

/// Local error type (re-exported from `jam-types`).
pub mod error;
/// SHA-256 hashing.
pub mod hash;
/// Signature schemes.
pub mod sign;

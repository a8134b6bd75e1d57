// Path: crates/jam-types/src/keys/mod.rs

//! Well-known top-level keys used when hydrating or snapshotting an
//! `OnchainState` to/from the plain-data test-vector format described in
//! the external interfaces (`pre_state` / `post_state` / `input`).

/// Top-level key for the pending-reports bucket (ρ).
pub const KEY_RHO: &str = "rho";
/// Top-level key for the accumulation-queue bucket (ω).
pub const KEY_OMEGA: &str = "omega";
/// Top-level key for the finalized-history bucket (ξ).
pub const KEY_XI: &str = "xi";
/// Top-level key for the bad-reports bucket (ψ_B).
pub const KEY_PSI_B: &str = "psi_b";
/// Top-level key for the offender ledger (ψ_O).
pub const KEY_PSI_O: &str = "psi_o";
/// Top-level key for the conceptual global state.
pub const KEY_GLOBAL_STATE: &str = "global_state";

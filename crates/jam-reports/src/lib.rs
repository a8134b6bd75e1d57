// Path: crates/jam-reports/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # jam-reports
//!
//! The work-report lifecycle state machine: guarantor endorsement
//! aggregation to super-majority, dependency-ordered accumulation, and
//! dispute/offender bookkeeping across the five `OnchainState` buckets
//! (ρ, ω, ξ, ψ_B, ψ_O).
//!
//! Processors are applied in the canonical per-block order: Guarantees,
//! then Assurances, then Disputes, then one Accumulation sweep. Each runs to
//! completion against a single [`state::OnchainState`] instance; there is no
//! suspension point inside a processor (§5).

/// One sweep of the Accumulation Processor.
pub mod accumulation;
/// The Assurance Processor: ordering hook, currently a no-op.
pub mod assurance;
/// The Dispute Processor.
pub mod dispute;
/// The Guarantee Processor: thirteen ordered validation checks plus
/// endorsement merge/promotion.
pub mod guarantee;
/// The external `Ψ_A` execution interface.
pub mod pvm;
/// `OnchainState` and its five buckets.
pub mod state;

pub use accumulation::process_accumulation_queue;
pub use assurance::{process_assurance_extrinsic, Assurance};
pub use dispute::{process_dispute_extrinsic, Dispute};
pub use guarantee::process_guarantee_extrinsic;
pub use pvm::{NoopPvmExecutor, PvmExecutor};
pub use state::{OmegaEntry, OmegaStatus, OnchainState, PsiBEntry, PsiOEntry, RhoEntry};

#[cfg(test)]
mod tests {
    #[test]
    fn test_reports_canary() {}
}

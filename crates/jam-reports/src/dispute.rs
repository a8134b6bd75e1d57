// Path: crates/jam-reports/src/dispute.rs

//! The Dispute Processor: locates a digest across ρ/ω/ξ, removes it from
//! whichever of ρ or ω holds it (ξ is immutable once finalized), merges the
//! dispute into ψ_B and charges the offending guarantor.

use crate::state::OnchainState;
use jam_types::config::{DisputeMissingTargetPolicy, ReportsConfig};
use jam_types::error::ProtocolError;
use jam_types::{WorkDigest, WorkReport};
use tracing::warn;

/// A `Dispute` extrinsic.
#[derive(Debug, Clone)]
pub struct Dispute {
    /// Digest of the report being disputed.
    pub disputed_digest_hash: WorkDigest,
    /// Identity of the party raising the dispute.
    pub disputer_public_key: String,
    /// Free-form reason text, recorded verbatim on first dispute of a digest.
    pub reason: String,
}

/// Processes a single `Dispute` extrinsic against `state` at `slot`.
///
/// Per §4.3, a digest absent from all of ρ/ω/ξ is tolerated by default
/// (`DisputeMissingTargetPolicy::SilentNoOp`); set
/// `ReportsConfig::dispute_missing_target_policy` to `RaiseTargetMissing` to
/// surface it as a protocol error instead.
pub fn process_dispute_extrinsic(
    dispute: &Dispute,
    state: &mut OnchainState,
    config: &ReportsConfig,
    slot: u64,
) -> Result<(), ProtocolError> {
    let digest = &dispute.disputed_digest_hash;

    let located: Option<WorkReport> = if let Some(entry) = state.rho.remove(digest) {
        Some(entry.report)
    } else if let Some(entry) = state.omega.remove(digest) {
        Some(entry.report)
    } else if let Some(report) = state.xi.get(digest) {
        Some(report.clone())
    } else {
        None
    };

    let report = match located {
        Some(report) => report,
        None => {
            warn!(target: "reports", digest = %digest, "dispute target not found in rho/omega/xi");
            return match config.dispute_missing_target_policy {
                DisputeMissingTargetPolicy::SilentNoOp => Ok(()),
                DisputeMissingTargetPolicy::RaiseTargetMissing => {
                    Err(ProtocolError::DependencyMissing(digest.clone()))
                }
            };
        }
    };

    state.route_to_bad(
        digest.clone(),
        dispute.reason.clone(),
        Some(&dispute.disputer_public_key),
    );
    state.charge_offender(&report.guarantor_public_key, slot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{OmegaEntry, OmegaStatus, RhoEntry};
    use jam_crypto::sign::eddsa::Ed25519KeyPair;
    use jam_types::report::work_package::AuthorizationServiceDetails;
    use jam_types::{RefinementContext, WorkItem, WorkPackage};
    use std::collections::BTreeSet;

    fn sample_report(guarantor: &str) -> WorkReport {
        let item = WorkItem::new("w1", "h1", "payload", 10).expect("item");
        let package = WorkPackage::new(
            "tok",
            AuthorizationServiceDetails {
                host: "host".into(),
                url: "svc-1".into(),
                function: "authorize".into(),
            },
            "ctx",
            vec![item],
        )
        .expect("package");
        WorkReport {
            work_package: package,
            refinement_context: RefinementContext {
                anchor_block_root: "root".into(),
                anchor_block_number: 10,
                beefy_mmr_root: "mmr".into(),
                current_slot: 10,
                current_epoch: 0,
                current_guarantors: vec![guarantor.to_string()],
                previous_guarantors: vec![],
            },
            pvm_output: "ok".into(),
            gas_used: 10,
            availability_spec: None,
            guarantor_signature: "sig".into(),
            guarantor_public_key: guarantor.to_string(),
            core_index: 0,
            slot: 10,
            dependencies: vec![],
        }
    }

    #[test]
    fn dispute_removes_from_rho_and_charges_offender() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = sample_report(&pk);
        let digest = report.digest().expect("digest");
        let mut state = OnchainState::new();
        state.rho.insert(
            digest.clone(),
            RhoEntry {
                report,
                received_signatures: BTreeSet::from([pk.clone()]),
                submission_slot: 5,
            },
        );
        let dispute = Dispute {
            disputed_digest_hash: digest.clone(),
            disputer_public_key: "disputer".into(),
            reason: "bad_output".into(),
        };
        let config = ReportsConfig::default();
        process_dispute_extrinsic(&dispute, &mut state, &config, 20).expect("no error");
        assert!(!state.rho.contains_key(&digest));
        assert!(state.psi_b.get(&digest).expect("routed").disputed_by.contains("disputer"));
        assert_eq!(state.psi_o.get(&pk).expect("charged").dispute_count, 1);
    }

    #[test]
    fn dispute_against_xi_leaves_history_untouched() {
        let report = sample_report("g1");
        let digest = report.digest().expect("digest");
        let mut state = OnchainState::new();
        state.xi.insert(digest.clone(), report);
        let dispute = Dispute {
            disputed_digest_hash: digest.clone(),
            disputer_public_key: "disputer".into(),
            reason: "late".into(),
        };
        let config = ReportsConfig::default();
        process_dispute_extrinsic(&dispute, &mut state, &config, 20).expect("no error");
        assert!(state.xi.contains_key(&digest));
        assert!(state.psi_b.contains_key(&digest));
    }

    #[test]
    fn dispute_against_unknown_digest_is_silent_noop_by_default() {
        let mut state = OnchainState::new();
        let dispute = Dispute {
            disputed_digest_hash: "unknown".into(),
            disputer_public_key: "disputer".into(),
            reason: "x".into(),
        };
        let config = ReportsConfig::default();
        assert!(process_dispute_extrinsic(&dispute, &mut state, &config, 20).is_ok());
        assert!(state.psi_b.is_empty());
    }

    #[test]
    fn dispute_against_omega_removes_from_omega() {
        let report = sample_report("g1");
        let digest = report.digest().expect("digest");
        let mut state = OnchainState::new();
        state.omega.insert(
            digest.clone(),
            OmegaEntry {
                report,
                status: OmegaStatus::Ready,
            },
        );
        let dispute = Dispute {
            disputed_digest_hash: digest.clone(),
            disputer_public_key: "disputer".into(),
            reason: "x".into(),
        };
        let config = ReportsConfig::default();
        process_dispute_extrinsic(&dispute, &mut state, &config, 20).expect("no error");
        assert!(!state.omega.contains_key(&digest));
        assert!(state.psi_b.contains_key(&digest));
    }
}

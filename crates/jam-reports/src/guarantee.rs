// Path: crates/jam-reports/src/guarantee.rs

//! The Guarantee Processor: thirteen ordered validation checks against a
//! submitted `WorkReport`, fail-fast routing to ψ_B on the first mismatch,
//! and the ρ endorsement merge/promotion step on success.

use crate::state::{OnchainState, RhoEntry};
use jam_crypto::sign::eddsa::verify as verify_signature;
use jam_types::config::ReportsConfig;
use jam_types::error::ProtocolError;
use jam_types::prelude::OptionExt;
use jam_types::{WorkDigest, WorkReport};
use tracing::{info, warn};

/// Runs the thirteen checks of §4.2 in fixed order, returning the first
/// failure encountered, or `Ok(())` if the report passes all of them.
fn validate(
    report: &WorkReport,
    state: &OnchainState,
    config: &ReportsConfig,
    current_slot: u64,
    current_block_digests: &[WorkDigest],
) -> Result<(), ProtocolError> {
    // 1. bad_signature
    let signable = report
        .signable()
        .map_err(|_| ProtocolError::BadSignature)?;
    let signature = hex::decode(&report.guarantor_signature).map_err(|_| ProtocolError::BadSignature)?;
    let public_key =
        hex::decode(&report.guarantor_public_key).map_err(|_| ProtocolError::BadSignature)?;
    let verified = verify_signature(&signable, &signature, &public_key).unwrap_or(false);
    if !verified {
        return Err(ProtocolError::BadSignature);
    }

    // 2. anchor_not_recent
    let anchor = report.refinement_context.anchor_block_number;
    let age = current_slot.saturating_sub(anchor);
    if age > config.anchor_max_age_slots {
        return Err(ProtocolError::AnchorNotRecent {
            anchor,
            age,
            max: config.anchor_max_age_slots,
        });
    }

    // 3. bad_service_id
    let service_id = &report.work_package.authorization_service_details.url;
    let registration = state
        .global_state
        .service_registry
        .get(service_id)
        .required(ProtocolError::BadServiceId(service_id.clone()))?;

    // 4. bad_code_hash
    if let Some(expected) = &registration.code_hash {
        let got = report
            .work_package
            .work_items
            .first()
            .map(|item| item.program_hash.clone())
            .unwrap_or_default();
        if &got != expected {
            return Err(ProtocolError::BadCodeHash {
                expected: expected.clone(),
                got,
            });
        }
    }

    // 5. wrong_assignment
    let report_epoch = report.slot / config.report_timeout_slots;
    let context = &report.refinement_context;
    let authorized = if report_epoch == context.current_epoch {
        context
            .current_guarantors
            .contains(&report.guarantor_public_key)
    } else if context.current_epoch > 0 && report_epoch == context.current_epoch - 1 {
        context
            .previous_guarantors
            .contains(&report.guarantor_public_key)
    } else {
        false
    };
    if !authorized {
        return Err(ProtocolError::WrongAssignment(
            report.guarantor_public_key.clone(),
        ));
    }

    // 6. core_engaged
    if state
        .global_state
        .core_status
        .get(&report.core_index)
        .is_some_and(|status| status.is_engaged())
    {
        return Err(ProtocolError::CoreEngaged(report.core_index));
    }

    // 7. future_report_slot
    if report.slot > current_slot {
        return Err(ProtocolError::FutureReportSlot {
            slot: report.slot,
            current: current_slot,
        });
    }

    // 8. report_before_last_rotation
    if current_slot.saturating_sub(report.slot) > config.report_timeout_slots {
        return Err(ProtocolError::ReportBeforeLastRotation {
            slot: report.slot,
            current: current_slot,
        });
    }

    // 9. too_many_dependencies
    if report.dependencies.len() > config.max_dependencies {
        return Err(ProtocolError::TooManyDependencies(report.dependencies.len()));
    }

    // 10. dependency_missing
    for dep in &report.dependencies {
        let known = state.xi.contains_key(dep)
            || state.rho.contains_key(dep)
            || current_block_digests.contains(dep);
        if !known {
            return Err(ProtocolError::DependencyMissing(dep.clone()));
        }
    }

    // 11. too_high_work_report_gas
    if report.gas_used > config.max_work_report_gas {
        return Err(ProtocolError::TooHighWorkReportGas(report.gas_used));
    }

    // 12. service_item_gas_too_low
    for item in &report.work_package.work_items {
        if item.gas_limit < config.min_service_item_gas {
            return Err(ProtocolError::ServiceItemGasTooLow {
                item_id: item.id.clone(),
                gas_limit: item.gas_limit,
            });
        }
    }

    // 13. duplicate_package_in_recent_history
    let digest = report
        .digest()
        .map_err(|_| ProtocolError::BadSignature)?;
    if state.xi.contains_key(&digest) {
        return Err(ProtocolError::DuplicatePackageInRecentHistory);
    }

    Ok(())
}

/// Routes a validation failure per §4.2.1: the report's digest is inserted
/// into ψ_B tagged with the failing check, and the submitting guarantor is
/// charged in ψ_O.
fn route_failure(state: &mut OnchainState, report: &WorkReport, error: &ProtocolError, slot: u64) {
    let digest = report.digest().unwrap_or_else(|_| "unhashable".to_string());
    warn!(target: "reports", digest = %digest, reason = %error.reason(), "guarantee rejected, routed to psi_b");
    state.route_to_bad(digest, error.reason(), Some("system_validation"));
    state.charge_offender(&report.guarantor_public_key, slot);
}

/// Merges a passing report's endorsement into ρ and promotes to ω once the
/// super-majority threshold is reached, per §4.2.2.
///
/// Returns `true` if this call caused a promotion to ω, `false` otherwise
/// (first endorsement recorded, repeat endorsement ignored, or timeout).
fn merge_and_promote(
    state: &mut OnchainState,
    report: &WorkReport,
    config: &ReportsConfig,
    slot: u64,
) -> bool {
    let digest = match report.digest() {
        Ok(d) => d,
        Err(_) => return false,
    };

    match state.rho.get_mut(&digest) {
        None => {
            let mut received_signatures = std::collections::BTreeSet::new();
            received_signatures.insert(report.guarantor_public_key.clone());
            state.rho.insert(
                digest.clone(),
                RhoEntry {
                    report: report.clone(),
                    received_signatures,
                    submission_slot: slot,
                },
            );
        }
        Some(entry) => {
            if entry.received_signatures.contains(&report.guarantor_public_key) {
                return false;
            }
            entry.received_signatures.insert(report.guarantor_public_key.clone());
        }
    }

    let entry = match state.rho.get(&digest) {
        Some(entry) => entry,
        None => return false,
    };

    let n = report.refinement_context.guarantor_count();
    let threshold = jam_types::ceil_div(n, config.super_majority_num, config.super_majority_den);
    if entry.received_signatures.len() as u64 >= threshold {
        let entry = state.rho.remove(&digest).expect("entry present");
        info!(target: "reports", digest = %digest, threshold, "report promoted rho -> omega");
        state.omega.insert(
            digest,
            crate::state::OmegaEntry {
                report: entry.report,
                status: crate::state::OmegaStatus::Ready,
            },
        );
        return true;
    }

    if slot.saturating_sub(entry.submission_slot) > config.report_timeout_slots {
        state.rho.remove(&digest);
        state.route_to_bad(digest, ProtocolError::TimedOut.reason(), Some("system_timeout"));
    }
    false
}

/// Processes a single `Guarantee` extrinsic: validates `report` against
/// `state`, routes it to ψ_B on the first failed check, or merges its
/// endorsement into ρ (promoting to ω on reaching super-majority).
///
/// Returns `true` iff the report caused a promotion to ω on this call.
pub fn process_guarantee_extrinsic(
    report: &WorkReport,
    state: &mut OnchainState,
    config: &ReportsConfig,
    current_slot: u64,
    current_block_digests: &[WorkDigest],
) -> bool {
    if let Err(error) = validate(report, state, config, current_slot, current_block_digests) {
        route_failure(state, report, &error, current_slot);
        return false;
    }
    merge_and_promote(state, report, config, current_slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OnchainState;
    use jam_crypto::sign::eddsa::Ed25519KeyPair;
    use jam_types::report::work_package::AuthorizationServiceDetails;
    use jam_types::{CoreStatus, RefinementContext, ServiceRegistration, WorkItem, WorkPackage};

    /// Builds and signs a `WorkReport` with every field a check in `validate`
    /// inspects exposed as a parameter, so each test can tune exactly the one
    /// field its target check rejects while leaving every earlier check
    /// passing.
    #[allow(clippy::too_many_arguments)]
    fn build_report(
        keypair: &Ed25519KeyPair,
        guarantors: Vec<String>,
        slot: u64,
        anchor: u64,
        epoch: u64,
        dependencies: Vec<String>,
        gas_used: u64,
        core_index: u32,
        item_gas_limit: u64,
        program_hash: &str,
    ) -> WorkReport {
        let item = WorkItem::new("w1", program_hash, "payload", item_gas_limit).expect("item");
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
        let mut report = WorkReport {
            work_package: package,
            refinement_context: RefinementContext {
                anchor_block_root: "root".into(),
                anchor_block_number: anchor,
                beefy_mmr_root: "mmr".into(),
                current_slot: slot,
                current_epoch: epoch,
                current_guarantors: guarantors,
                previous_guarantors: vec![],
            },
            pvm_output: "ok".into(),
            gas_used,
            availability_spec: None,
            guarantor_signature: String::new(),
            guarantor_public_key: hex::encode(keypair.public_key_bytes()),
            core_index,
            slot,
            dependencies,
        };
        let signable = report.signable().expect("signable");
        let signature = keypair.sign(&signable).expect("sign");
        report.guarantor_signature = hex::encode(signature);
        report
    }

    fn signed_report(keypair: &Ed25519KeyPair, guarantors: Vec<String>, slot: u64) -> WorkReport {
        build_report(keypair, guarantors, slot, slot, 0, vec![], 100, 0, 100, "code-hash-1")
    }

    fn base_state(guarantor: &str) -> OnchainState {
        let mut state = OnchainState::new();
        state.global_state.service_registry.insert(
            "svc-1".to_string(),
            ServiceRegistration {
                code_hash: Some("code-hash-1".to_string()),
                owner: guarantor.to_string(),
            },
        );
        state
    }

    #[test]
    fn single_guarantor_promotes_immediately() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk.clone()], 10);
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(promoted);
        assert!(state.omega.contains_key(&report.digest().expect("digest")));
        assert!(state.rho.is_empty());
    }

    #[test]
    fn bad_signature_routes_to_bad_and_charges_offender() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let mut report = signed_report(&keypair, vec![pk.clone()], 10);
        report.guarantor_signature = hex::encode(vec![0u8; 64]);
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.contains_key(&digest));
        assert_eq!(state.psi_o.get(&pk).expect("charged").dispute_count, 1);
    }

    #[test]
    fn anchor_too_old_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk.clone()], 10);
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 1000, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        let entry = state.psi_b.get(&digest).expect("routed");
        assert!(entry.reason.starts_with("anchor_not_recent"));
    }

    #[test]
    fn two_of_three_guarantors_required_for_threshold() {
        let k1 = Ed25519KeyPair::generate().expect("k1");
        let k2 = Ed25519KeyPair::generate().expect("k2");
        let k3 = Ed25519KeyPair::generate().expect("k3");
        let guarantors = vec![
            hex::encode(k1.public_key_bytes()),
            hex::encode(k2.public_key_bytes()),
            hex::encode(k3.public_key_bytes()),
        ];
        let mut state = base_state(&guarantors[0]);
        let config = ReportsConfig::default();

        let r1 = signed_report(&k1, guarantors.clone(), 10);
        assert!(!process_guarantee_extrinsic(&r1, &mut state, &config, 10, &[]));

        let mut r2 = signed_report(&k2, guarantors.clone(), 10);
        // match r1's content so digests coincide, then re-sign as k2
        r2.work_package = r1.work_package.clone();
        let signable = r2.signable().expect("signable");
        r2.guarantor_signature = hex::encode(k2.sign(&signable).expect("sign"));
        let promoted = process_guarantee_extrinsic(&r2, &mut state, &config, 10, &[]);
        assert!(promoted);
    }

    #[test]
    fn repeat_endorsement_from_same_guarantor_is_noop() {
        let k1 = Ed25519KeyPair::generate().expect("k1");
        let k2 = Ed25519KeyPair::generate().expect("k2");
        let guarantors = vec![
            hex::encode(k1.public_key_bytes()),
            hex::encode(k2.public_key_bytes()),
        ];
        let mut state = base_state(&guarantors[0]);
        let config = ReportsConfig::default();
        let r1 = signed_report(&k1, guarantors.clone(), 10);
        process_guarantee_extrinsic(&r1, &mut state, &config, 10, &[]);
        let promoted_again = process_guarantee_extrinsic(&r1, &mut state, &config, 10, &[]);
        assert!(!promoted_again);
        let digest = r1.digest().expect("digest");
        assert_eq!(state.rho.get(&digest).expect("entry").received_signatures.len(), 1);
    }

    #[test]
    fn unknown_service_id_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk], 10);
        // no svc-1 registration at all
        let mut state = OnchainState::new();
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.get(&digest).expect("routed").reason.starts_with("bad_service_id"));
    }

    #[test]
    fn mismatched_code_hash_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk.clone()], 10);
        let mut state = OnchainState::new();
        state.global_state.service_registry.insert(
            "svc-1".to_string(),
            ServiceRegistration {
                code_hash: Some("some-other-hash".to_string()),
                owner: pk,
            },
        );
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.get(&digest).expect("routed").reason.starts_with("bad_code_hash"));
    }

    #[test]
    fn guarantor_not_in_roster_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let report = build_report(
            &keypair,
            vec!["someone-else".to_string()],
            10,
            10,
            0,
            vec![],
            100,
            0,
            100,
            "code-hash-1",
        );
        let pk = hex::encode(keypair.public_key_bytes());
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.get(&digest).expect("routed").reason.starts_with("wrong_assignment"));
    }

    #[test]
    fn engaged_core_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk.clone()], 10);
        let mut state = base_state(&pk);
        state.global_state.core_status.insert(
            0,
            CoreStatus {
                status: jam_types::CoreStatusKind::Engaged,
            },
        );
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.get(&digest).expect("routed").reason.starts_with("core_engaged"));
    }

    #[test]
    fn future_report_slot_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        // report.slot(60) > current_slot(10); anchor kept close to current_slot
        // so the anchor_not_recent check (which runs first) still passes.
        let report = build_report(&keypair, vec![pk.clone()], 60, 60, 0, vec![], 100, 0, 100, "code-hash-1");
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state.psi_b.get(&digest).expect("routed").reason.starts_with("future_report_slot"));
    }

    #[test]
    fn report_before_last_rotation_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        // anchor stays recent relative to current_slot (age 20 <= 50), but the
        // report's own slot is far enough behind current_slot to exceed
        // REPORT_TIMEOUT_SLOTS (100).
        let report = build_report(&keypair, vec![pk.clone()], 50, 480, 0, vec![], 100, 0, 100, "code-hash-1");
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 500, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("report_before_last_rotation"));
    }

    #[test]
    fn too_many_dependencies_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let deps: Vec<String> = (0..11).map(|i| format!("{i:064x}")).collect();
        let report = build_report(&keypair, vec![pk.clone()], 10, 10, 0, deps, 100, 0, 100, "code-hash-1");
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("too_many_dependencies"));
    }

    #[test]
    fn missing_dependency_is_rejected_when_absent_everywhere() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let dep = "a".repeat(64);
        let report = build_report(
            &keypair,
            vec![pk.clone()],
            10,
            10,
            0,
            vec![dep],
            100,
            0,
            100,
            "code-hash-1",
        );
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("dependency_missing"));
    }

    #[test]
    fn dependency_present_via_current_block_digests_is_accepted() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let dep = "b".repeat(64);
        let report = build_report(
            &keypair,
            vec![pk.clone()],
            10,
            10,
            0,
            vec![dep.clone()],
            100,
            0,
            100,
            "code-hash-1",
        );
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted =
            process_guarantee_extrinsic(&report, &mut state, &config, 10, &[dep]);
        assert!(promoted);
        let digest = report.digest().expect("digest");
        assert!(!state.psi_b.contains_key(&digest));
        assert!(state.omega.contains_key(&digest));
    }

    #[test]
    fn gas_used_over_ceiling_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = build_report(
            &keypair,
            vec![pk.clone()],
            10,
            10,
            0,
            vec![],
            200_001,
            0,
            100,
            "code-hash-1",
        );
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("too_high_work_report_gas"));
    }

    #[test]
    fn work_item_gas_limit_below_floor_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = build_report(&keypair, vec![pk.clone()], 10, 10, 0, vec![], 100, 0, 1, "code-hash-1");
        let mut state = base_state(&pk);
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("service_item_gas_too_low"));
    }

    #[test]
    fn duplicate_of_finalized_history_is_rejected() {
        let keypair = Ed25519KeyPair::generate().expect("keypair");
        let pk = hex::encode(keypair.public_key_bytes());
        let report = signed_report(&keypair, vec![pk.clone()], 10);
        let mut state = base_state(&pk);
        state.xi.insert(report.digest().expect("digest"), report.clone());
        let config = ReportsConfig::default();
        let promoted = process_guarantee_extrinsic(&report, &mut state, &config, 10, &[]);
        assert!(!promoted);
        let digest = report.digest().expect("digest");
        assert!(state
            .psi_b
            .get(&digest)
            .expect("routed")
            .reason
            .starts_with("duplicate_package_in_recent_history"));
    }
}

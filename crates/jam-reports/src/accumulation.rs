// Path: crates/jam-reports/src/accumulation.rs

//! The Accumulation Processor: a Kahn's-algorithm topological sort over ω's
//! intra-bucket dependency graph (lexicographic tie-break on digest hex,
//! cycles left `ready` rather than routed to failure), followed by per-report
//! atomic execution through the external `Ψ_A` interface.

use crate::pvm::PvmExecutor;
use crate::state::{OmegaStatus, OnchainState};
use jam_types::WorkDigest;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{info, warn};

/// Computes an execution order for the current keys of ω via Kahn's
/// algorithm: an edge `dep -> d` exists whenever `d`'s report declares `dep`
/// as a dependency and `dep` is itself a key of ω. Ties among zero-in-degree
/// nodes are broken lexicographically by digest hex, giving a deterministic
/// order independent of insertion order.
///
/// Digests left out of the returned order (because they sit on a cycle) are
/// not reported as an error: per §4.5.1 they are left in ω with `ready`
/// status to be retried on a future block.
fn topological_order(state: &OnchainState) -> Vec<WorkDigest> {
    let keys: BTreeSet<&WorkDigest> = state.omega.keys().collect();

    let mut in_degree: BTreeMap<WorkDigest, usize> =
        keys.iter().map(|k| ((*k).clone(), 0)).collect();
    let mut dependents: BTreeMap<WorkDigest, Vec<WorkDigest>> =
        keys.iter().map(|k| ((*k).clone(), Vec::new())).collect();

    for digest in &keys {
        let entry = state.omega.get(*digest).expect("key from omega.keys()");
        for dep in &entry.report.dependencies {
            if keys.contains(dep) {
                if let Some(degree) = in_degree.get_mut(*digest) {
                    *degree += 1;
                }
                dependents.entry(dep.clone()).or_default().push((*digest).clone());
            }
        }
    }

    let mut ready: BTreeSet<WorkDigest> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(digest, _)| digest.clone())
        .collect();

    let mut order = Vec::with_capacity(keys.len());
    let mut queue: VecDeque<WorkDigest> = VecDeque::new();
    while let Some(next) = ready.iter().next().cloned() {
        ready.remove(&next);
        queue.push_back(next);
    }

    while let Some(digest) = queue.pop_front() {
        order.push(digest.clone());
        if let Some(children) = dependents.get(&digest) {
            let mut newly_ready = Vec::new();
            for child in children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        newly_ready.push(child.clone());
                    }
                }
            }
            newly_ready.sort();
            for child in newly_ready {
                queue.push_back(child);
            }
        }
    }

    order
}

/// Executes every work-item in `ω[digest].report.work_package.work_items` in
/// order, merging deltas as it goes. Returns the accumulated delta on full
/// success, or the gas/trap error of the first failing item.
fn execute_report(
    state: &OnchainState,
    digest: &str,
    executor: &dyn PvmExecutor,
) -> Result<jam_types::StateDelta, jam_types::error::PvmExecutionError> {
    let entry = state.omega.get(digest).expect("digest present in omega");
    let mut accumulated = jam_types::StateDelta::empty();
    let mut scratch = state.global_state.apply(&accumulated);
    for item in &entry.report.work_package.work_items {
        let delta = executor.execute(item, &scratch)?;
        scratch = scratch.apply(&delta);
        accumulated = accumulated.merge(delta);
    }
    Ok(accumulated)
}

/// Runs the accumulation sweep once: computes the topological order, then
/// executes each `ready` digest per §4.5.2, committing successful reports to
/// ξ and routing failed ones to ψ_B with the submitting guarantor charged.
pub fn process_accumulation_queue(state: &mut OnchainState, slot: u64, executor: &dyn PvmExecutor) {
    let order = topological_order(state);

    for digest in order {
        let is_ready = state
            .omega
            .get(&digest)
            .map(|entry| entry.status == OmegaStatus::Ready)
            .unwrap_or(false);
        if !is_ready {
            continue;
        }
        if let Some(entry) = state.omega.get_mut(&digest) {
            entry.status = OmegaStatus::Processing;
        }

        match execute_report(state, &digest, executor) {
            Ok(delta) => {
                state.global_state = state.global_state.apply(&delta);
                let entry = state.omega.remove(&digest).expect("digest present");
                info!(target: "reports", digest = %digest, "report accumulated omega -> xi");
                state.xi.insert(digest, entry.report);
            }
            Err(error) => {
                let entry = state.omega.remove(&digest).expect("digest present");
                warn!(target: "reports", digest = %digest, %error, "accumulation failed, routed to psi_b");
                state.route_to_bad(
                    digest,
                    accumulation_failure_reason(&error),
                    Some("system_accumulation"),
                );
                state.charge_offender(&entry.report.guarantor_public_key, slot);
            }
        }
    }
}

/// Formats an accumulation failure's ψ_B reason string per §4.5.2's
/// `"accumulation_failed: "+msg` convention.
fn accumulation_failure_reason(error: &jam_types::error::PvmExecutionError) -> String {
    format!("accumulation_failed: {error}")
}

/// A test-only `Ψ_A` stand-in that parses `input_data` as `"from:to:amount"`
/// and moves `amount` from `from`'s balance to `to`'s, reading both current
/// balances out of the `state` it's handed. Exists to exercise the
/// accumulation pipeline end to end with a delta that actually touches
/// `accounts`, unlike `NoopPvmExecutor`.
#[cfg(test)]
struct TransferExecutor;

#[cfg(test)]
impl PvmExecutor for TransferExecutor {
    fn execute(
        &self,
        item: &jam_types::WorkItem,
        state: &jam_types::GlobalState,
    ) -> Result<jam_types::StateDelta, jam_types::error::PvmExecutionError> {
        let mut parts = item.input_data.splitn(3, ':');
        let from = parts.next().expect("from");
        let to = parts.next().expect("to");
        let amount: u128 = parts.next().expect("amount").parse().expect("amount is a number");

        let mut from_account = state.accounts.get(from).cloned().unwrap_or_default();
        let mut to_account = state.accounts.get(to).cloned().unwrap_or_default();
        from_account.balance -= amount;
        to_account.balance += amount;

        let mut accounts = BTreeMap::new();
        accounts.insert(from.to_string(), from_account);
        accounts.insert(to.to_string(), to_account);
        Ok(jam_types::StateDelta {
            accounts: Some(accounts),
            data: None,
            log: Some(format!("transfer:{from}->{to}:{amount}")),
        })
    }
}

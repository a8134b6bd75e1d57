// Path: crates/jam-reports/src/state.rs

//! The five on-chain buckets (ρ, ω, ξ, ψ_B, ψ_O) plus the conceptual
//! `GlobalState` that `Ψ_A` executes against, bundled into one
//! [`OnchainState`] value that the four processors mutate in place.

use jam_types::{GlobalState, GuarantorId, WorkDigest, WorkReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A report awaiting super-majority endorsement in ρ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhoEntry {
    /// The report content (the first accepted guarantee for this digest).
    pub report: WorkReport,
    /// Guarantors who have signed an endorsement of this digest so far.
    pub received_signatures: BTreeSet<GuarantorId>,
    /// Slot at which this digest was first admitted to ρ.
    pub submission_slot: u64,
}

/// Whether a report sitting in ω is still waiting on its dependencies, free
/// to execute, or mid-execution within the current accumulation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OmegaStatus {
    /// Unresolved dependencies remain within ω.
    Pending,
    /// No unresolved intra-bucket dependency; eligible for execution ordering.
    Ready,
    /// Currently being executed by the accumulation sweep.
    Processing,
}

/// A report that has reached super-majority and is queued for accumulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmegaEntry {
    /// The promoted report.
    pub report: WorkReport,
    /// Its current position in the accumulation life-cycle.
    pub status: OmegaStatus,
}

/// A report or digest that has been routed to the bad-reports bucket, either
/// by a failed guarantee check or by a successful dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsiBEntry {
    /// The tagged reason the report was routed here (see `ProtocolError::reason`).
    pub reason: String,
    /// Guarantors/disputers who have raised a dispute against this digest.
    pub disputed_by: BTreeSet<GuarantorId>,
}

/// A guarantor's dispute-count record in the offender ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsiOEntry {
    /// Number of times this guarantor has been charged.
    pub dispute_count: u64,
    /// Slot of the most recent charge.
    pub last_dispute_slot: u64,
}

/// The full Reports state: five buckets plus the conceptual `GlobalState`,
/// bundled with the protocol constants the processors are parameterized by.
///
/// Bucket disjointness (a digest occupies at most one of ρ, ω, ξ, ψ_B at a
/// time) is an invariant maintained by the processors, not enforced by this
/// type; see `guarantee`, `dispute` and `accumulation` for the transitions
/// that keep it true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnchainState {
    /// ρ: pending reports awaiting super-majority endorsement.
    pub rho: BTreeMap<WorkDigest, RhoEntry>,
    /// ω: promoted reports queued for accumulation.
    pub omega: BTreeMap<WorkDigest, OmegaEntry>,
    /// ξ: finalized, immutable report history.
    pub xi: BTreeMap<WorkDigest, WorkReport>,
    /// ψ_B: bad/disputed reports.
    pub psi_b: BTreeMap<WorkDigest, PsiBEntry>,
    /// ψ_O: guarantor offender ledger.
    pub psi_o: BTreeMap<GuarantorId, PsiOEntry>,
    /// The conceptual on-chain world `Ψ_A` executes against.
    pub global_state: GlobalState,
}

impl OnchainState {
    /// An empty state parameterized by `config`'s constants.
    ///
    /// `config` is not stored on `OnchainState` itself: the processors take
    /// it as a parameter, so a single state can be replayed under different
    /// constant sets (e.g. in test vectors) without reconstructing it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `digest` is not present in any of ρ, ω, ξ or ψ_B.
    pub fn is_unknown(&self, digest: &str) -> bool {
        !self.rho.contains_key(digest)
            && !self.omega.contains_key(digest)
            && !self.xi.contains_key(digest)
            && !self.psi_b.contains_key(digest)
    }

    /// Charges a guarantor in ψ_O: increments its dispute count and stamps
    /// `slot` as its most recent offense, inserting a fresh entry if absent.
    ///
    /// Shared by the guarantee processor's failure routing (§4.2.1) and the
    /// dispute processor's offender charge (§4.3 step 3) so both paths stay
    /// bit-identical.
    pub fn charge_offender(&mut self, guarantor: &str, slot: u64) {
        let entry = self.psi_o.entry(guarantor.to_string()).or_default();
        entry.dispute_count += 1;
        entry.last_dispute_slot = slot;
    }

    /// Routes `digest` into ψ_B, merging `disputer` into its disputed-by set
    /// if an entry already exists (e.g. a second, independent dispute against
    /// an already-bad report) rather than overwriting its reason.
    pub fn route_to_bad(&mut self, digest: WorkDigest, reason: String, disputer: Option<&str>) {
        let entry = self.psi_b.entry(digest).or_insert_with(|| PsiBEntry {
            reason,
            disputed_by: BTreeSet::new(),
        });
        if let Some(disputer) = disputer {
            entry.disputed_by.insert(disputer.to_string());
        }
    }

    /// A plain-data snapshot of the full state, used both for the exposed
    /// `OnchainState::snapshot` interface and for test-vector `post_state`
    /// comparison.
    ///
    /// Built by hand off `jam_types::keys`'s `KEY_*` constants rather than
    /// `serde_json::to_value(self)`, so the wire shape of the snapshot stays
    /// pinned to those keys even if `OnchainState`'s own field names drift.
    pub fn snapshot(&self) -> serde_json::Value {
        use jam_types::keys::{KEY_GLOBAL_STATE, KEY_OMEGA, KEY_PSI_B, KEY_PSI_O, KEY_RHO, KEY_XI};

        serde_json::json!({
            KEY_RHO: serde_json::to_value(&self.rho).unwrap_or(serde_json::Value::Null),
            KEY_OMEGA: serde_json::to_value(&self.omega).unwrap_or(serde_json::Value::Null),
            KEY_XI: serde_json::to_value(&self.xi).unwrap_or(serde_json::Value::Null),
            KEY_PSI_B: serde_json::to_value(&self.psi_b).unwrap_or(serde_json::Value::Null),
            KEY_PSI_O: serde_json::to_value(&self.psi_o).unwrap_or(serde_json::Value::Null),
            KEY_GLOBAL_STATE: serde_json::to_value(&self.global_state).unwrap_or(serde_json::Value::Null),
        })
    }
}

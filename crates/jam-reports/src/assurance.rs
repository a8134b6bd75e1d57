// Path: crates/jam-reports/src/assurance.rs

//! The Assurance Processor. A hook that preserves the canonical extrinsic
//! ordering contract (Guarantees → Assurances → Disputes → Accumulation)
//! without yet performing any state mutation; reserved for future affirmation
//! bookkeeping (e.g. accelerating finality or tilting unresolved disputes).

use crate::state::OnchainState;
use jam_types::error::ValidationError;
use jam_types::WorkDigest;

/// An `Assurance` extrinsic: an affirming party's statement about a report,
/// optionally tied to an in-flight dispute.
#[derive(Debug, Clone)]
pub struct Assurance {
    /// Digest of the report being affirmed.
    pub report_hash: WorkDigest,
    /// Identity of the affirming party.
    pub affirming_party: String,
    /// Digest of a dispute this assurance responds to, if any.
    pub target_dispute_hash: Option<WorkDigest>,
    /// Free-form reason text.
    pub reason: Option<String>,
}

/// Validates the shape of `assurance` and otherwise no-ops.
///
/// This iteration of the Reports machinery performs no state mutation here;
/// the function exists so the extrinsic ordering contract has a concrete
/// seam to call through, and so future affirmation semantics can be added
/// without changing the block-processing pipeline's shape. `state` and `slot`
/// are accepted but unused today, matching the parameter shape of the other
/// three processors so the ordering contract's reserved slot stays intact.
pub fn process_assurance_extrinsic(
    assurance: &Assurance,
    _state: &OnchainState,
    _slot: u64,
) -> Result<(), ValidationError> {
    if assurance.report_hash.is_empty() {
        return Err(ValidationError::EmptyField("assurance.report_hash"));
    }
    if assurance.affirming_party.is_empty() {
        return Err(ValidationError::EmptyField("assurance.affirming_party"));
    }
    Ok(())
}
